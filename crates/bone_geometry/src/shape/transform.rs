//! Object and per-instance world transforms
//!
//! Pure functions turning a local position/rotation/scale into an object
//! matrix, and an object matrix plus the host's placement matrices into one
//! world matrix per scene instance.
//!
//! In row-vector terms the object matrix is `scale * rotate * translate` and
//! each world matrix is `object * placement`. Stored in column-vector form
//! these become `translate * rotate * scale` and `placement * object`.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Object matrix together with its inverse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// Object-space matrix
    pub matrix: Mat4,
    /// Algebraic inverse of `matrix`
    ///
    /// Contains infinities or NaN when a scale component is zero.
    pub inverse: Mat4,
}

impl ObjectTransform {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
            inverse: Mat4::identity(),
        }
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// World matrices and inverses, one per scene instance, in placement order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldTransforms {
    /// World matrix per instance
    pub matrices: Vec<Mat4>,
    /// Inverse world matrix per instance
    pub inverses: Vec<Mat4>,
}

impl WorldTransforms {
    /// Number of instances
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Whether there are no instances
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// Transform computations for bone nodes
pub struct TransformModel;

impl TransformModel {
    /// Compose the object matrix and its inverse from local components
    ///
    /// The inverse is built from the inverted factors (`S⁻¹ · Rᵀ · T⁻¹`), so a
    /// zero scale component yields infinities/NaN rather than a substituted
    /// value. Callers that care must check with [`Self::is_invertible`].
    pub fn compute_object_matrix(
        position: &Vec3,
        rotation: &Vec3,
        scale: &Vec3,
    ) -> ObjectTransform {
        let translate = Mat4::translation_matrix(position);
        let rotate = Mat4::rotation_matrix(rotation);
        let scale_matrix = Mat4::scale_matrix(scale);

        let matrix = translate * rotate * scale_matrix;

        let inverse_scale = Vec3::new(1.0 / scale.x, 1.0 / scale.y, 1.0 / scale.z);
        let inverse = Mat4::scale_matrix(&inverse_scale)
            * rotate.transpose()
            * Mat4::translation_matrix(&-position);

        if !Self::is_invertible(scale) {
            log::debug!("Object matrix is singular for scale {:?}", scale);
        }

        ObjectTransform { matrix, inverse }
    }

    /// Compose the object matrix with every placement matrix
    ///
    /// Results are rebuilt from scratch and keep the order of `placements`;
    /// an empty slice gives empty results.
    pub fn compute_world_matrices(
        object: &ObjectTransform,
        placements: &[Mat4],
    ) -> WorldTransforms {
        let mut world = WorldTransforms {
            matrices: Vec::with_capacity(placements.len()),
            inverses: Vec::with_capacity(placements.len()),
        };

        for (index, placement) in placements.iter().enumerate() {
            let matrix = placement * object.matrix;
            let inverse = matrix.try_inverse().unwrap_or_else(|| {
                log::warn!("World matrix {} is singular; its inverse is not finite", index);
                matrix.algebraic_inverse()
            });

            world.matrices.push(matrix);
            world.inverses.push(inverse);
        }

        world
    }

    /// Whether an object matrix built from `scale` has an inverse
    pub fn is_invertible(scale: &Vec3) -> bool {
        scale.iter().all(|component| *component != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use crate::foundation::math::{transform_affine, Point3};
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_identity_components() {
        let object = TransformModel::compute_object_matrix(
            &Vec3::zeros(),
            &Vec3::zeros(),
            &Vec3::new(1.0, 1.0, 1.0),
        );

        assert_relative_eq!(object.matrix, Mat4::identity(), epsilon = EPSILON);
        assert_relative_eq!(object.inverse, Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_matrix_times_inverse_is_identity() {
        let cases = [
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), Vec3::new(2.0, 1.5, 0.8)),
            (Vec3::new(-4.0, 0.5, 9.0), Vec3::new(PI, -PI / 3.0, 2.0), Vec3::new(-1.0, 3.0, 0.25)),
            (Vec3::zeros(), Vec3::new(0.0, PI, 0.0), Vec3::new(1.0, 1.0, 1.0)),
        ];

        for (position, rotation, scale) in cases {
            let object = TransformModel::compute_object_matrix(&position, &rotation, &scale);
            let identity = Mat4::identity();
            assert_relative_eq!(object.matrix * object.inverse, identity, epsilon = EPSILON);
            assert_relative_eq!(object.inverse * object.matrix, identity, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_scale_applies_before_rotation_before_translation() {
        let object = TransformModel::compute_object_matrix(
            &Vec3::new(10.0, 0.0, 0.0),
            &Vec3::new(0.0, 0.0, PI / 2.0),
            &Vec3::new(2.0, 1.0, 1.0),
        );

        // (1,0,0) -> scaled (2,0,0) -> rotated about Z (0,2,0) -> translated (10,2,0)
        let p = transform_affine(&object.matrix, &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_zero_scale_inverse_is_not_finite() {
        let scale = Vec3::new(0.0, 1.0, 1.0);
        let object = TransformModel::compute_object_matrix(&Vec3::zeros(), &Vec3::zeros(), &scale);

        assert!(!TransformModel::is_invertible(&scale));
        assert!(object.inverse.iter().any(|value| !value.is_finite()));
        assert!(object.matrix.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn test_world_matrices_empty_placements() {
        let object = ObjectTransform::identity();
        let world = TransformModel::compute_world_matrices(&object, &[]);

        assert!(world.is_empty());
        assert!(world.inverses.is_empty());
    }

    #[test]
    fn test_world_matrices_preserve_order() {
        let object = TransformModel::compute_object_matrix(
            &Vec3::new(1.0, 0.0, 0.0),
            &Vec3::new(0.0, 0.3, 0.0),
            &Vec3::new(1.0, 2.0, 1.0),
        );
        let placements = [
            Mat4::translation_matrix(&Vec3::new(0.0, 5.0, 0.0)),
            Mat4::rotation_matrix(&Vec3::new(PI / 2.0, 0.0, 0.0)),
            Mat4::scale_matrix(&Vec3::new(3.0, 3.0, 3.0)),
        ];

        let world = TransformModel::compute_world_matrices(&object, &placements);

        assert_eq!(world.len(), 3);
        assert_eq!(world.inverses.len(), 3);
        for (index, placement) in placements.iter().enumerate() {
            let (matrix, inverse) = (world.matrices[index], world.inverses[index]);
            assert_relative_eq!(matrix, placement * object.matrix, epsilon = EPSILON);
            assert_relative_eq!(matrix * inverse, Mat4::identity(), epsilon = EPSILON);
        }
    }

    #[test]
    fn test_singular_placement_gives_algebraic_inverse() {
        let object = ObjectTransform::identity();
        let flatten = Mat4::scale_matrix(&Vec3::new(1.0, 1.0, 0.0));
        let world = TransformModel::compute_world_matrices(&object, &[flatten, Mat4::identity()]);

        assert_eq!(world.len(), 2);
        assert!(world.inverses[0][(2, 2)].is_infinite());
        assert!(!world.inverses[0].iter().all(|value| value.is_nan()));
        assert_relative_eq!(world.inverses[1], Mat4::identity(), epsilon = EPSILON);
    }
}
