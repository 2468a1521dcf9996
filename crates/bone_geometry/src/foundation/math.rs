//! Math utilities and types
//!
//! Provides the double-precision math types used by the bone geometry core.
//!
//! # Matrix Convention
//! Matrices are stored in nalgebra's column-vector convention: a point is
//! transformed as `M * p`. A host that thinks in row vectors (`p * M`) sees
//! the transpose of the same product, so the row-vector composition
//! `scale * rotate * translate` is stored here as `translate * rotate * scale`.

pub use nalgebra::{Matrix4, Rotation3, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f64 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with the constructors the transform model needs
pub trait Mat4Ext {
    /// Create a translation matrix
    fn translation_matrix(position: &Vec3) -> Mat4;

    /// Create a non-uniform scale matrix
    fn scale_matrix(scale: &Vec3) -> Mat4;

    /// Create a rotation matrix from XYZ Euler angles in radians
    ///
    /// X is applied first, then Y, then Z. This is the only Euler conversion
    /// in the crate; every rotation goes through it.
    fn rotation_matrix(angles: &Vec3) -> Mat4;

    /// Inverse as adjugate over determinant
    ///
    /// Matches `try_inverse` for invertible matrices. A singular matrix
    /// divides by a zero determinant, so its entries come out infinite or
    /// NaN instead of being replaced by a substitute value.
    fn algebraic_inverse(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn translation_matrix(position: &Vec3) -> Mat4 {
        Mat4::new_translation(position)
    }

    fn scale_matrix(scale: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(scale)
    }

    fn rotation_matrix(angles: &Vec3) -> Mat4 {
        // from_euler_angles(roll, pitch, yaw) == Rz(yaw) * Ry(pitch) * Rx(roll)
        Rotation3::from_euler_angles(angles.x, angles.y, angles.z).to_homogeneous()
    }

    fn algebraic_inverse(&self) -> Mat4 {
        if let Some(inverse) = self.try_inverse() {
            return inverse;
        }

        let determinant = self.determinant();
        Mat4::from_fn(|row, column| {
            let minor = self.remove_row(column).remove_column(row).determinant();
            let sign = if (row + column) % 2 == 0 { 1.0 } else { -1.0 };
            sign * minor / determinant
        })
    }
}

/// Transform a point by a homogeneous matrix without a perspective divide
///
/// Every matrix in this crate is affine, so the divide nalgebra performs in
/// `transform_point` is skipped to keep degenerate (zero scale) inputs from
/// turning into NaN.
pub fn transform_affine(matrix: &Mat4, point: &Point3) -> Point3 {
    let v = matrix * point.to_homogeneous();
    Point3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let angles = Vec3::new(0.3, -0.7, 1.1);
        let expected = Mat4::from_axis_angle(&Vec3::z_axis(), angles.z)
            * Mat4::from_axis_angle(&Vec3::y_axis(), angles.y)
            * Mat4::from_axis_angle(&Vec3::x_axis(), angles.x);

        assert_relative_eq!(Mat4::rotation_matrix(&angles), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_half_turn_about_y() {
        let rotation = Mat4::rotation_matrix(&Vec3::new(0.0, constants::PI, 0.0));
        let x = transform_affine(&rotation, &Point3::new(1.0, 0.0, 0.0));

        assert_relative_eq!(x, Point3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_affine_transform_of_zero_scale_stays_finite() {
        let flatten = Mat4::scale_matrix(&Vec3::new(0.0, 1.0, 1.0));
        let p = transform_affine(&flatten, &Point3::new(2.0, 3.0, 4.0));

        assert_eq!(p, Point3::new(0.0, 3.0, 4.0));
    }

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(utils::rad_to_deg(constants::PI * 0.5), 90.0);
    }

    #[test]
    fn test_algebraic_inverse_of_regular_matrix() {
        let matrix = Mat4::translation_matrix(&Vec3::new(1.0, -2.0, 0.5))
            * Mat4::rotation_matrix(&Vec3::new(0.3, 0.2, -0.9))
            * Mat4::scale_matrix(&Vec3::new(2.0, 0.5, 3.0));

        assert_relative_eq!(matrix.algebraic_inverse() * matrix, Mat4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_algebraic_inverse_of_singular_matrix_is_not_finite() {
        let flatten = Mat4::scale_matrix(&Vec3::new(1.0, 0.0, 1.0));
        let inverse = flatten.algebraic_inverse();

        assert!(inverse.iter().any(|value| value.is_infinite()));
        assert!(Mat4::zeros().algebraic_inverse().iter().all(|value| value.is_nan()));
    }
}
