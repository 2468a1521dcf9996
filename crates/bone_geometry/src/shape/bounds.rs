//! Bounding volumes
//!
//! The bone reports its bounds as a local box carried through the object
//! matrix. The box spans `x` from the apex to the distal cap and is wide
//! enough in `y` and `z` for both the base and the distal rectangle, so every
//! mesh point lies inside it for any parameters.

use serde::{Deserialize, Serialize};

use super::parameters::effective_length;
use crate::foundation::math::{transform_affine, Mat4, Point3, Vec3};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Point3,
    /// Maximum corner of the bounding box
    pub max: Point3,
}

impl Aabb {
    /// Create a new box from min and max points
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point, `None` for an empty iterator
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |aabb, p| Self {
            min: aabb.min.inf(p),
            max: aabb.max.sup(p),
        }))
    }

    /// The eight corners, min corner first
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
        ]
    }

    /// Box grown by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Self {
        let grow = Vec3::repeat(margin);
        Self {
            min: self.min - grow,
            max: self.max + grow,
        }
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, point: &Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// Local box transformed by the object matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    local: Aabb,
    matrix: Mat4,
}

impl BoundingBox {
    /// Wrap a local box and the matrix that places it
    pub const fn new(local: Aabb, matrix: Mat4) -> Self {
        Self { local, matrix }
    }

    /// Box before transformation
    pub const fn local(&self) -> &Aabb {
        &self.local
    }

    /// Matrix applied to the local box
    pub const fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Transformed corners, in the order of [`Aabb::corners`]
    pub fn corners(&self) -> [Point3; 8] {
        self.local.corners().map(|corner| transform_affine(&self.matrix, &corner))
    }

    /// Axis-aligned box enclosing the transformed corners
    pub fn to_aabb(&self) -> Aabb {
        let corners = self.corners();
        Aabb::from_points(&corners).unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
    }

    /// Whether `point` lies inside the transformed box, within `tolerance`
    ///
    /// The test runs in local space through the inverse matrix. A singular
    /// matrix flattens the box, so the enclosing axis-aligned box is used
    /// instead.
    pub fn contains_point(&self, point: &Point3, tolerance: f64) -> bool {
        match self.matrix.try_inverse() {
            Some(inverse) => self
                .local
                .expanded(tolerance)
                .contains_point(&transform_affine(&inverse, point)),
            None => self.to_aabb().expanded(tolerance).contains_point(point),
        }
    }
}

/// Bounds computations for bone nodes
pub struct BoundsCalculator;

impl BoundsCalculator {
    /// Local box of a bone with the given dimensions
    pub fn local_bounds(width: f64, height: f64, length: f64, taper: f64) -> Aabb {
        let distal = (1.0 - taper).abs();
        let half_y = height.abs().max(distal) * 0.5;
        let half_z = width.abs().max(distal) * 0.5;

        Aabb::new(
            Point3::new(0.0, -half_y, -half_z),
            Point3::new(effective_length(width, height, length), half_y, half_z),
        )
    }

    /// Bounds of a bone with the given dimensions under `object_matrix`
    pub fn compute_bounds(
        width: f64,
        height: f64,
        length: f64,
        taper: f64,
        object_matrix: &Mat4,
    ) -> BoundingBox {
        BoundingBox::new(Self::local_bounds(width, height, length, taper), *object_matrix)
    }
}
