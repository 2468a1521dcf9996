//! Shape parameter store
//!
//! One [`ShapeParameters`] value is owned by every bone node. It holds the
//! local transform, the solid dimensions, the three fin groups and the cached
//! presentation state refreshed at draw time. The object matrix is derived
//! from the local transform and cached behind a dirty flag.

use serde::{Deserialize, Serialize};

use super::transform::{ObjectTransform, TransformModel};
use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Vec3};

/// Parameters of one fin group
///
/// Fin groups are stored, synchronised and duplicated like every other
/// parameter, but the mesh builder does not generate fin geometry from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinParameters {
    /// Whether the fin group is switched on
    pub enabled: bool,
    /// Fin size
    pub size: f64,
    /// Taper at the root of the fin, in `[0, 1]`
    pub start_taper: f64,
    /// Taper at the tip of the fin, in `[0, 1]`
    pub end_taper: f64,
}

impl Default for FinParameters {
    fn default() -> Self {
        Self {
            enabled: false,
            size: 1.0,
            start_taper: 0.1,
            end_taper: 0.1,
        }
    }
}

/// Which fin group an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinKind {
    /// Fins on both sides of the bone
    Side,
    /// Fin on the front face
    Front,
    /// Fin on the back face
    Back,
}

/// Complete parameter set of one bone instance
///
/// Cloning produces an independent deep copy, which is what node
/// duplication and draw snapshots rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParameters {
    /// Local translation in centimeters
    pub local_position: Vec3,
    /// Local XYZ Euler rotation in radians
    pub local_rotate: Vec3,
    /// Local scale multipliers
    pub local_scale: Vec3,

    /// Cross-section width (local Z)
    pub width: f64,
    /// Cross-section height (local Y)
    pub height: f64,
    /// Requested length (local X)
    pub length: f64,
    /// Shrink factor of the distal end, in `[0, 1]`
    pub taper: f64,

    /// Side fin group
    pub side_fins: FinParameters,
    /// Front fin group
    pub front_fin: FinParameters,
    /// Back fin group
    pub back_fin: FinParameters,

    /// Wire colour cached from the host at the last draw preparation
    #[serde(skip)]
    pub wire_color: Color,
    /// Depth priority cached from the host at the last draw preparation
    #[serde(skip)]
    pub depth_priority: u32,

    #[serde(skip)]
    object: ObjectTransform,
    #[serde(skip, default = "dirty")]
    object_matrix_dirty: bool,
}

const fn dirty() -> bool {
    true
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            local_position: Vec3::zeros(),
            local_rotate: Vec3::zeros(),
            local_scale: Vec3::new(1.0, 1.0, 1.0),
            width: 1.0,
            height: 1.0,
            length: 1.0,
            taper: 0.9,
            side_fins: FinParameters::default(),
            front_fin: FinParameters::default(),
            back_fin: FinParameters::default(),
            wire_color: Color::default(),
            depth_priority: 0,
            object: ObjectTransform::identity(),
            object_matrix_dirty: false,
        }
    }
}

impl ShapeParameters {
    /// Create parameters with the default dimensions and an identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set the local transform
    pub fn with_transform(mut self, position: Vec3, rotate: Vec3, scale: Vec3) -> Self {
        self.local_position = position;
        self.local_rotate = rotate;
        self.local_scale = scale;
        self.dirty_object_matrix();
        self
    }

    /// Builder pattern: set the solid dimensions
    pub fn with_size(mut self, width: f64, height: f64, length: f64, taper: f64) -> Self {
        self.width = width;
        self.height = height;
        self.length = length;
        self.taper = taper;
        self
    }

    /// Length used for geometry, never shorter than the cross-section
    pub fn effective_length(&self) -> f64 {
        effective_length(self.width, self.height, self.length)
    }

    /// Fin group by kind
    pub const fn fin(&self, kind: FinKind) -> &FinParameters {
        match kind {
            FinKind::Side => &self.side_fins,
            FinKind::Front => &self.front_fin,
            FinKind::Back => &self.back_fin,
        }
    }

    /// Mutable fin group by kind
    pub fn fin_mut(&mut self, kind: FinKind) -> &mut FinParameters {
        match kind {
            FinKind::Side => &mut self.side_fins,
            FinKind::Front => &mut self.front_fin,
            FinKind::Back => &mut self.back_fin,
        }
    }

    /// Mark the cached object matrix stale
    ///
    /// Must follow every write to position, rotation or scale.
    pub fn dirty_object_matrix(&mut self) {
        self.object_matrix_dirty = true;
    }

    /// Whether the cached object matrix needs recomputing
    pub const fn is_object_matrix_dirty(&self) -> bool {
        self.object_matrix_dirty
    }

    /// Object matrix and inverse, recomputed first if marked dirty
    pub fn object_transform(&mut self) -> ObjectTransform {
        if self.object_matrix_dirty {
            self.object = self.compute_object_transform();
            self.object_matrix_dirty = false;
            log::debug!("Recomputed object matrix for position {:?}", self.local_position);
        }
        self.object
    }

    /// Object matrix, recomputed first if it was marked dirty
    pub fn object_matrix(&mut self) -> Mat4 {
        self.object_transform().matrix
    }

    /// Object matrix and inverse without touching the cache
    ///
    /// Computes a fresh transform when the cache is stale.
    pub fn current_object_transform(&self) -> ObjectTransform {
        if self.object_matrix_dirty {
            self.compute_object_transform()
        } else {
            self.object
        }
    }

    /// Object matrix without touching the cache
    pub fn current_object_matrix(&self) -> Mat4 {
        self.current_object_transform().matrix
    }

    fn compute_object_transform(&self) -> ObjectTransform {
        TransformModel::compute_object_matrix(
            &self.local_position,
            &self.local_rotate,
            &self.local_scale,
        )
    }
}

/// `max(length, max(width, height))`
pub fn effective_length(width: f64, height: f64, length: f64) -> f64 {
    length.max(width.max(height))
}
