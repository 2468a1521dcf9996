//! # Bone Geometry
//!
//! Parametric bone shape generator and transform cache for scene-graph hosts.
//!
//! ## Features
//!
//! - **Transforms**: Object matrix and per-instance world matrices with inverses
//! - **Mesh**: Nine-point tapered bone polyhedron with flat-shaded triangles and wireframe lines
//! - **Bounds**: Object-space box guaranteed to enclose the mesh
//! - **Attributes**: Typed get/set dispatch with unit conversion and matrix invalidation
//! - **Draw Snapshots**: Immutable per-placement bundles safe to hand to a render thread
//!
//! ## Quick Start
//!
//! ```rust
//! use bone_geometry::prelude::*;
//!
//! let mut registry = NodeRegistry::new();
//! let handle = registry.create();
//!
//! let node = registry.get_mut(handle).unwrap();
//! node.set_attribute(Attribute::Size(SizeField::Length), AttributeValue::Double(4.0));
//! node.set_attribute(Attribute::Rotation(VectorField::Z), AttributeValue::Angle(0.5));
//!
//! let world = node.compute(OutputPlug::ObjectWorldMatrix, &[Mat4::identity()]);
//! assert_eq!(world.as_array().map(<[Mat4]>::len), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod attributes;
pub mod config;
pub mod draw;
pub mod foundation;
pub mod node;
pub mod registry;
pub mod shape;

mod error;

pub use error::BoneError;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        attributes::{
            Attribute, AttributeCategory, AttributeSync, AttributeValue, FinField, SizeField,
            VectorField,
        },
        config::{BoneConfig, Config, ConfigError, ConfigFormat, DrawSettings, ShapeDefaults},
        draw::{DisplayStateProvider, DisplayStatus, DrawOverride, DrawSnapshot, PlacementPath},
        foundation::{
            color::Color,
            math::{Mat4, Mat4Ext, Point3, Vec3},
            units::{AngleUnit, LinearUnit, UnitSettings},
        },
        node::{BoneNode, ComputedOutput, DirtyInputs, OutputPlug},
        registry::{NodeHandle, NodeRegistry},
        shape::{
            Aabb, BoneMesh, BoundingBox, BoundsCalculator, FinKind, FinParameters, MeshBuilder,
            ObjectTransform, RenderBuffers, ShapeParameters, TransformModel, WorldTransforms,
        },
        BoneError,
    };
}
