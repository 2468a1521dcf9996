//! Bone shape model
//!
//! Parameters, transforms, mesh and bounds of a single bone. Everything here
//! is host-independent and synchronous.

pub mod bounds;
pub mod mesh;
pub mod parameters;
pub mod transform;

pub use bounds::{Aabb, BoundingBox, BoundsCalculator};
pub use mesh::{BoneMesh, MeshBuilder, RenderBuffers};
pub use parameters::{FinKind, FinParameters, ShapeParameters};
pub use transform::{ObjectTransform, TransformModel, WorldTransforms};
