//! Bone node
//!
//! [`BoneNode`] is the unit the host talks to. It owns one
//! [`ShapeParameters`] store and answers the host's attribute, evaluation,
//! redraw, bounds and duplication requests. Every method touches only state
//! owned by the node, so separate nodes may be driven from separate threads.

pub mod dirty;
pub mod plug;

pub use dirty::DirtyInputs;
pub use plug::{ComputedOutput, OutputPlug};

use crate::attributes::{Attribute, AttributeSync, AttributeValue};
use crate::error::BoneError;
use crate::foundation::math::Mat4;
use crate::foundation::units::UnitSettings;
use crate::shape::bounds::{BoundingBox, BoundsCalculator};
use crate::shape::parameters::ShapeParameters;
use crate::shape::transform::{ObjectTransform, TransformModel, WorldTransforms};

/// One bone instance as seen by the host
#[derive(Debug, Clone, Default)]
pub struct BoneNode {
    params: ShapeParameters,
    sync: AttributeSync,
    world: WorldTransforms,
}

impl BoneNode {
    /// Create a node with default parameters and internal units
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node from an initial parameter set
    pub fn with_parameters(params: ShapeParameters) -> Self {
        let mut node = Self {
            params,
            ..Self::default()
        };
        node.params.dirty_object_matrix();
        node
    }

    /// Builder pattern: set the host's attribute units
    pub fn with_units(mut self, units: UnitSettings) -> Self {
        self.sync = AttributeSync::new(units);
        self
    }

    /// Current parameters
    pub const fn parameters(&self) -> &ShapeParameters {
        &self.params
    }

    /// Host units used by the attribute accessors
    pub const fn units(&self) -> UnitSettings {
        self.sync.units()
    }

    /// Read an attribute in host units
    pub fn get_attribute(&self, attribute: Attribute) -> AttributeValue {
        self.sync.get(&self.params, attribute)
    }

    /// Write an attribute given in host units
    ///
    /// Returns whether the value was stored; see [`AttributeSync::set`].
    pub fn set_attribute(&mut self, attribute: Attribute, value: AttributeValue) -> bool {
        self.sync.set(&mut self.params, attribute, value)
    }

    /// Read an attribute by its host name
    pub fn get_attribute_by_name(&self, name: &str) -> Result<AttributeValue, BoneError> {
        Ok(self.get_attribute(name.parse()?))
    }

    /// Write an attribute by its host name
    pub fn set_attribute_by_name(
        &mut self,
        name: &str,
        value: AttributeValue,
    ) -> Result<bool, BoneError> {
        Ok(self.set_attribute(name.parse()?, value))
    }

    /// Evaluate one output
    ///
    /// `placements` holds the placement matrix of every current scene
    /// instance. It is only read by the world outputs and is not kept.
    pub fn compute(&mut self, plug: OutputPlug, placements: &[Mat4]) -> ComputedOutput {
        let object = self.params.object_transform();

        if plug.is_per_instance() {
            self.world = TransformModel::compute_world_matrices(&object, placements);
            log::debug!("Computed {} for {} placements", plug, placements.len());
        }

        match plug {
            OutputPlug::ObjectMatrix => ComputedOutput::Matrix(object.matrix),
            OutputPlug::ObjectInverseMatrix => ComputedOutput::Matrix(object.inverse),
            OutputPlug::ObjectWorldMatrix => {
                ComputedOutput::MatrixArray(self.world.matrices.clone())
            }
            OutputPlug::ObjectWorldInverseMatrix => {
                ComputedOutput::MatrixArray(self.world.inverses.clone())
            }
        }
    }

    /// Evaluate an output by its host name
    pub fn compute_by_name(
        &mut self,
        name: &str,
        placements: &[Mat4],
    ) -> Result<ComputedOutput, BoneError> {
        let plug = name
            .parse::<OutputPlug>()
            .inspect_err(|error| log::debug!("Ignoring evaluation request: {}", error))?;
        Ok(self.compute(plug, placements))
    }

    /// Object transform of the current parameters
    pub fn object_transform(&self) -> ObjectTransform {
        self.params.current_object_transform()
    }

    /// World transforms from the last world evaluation
    pub const fn world_transforms(&self) -> &WorldTransforms {
        &self.world
    }

    /// Report whether the changed inputs require the geometry to be redrawn
    pub fn pre_evaluation(&self, dirty: DirtyInputs) -> bool {
        let redraw = dirty.requires_redraw();
        if redraw {
            log::trace!("Inputs {:?} require a redraw", dirty);
        }
        redraw
    }

    /// Copy the parameters of `source` into this node
    ///
    /// The copy is deep, so both nodes evolve independently afterwards.
    /// World transforms belong to the placements of one evaluation and are
    /// dropped rather than carried over.
    pub fn copy_internal_data(&mut self, source: &Self) {
        self.params = source.params.clone();
        self.world = WorldTransforms::default();
    }

    /// Bone nodes always report bounds
    pub const fn is_bounded(&self) -> bool {
        true
    }

    /// Bounds of the current shape under the current object matrix
    pub fn bounding_box(&mut self) -> BoundingBox {
        let matrix = self.params.object_matrix();
        BoundsCalculator::compute_bounds(
            self.params.width,
            self.params.height,
            self.params.length,
            self.params.taper,
            &matrix,
        )
    }

    /// Parameter copy for a draw, with a fresh object matrix
    pub fn user_data(&mut self) -> ShapeParameters {
        self.params.object_matrix();
        self.params.clone()
    }
}
