//! # Bone Configuration
//!
//! Settings applied when bone nodes are created and drawn: the host's
//! attribute units, the draw defaults used when display-state lookups fail,
//! and the initial shape of new nodes.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::color::Color;
use crate::foundation::units::UnitSettings;
use crate::shape::parameters::{FinParameters, ShapeParameters};

/// Draw preparation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    /// Wire colour used until the host reports one
    pub default_wire_color: Color,
    /// Depth priority of geometry whose components are being edited
    pub active_wire_depth_priority: u32,
    /// Depth priority of all other geometry
    pub dormant_filled_depth_priority: u32,
    /// Wireframe line width in pixels
    pub line_width: f32,
}

impl DrawSettings {
    /// Create draw settings with the default priorities
    pub fn new() -> Self {
        Self {
            default_wire_color: Color::BLACK,
            active_wire_depth_priority: 5,
            dormant_filled_depth_priority: 0,
            line_width: 1.0,
        }
    }

    /// Set the fallback wire colour
    pub const fn with_wire_color(mut self, color: Color) -> Self {
        self.default_wire_color = color;
        self
    }

    /// Set both depth priorities
    pub const fn with_depth_priorities(mut self, active_wire: u32, dormant_filled: u32) -> Self {
        self.active_wire_depth_priority = active_wire;
        self.dormant_filled_depth_priority = dormant_filled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_width <= 0.0 || self.line_width.is_nan() {
            return Err(ConfigError::Invalid(format!(
                "Line width must be positive, got {}",
                self.line_width
            )));
        }

        let channels = self.default_wire_color.to_array();
        if channels.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::Invalid(format!(
                "Wire colour channels must be in [0, 1], got {:?}",
                channels
            )));
        }

        Ok(())
    }
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Initial shape of newly created bone nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    /// Cross-section width
    pub width: f64,
    /// Cross-section height
    pub height: f64,
    /// Requested length
    pub length: f64,
    /// Distal taper
    pub taper: f64,
    /// Side fin group
    pub side_fins: FinParameters,
    /// Front fin group
    pub front_fin: FinParameters,
    /// Back fin group
    pub back_fin: FinParameters,
}

impl ShapeDefaults {
    /// Create shape defaults matching a fresh parameter set
    pub fn new() -> Self {
        let params = ShapeParameters::default();
        Self {
            width: params.width,
            height: params.height,
            length: params.length,
            taper: params.taper,
            side_fins: params.side_fins,
            front_fin: params.front_fin,
            back_fin: params.back_fin,
        }
    }

    /// Set the solid dimensions
    pub const fn with_size(mut self, width: f64, height: f64, length: f64, taper: f64) -> Self {
        self.width = width;
        self.height = height;
        self.length = length;
        self.taper = taper;
        self
    }

    /// Parameter set for a new node
    pub fn to_parameters(&self) -> ShapeParameters {
        let mut params =
            ShapeParameters::new().with_size(self.width, self.height, self.length, self.taper);
        params.side_fins = self.side_fins;
        params.front_fin = self.front_fin;
        params.back_fin = self.back_fin;
        params
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("width", self.width),
            ("height", self.height),
            ("length", self.length),
        ];
        for (name, value) in dimensions {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        let fins = [
            ("side fin", &self.side_fins),
            ("front fin", &self.front_fin),
            ("back fin", &self.back_fin),
        ];
        let tapers = [("bone", self.taper)].into_iter().chain(fins.iter().flat_map(|(name, fin)| {
            [(*name, fin.start_taper), (*name, fin.end_taper)]
        }));
        for (name, value) in tapers {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} taper must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level configuration of a bone geometry host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoneConfig {
    /// Log level passed to the logger
    pub log_level: String,
    /// Units the host uses for attribute values
    pub units: UnitSettings,
    /// Draw preparation settings
    pub draw: DrawSettings,
    /// Initial shape of new nodes
    pub shape: ShapeDefaults,
}

impl BoneConfig {
    /// Create a new configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            units: UnitSettings::internal(),
            draw: DrawSettings::new(),
            shape: ShapeDefaults::new(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the host units
    pub fn with_units(mut self, units: UnitSettings) -> Self {
        self.units = units;
        self
    }

    /// Set the draw settings
    pub fn with_draw(mut self, draw: DrawSettings) -> Self {
        self.draw = draw;
        self
    }

    /// Set the shape defaults
    pub fn with_shape(mut self, shape: ShapeDefaults) -> Self {
        self.shape = shape;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!("Unknown log level: {}", self.log_level)));
        }

        self.draw.validate()?;
        self.shape.validate()
    }
}

impl Default for BoneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for BoneConfig {}
