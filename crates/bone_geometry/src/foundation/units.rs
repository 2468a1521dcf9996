//! Unit conventions for the attribute boundary
//!
//! Internally every distance is stored in centimeters and every angle in
//! radians. Hosts may work in other units; [`UnitSettings`] converts values
//! at the attribute boundary so the core never sees them.

use serde::{Deserialize, Serialize};

use super::math::utils;

/// Linear unit used by the host for distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearUnit {
    /// Millimeters
    Millimeters,
    /// Centimeters (internal unit)
    #[default]
    Centimeters,
    /// Meters
    Meters,
    /// Kilometers
    Kilometers,
    /// Inches
    Inches,
    /// Feet
    Feet,
    /// Yards
    Yards,
}

impl LinearUnit {
    /// Number of centimeters in one of this unit
    pub const fn centimeters_per_unit(self) -> f64 {
        match self {
            Self::Millimeters => 0.1,
            Self::Centimeters => 1.0,
            Self::Meters => 100.0,
            Self::Kilometers => 100_000.0,
            Self::Inches => 2.54,
            Self::Feet => 30.48,
            Self::Yards => 91.44,
        }
    }

    /// Convert a value in this unit to centimeters
    pub fn to_centimeters(self, value: f64) -> f64 {
        value * self.centimeters_per_unit()
    }

    /// Convert a value in centimeters to this unit
    pub fn from_centimeters(self, centimeters: f64) -> f64 {
        centimeters / self.centimeters_per_unit()
    }
}

/// Angular unit used by the host for rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    /// Radians (internal unit)
    #[default]
    Radians,
    /// Degrees
    Degrees,
}

impl AngleUnit {
    /// Convert a value in this unit to radians
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => utils::deg_to_rad(value),
        }
    }

    /// Convert a value in radians to this unit
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Radians => radians,
            Self::Degrees => utils::rad_to_deg(radians),
        }
    }
}

/// External unit settings applied by the attribute boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSettings {
    /// Unit the host uses for distances
    pub linear: LinearUnit,
    /// Unit the host uses for angles
    pub angle: AngleUnit,
}

impl UnitSettings {
    /// Create unit settings
    pub const fn new(linear: LinearUnit, angle: AngleUnit) -> Self {
        Self { linear, angle }
    }

    /// Internal units on both axes (centimeters, radians)
    pub const fn internal() -> Self {
        Self::new(LinearUnit::Centimeters, AngleUnit::Radians)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_round_trip_through_centimeters() {
        let units = [
            LinearUnit::Millimeters,
            LinearUnit::Meters,
            LinearUnit::Inches,
            LinearUnit::Yards,
        ];
        for unit in units {
            let cm = unit.to_centimeters(3.5);
            assert_relative_eq!(unit.from_centimeters(cm), 3.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_known_conversions() {
        assert_relative_eq!(LinearUnit::Meters.to_centimeters(2.0), 200.0);
        assert_relative_eq!(LinearUnit::Inches.to_centimeters(1.0), 2.54);
        assert_relative_eq!(AngleUnit::Degrees.to_radians(90.0), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(AngleUnit::Radians.from_radians(1.25), 1.25);
    }

    #[test]
    fn test_default_is_internal() {
        assert_eq!(UnitSettings::default(), UnitSettings::internal());
    }
}
