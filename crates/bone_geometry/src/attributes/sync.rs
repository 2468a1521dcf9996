//! Attribute read/write dispatch
//!
//! [`AttributeSync`] is the only path between host attribute traffic and a
//! node's [`ShapeParameters`]. Values cross the boundary in the host's
//! units and are stored in centimeters and radians. Scale and the size and
//! fin scalars are unitless.

use serde::{Deserialize, Serialize};

use super::{Attribute, FinField, SizeField, VectorField};
use crate::foundation::math::Vec3;
use crate::foundation::units::{AngleUnit, LinearUnit, UnitSettings};
use crate::shape::parameters::{FinKind, FinParameters, ShapeParameters};

/// Value of one attribute as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Whole position, rotation or scale vector
    Vector(Vec3),
    /// One position component in the host's linear unit
    Distance(f64),
    /// One rotation component in the host's angle unit
    Angle(f64),
    /// Unitless scalar
    Double(f64),
    /// Flag
    Bool(bool),
}

impl AttributeValue {
    /// Inner vector, if this is a vector value
    pub const fn as_vector(&self) -> Option<Vec3> {
        match self {
            Self::Vector(value) => Some(*value),
            _ => None,
        }
    }

    /// Inner distance, if this is a distance value
    pub const fn as_distance(&self) -> Option<f64> {
        match self {
            Self::Distance(value) => Some(*value),
            _ => None,
        }
    }

    /// Inner angle, if this is an angle value
    pub const fn as_angle(&self) -> Option<f64> {
        match self {
            Self::Angle(value) => Some(*value),
            _ => None,
        }
    }

    /// Inner scalar, if this is a unitless value
    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Inner flag, if this is a boolean value
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// Converts and routes attribute traffic for one unit convention
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttributeSync {
    units: UnitSettings,
}

impl AttributeSync {
    /// Create a dispatcher for the given external units
    pub const fn new(units: UnitSettings) -> Self {
        Self { units }
    }

    /// External units in use
    pub const fn units(&self) -> UnitSettings {
        self.units
    }

    /// Read an attribute in external units
    pub fn get(&self, params: &ShapeParameters, attribute: Attribute) -> AttributeValue {
        let value = match attribute {
            Attribute::Position(field) => {
                let linear = self.units.linear;
                read_vector(
                    &params.local_position,
                    field,
                    |v| linear.from_centimeters(v),
                    AttributeValue::Distance,
                )
            }
            Attribute::Rotation(field) => {
                let angle = self.units.angle;
                read_vector(
                    &params.local_rotate,
                    field,
                    |v| angle.from_radians(v),
                    AttributeValue::Angle,
                )
            }
            Attribute::Scale(field) => {
                read_vector(&params.local_scale, field, |v| v, AttributeValue::Double)
            }
            Attribute::Size(field) => AttributeValue::Double(match field {
                SizeField::Width => params.width,
                SizeField::Height => params.height,
                SizeField::Length => params.length,
                SizeField::Taper => params.taper,
            }),
            Attribute::SideFins(field) => read_fin(params.fin(FinKind::Side), field),
            Attribute::FrontFin(field) => read_fin(params.fin(FinKind::Front), field),
            Attribute::BackFin(field) => read_fin(params.fin(FinKind::Back), field),
        };

        log::trace!("get {} -> {:?}", attribute, value);
        value
    }

    /// Write an attribute given in external units
    ///
    /// Returns whether the value was stored. A value whose kind does not fit
    /// the field is ignored, but writes to position, rotation or scale still
    /// mark the object matrix dirty.
    pub fn set(
        &self,
        params: &mut ShapeParameters,
        attribute: Attribute,
        value: AttributeValue,
    ) -> bool {
        let applied = match attribute {
            Attribute::Position(field) => {
                let linear = self.units.linear;
                write_vector(
                    &mut params.local_position,
                    field,
                    value,
                    |v| linear.to_centimeters(v),
                    AttributeValue::as_distance,
                )
            }
            Attribute::Rotation(field) => {
                let angle = self.units.angle;
                write_vector(
                    &mut params.local_rotate,
                    field,
                    value,
                    |v| angle.to_radians(v),
                    AttributeValue::as_angle,
                )
            }
            Attribute::Scale(field) => write_vector(
                &mut params.local_scale,
                field,
                value,
                |v| v,
                AttributeValue::as_double,
            ),
            Attribute::Size(field) => {
                let slot = match field {
                    SizeField::Width => &mut params.width,
                    SizeField::Height => &mut params.height,
                    SizeField::Length => &mut params.length,
                    SizeField::Taper => &mut params.taper,
                };
                write_scalar(slot, value.as_double())
            }
            Attribute::SideFins(field) => write_fin(params.fin_mut(FinKind::Side), field, value),
            Attribute::FrontFin(field) => write_fin(params.fin_mut(FinKind::Front), field, value),
            Attribute::BackFin(field) => write_fin(params.fin_mut(FinKind::Back), field, value),
        };

        if attribute.category().affects_transform() {
            params.dirty_object_matrix();
        }

        if applied {
            log::trace!("set {} <- {:?}", attribute, value);
        } else {
            log::trace!("set {} ignored mismatched value {:?}", attribute, value);
        }
        applied
    }
}

fn read_vector(
    vector: &Vec3,
    field: VectorField,
    convert: impl Fn(f64) -> f64,
    wrap: fn(f64) -> AttributeValue,
) -> AttributeValue {
    match field.index() {
        Some(index) => wrap(convert(vector[index])),
        None => AttributeValue::Vector(vector.map(convert)),
    }
}

fn write_vector(
    vector: &mut Vec3,
    field: VectorField,
    value: AttributeValue,
    convert: impl Fn(f64) -> f64,
    component: fn(&AttributeValue) -> Option<f64>,
) -> bool {
    match field.index() {
        None => match value.as_vector() {
            Some(whole) => {
                *vector = whole.map(convert);
                true
            }
            None => false,
        },
        Some(index) => write_scalar(&mut vector[index], component(&value).map(convert)),
    }
}

fn write_scalar(slot: &mut f64, value: Option<f64>) -> bool {
    match value {
        Some(scalar) => {
            *slot = scalar;
            true
        }
        None => false,
    }
}

const fn read_fin(fin: &FinParameters, field: FinField) -> AttributeValue {
    match field {
        FinField::Enabled => AttributeValue::Bool(fin.enabled),
        FinField::Size => AttributeValue::Double(fin.size),
        FinField::StartTaper => AttributeValue::Double(fin.start_taper),
        FinField::EndTaper => AttributeValue::Double(fin.end_taper),
    }
}

fn write_fin(fin: &mut FinParameters, field: FinField, value: AttributeValue) -> bool {
    let slot = match field {
        FinField::Enabled => {
            let Some(enabled) = value.as_bool() else {
                return false;
            };
            fin.enabled = enabled;
            return true;
        }
        FinField::Size => &mut fin.size,
        FinField::StartTaper => &mut fin.start_taper,
        FinField::EndTaper => &mut fin.end_taper,
    };
    write_scalar(slot, value.as_double())
}

impl From<(LinearUnit, AngleUnit)> for AttributeSync {
    fn from((linear, angle): (LinearUnit, AngleUnit)) -> Self {
        Self::new(UnitSettings::new(linear, angle))
    }
}
