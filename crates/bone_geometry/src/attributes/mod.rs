//! Attribute addressing
//!
//! Every host-visible input of a bone node is one [`Attribute`]: a category
//! variant carrying the field it selects. Host attribute names, long or
//! short, parse into this enum; anything else is reported as unknown.

pub mod sync;

pub use sync::{AttributeSync, AttributeValue};

use std::fmt;
use std::str::FromStr;

use crate::error::BoneError;

/// Component selector of a vector attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorField {
    /// All three components at once
    Whole,
    /// X component
    X,
    /// Y component
    Y,
    /// Z component
    Z,
}

impl VectorField {
    /// Component index, `None` for the whole vector
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Whole => None,
            Self::X => Some(0),
            Self::Y => Some(1),
            Self::Z => Some(2),
        }
    }
}

/// Scalar of the size group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeField {
    /// Cross-section width
    Width,
    /// Cross-section height
    Height,
    /// Requested length
    Length,
    /// Distal taper
    Taper,
}

/// Field of a fin group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinField {
    /// Enable flag
    Enabled,
    /// Fin size
    Size,
    /// Root taper
    StartTaper,
    /// Tip taper
    EndTaper,
}

/// Category tag of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCategory {
    /// Local position
    Position,
    /// Local rotation
    Rotation,
    /// Local scale
    Scale,
    /// Width, height, length and taper
    Size,
    /// Side fin group
    SideFins,
    /// Front fin group
    FrontFin,
    /// Back fin group
    BackFin,
}

impl AttributeCategory {
    /// Whether writes in this category invalidate the object matrix
    pub const fn affects_transform(self) -> bool {
        matches!(self, Self::Position | Self::Rotation | Self::Scale)
    }
}

/// One addressable bone attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Local position, whole or per component
    Position(VectorField),
    /// Local rotation, whole or per component
    Rotation(VectorField),
    /// Local scale, whole or per component
    Scale(VectorField),
    /// Size scalar
    Size(SizeField),
    /// Side fin field
    SideFins(FinField),
    /// Front fin field
    FrontFin(FinField),
    /// Back fin field
    BackFin(FinField),
}

const VECTOR_FIELDS: [VectorField; 4] =
    [VectorField::Whole, VectorField::X, VectorField::Y, VectorField::Z];
const SIZE_FIELDS: [SizeField; 4] =
    [SizeField::Width, SizeField::Height, SizeField::Length, SizeField::Taper];
const FIN_FIELDS: [FinField; 4] =
    [FinField::Enabled, FinField::Size, FinField::StartTaper, FinField::EndTaper];

impl Attribute {
    /// Every attribute of a bone node
    pub fn all() -> impl Iterator<Item = Self> {
        let vectors = [Self::Position as fn(VectorField) -> Self, Self::Rotation, Self::Scale]
            .into_iter()
            .flat_map(|make| VECTOR_FIELDS.into_iter().map(make));
        let fins = [Self::SideFins as fn(FinField) -> Self, Self::FrontFin, Self::BackFin]
            .into_iter()
            .flat_map(|make| FIN_FIELDS.into_iter().map(make));

        vectors.chain(SIZE_FIELDS.into_iter().map(Self::Size)).chain(fins)
    }

    /// Category this attribute belongs to
    pub const fn category(self) -> AttributeCategory {
        match self {
            Self::Position(_) => AttributeCategory::Position,
            Self::Rotation(_) => AttributeCategory::Rotation,
            Self::Scale(_) => AttributeCategory::Scale,
            Self::Size(_) => AttributeCategory::Size,
            Self::SideFins(_) => AttributeCategory::SideFins,
            Self::FrontFin(_) => AttributeCategory::FrontFin,
            Self::BackFin(_) => AttributeCategory::BackFin,
        }
    }

    /// Whether a change to this attribute requires a redraw
    ///
    /// Taper and the fin groups are excluded: the host refreshes the draw
    /// for them through its regular attribute-changed path.
    pub const fn affects_redraw(self) -> bool {
        match self {
            Self::Position(_) | Self::Rotation(_) | Self::Scale(_) => true,
            Self::Size(field) => !matches!(field, SizeField::Taper),
            Self::SideFins(_) | Self::FrontFin(_) | Self::BackFin(_) => false,
        }
    }

    /// Host long name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position(field) => match field {
                VectorField::Whole => "localPosition",
                VectorField::X => "localPositionX",
                VectorField::Y => "localPositionY",
                VectorField::Z => "localPositionZ",
            },
            Self::Rotation(field) => match field {
                VectorField::Whole => "localRotate",
                VectorField::X => "localRotateX",
                VectorField::Y => "localRotateY",
                VectorField::Z => "localRotateZ",
            },
            Self::Scale(field) => match field {
                VectorField::Whole => "localScale",
                VectorField::X => "localScaleX",
                VectorField::Y => "localScaleY",
                VectorField::Z => "localScaleZ",
            },
            Self::Size(field) => match field {
                SizeField::Width => "width",
                SizeField::Height => "height",
                SizeField::Length => "length",
                SizeField::Taper => "taper",
            },
            Self::SideFins(field) => match field {
                FinField::Enabled => "sideFins",
                FinField::Size => "sideFinsSize",
                FinField::StartTaper => "sideFinsStartTaper",
                FinField::EndTaper => "sideFinsEndTaper",
            },
            Self::FrontFin(field) => match field {
                FinField::Enabled => "frontFin",
                FinField::Size => "frontFinSize",
                FinField::StartTaper => "frontFinStartTaper",
                FinField::EndTaper => "frontFinEndTaper",
            },
            Self::BackFin(field) => match field {
                FinField::Enabled => "backFin",
                FinField::Size => "backFinSize",
                FinField::StartTaper => "backFinStartTaper",
                FinField::EndTaper => "backFinEndTaper",
            },
        }
    }

    /// Host short name
    pub fn short_name(self) -> String {
        match self {
            Self::Position(field) => format!("lp{}", vector_suffix(field)),
            Self::Rotation(field) => format!("lor{}", vector_suffix(field)),
            Self::Scale(field) => format!("ls{}", vector_suffix(field)),
            Self::Size(field) => match field {
                SizeField::Width => "w",
                SizeField::Height => "h",
                SizeField::Length => "l",
                SizeField::Taper => "t",
            }
            .to_string(),
            Self::SideFins(field) => format!("sf{}", fin_suffix(field)),
            Self::FrontFin(field) => format!("ff{}", fin_suffix(field)),
            Self::BackFin(field) => format!("bf{}", fin_suffix(field)),
        }
    }
}

const fn vector_suffix(field: VectorField) -> &'static str {
    match field {
        VectorField::Whole => "",
        VectorField::X => "x",
        VectorField::Y => "y",
        VectorField::Z => "z",
    }
}

const fn fin_suffix(field: FinField) -> &'static str {
    match field {
        FinField::Enabled => "",
        FinField::Size => "s",
        FinField::StartTaper => "st",
        FinField::EndTaper => "et",
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = BoneError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|attribute| attribute.name() == name || attribute.short_name() == name)
            .ok_or_else(|| BoneError::UnknownAttribute(name.to_string()))
    }
}
