//! Evaluation outputs

use std::fmt;
use std::str::FromStr;

use crate::error::BoneError;
use crate::foundation::math::Mat4;

/// Output the host may ask a bone node to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputPlug {
    /// Object matrix
    ObjectMatrix,
    /// Inverse object matrix
    ObjectInverseMatrix,
    /// One world matrix per placement
    ObjectWorldMatrix,
    /// One inverse world matrix per placement
    ObjectWorldInverseMatrix,
}

impl OutputPlug {
    /// All outputs in declaration order
    pub const ALL: [Self; 4] = [
        Self::ObjectMatrix,
        Self::ObjectInverseMatrix,
        Self::ObjectWorldMatrix,
        Self::ObjectWorldInverseMatrix,
    ];

    /// Host long name
    pub const fn name(self) -> &'static str {
        match self {
            Self::ObjectMatrix => "objectMatrix",
            Self::ObjectInverseMatrix => "objectInverseMatrix",
            Self::ObjectWorldMatrix => "objectWorldMatrix",
            Self::ObjectWorldInverseMatrix => "objectWorldInverseMatrix",
        }
    }

    /// Host short name
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::ObjectMatrix => "om",
            Self::ObjectInverseMatrix => "oim",
            Self::ObjectWorldMatrix => "owm",
            Self::ObjectWorldInverseMatrix => "owim",
        }
    }

    /// Whether the output holds one element per placement
    pub const fn is_per_instance(self) -> bool {
        matches!(self, Self::ObjectWorldMatrix | Self::ObjectWorldInverseMatrix)
    }
}

impl fmt::Display for OutputPlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputPlug {
    type Err = BoneError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plug| plug.name() == name || plug.short_name() == name)
            .ok_or_else(|| BoneError::UnknownRequest(name.to_string()))
    }
}

/// Value produced by one evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedOutput {
    /// A single matrix
    Matrix(Mat4),
    /// One matrix per placement, in placement order
    MatrixArray(Vec<Mat4>),
}

impl ComputedOutput {
    /// The single matrix, if this is one
    pub const fn as_matrix(&self) -> Option<&Mat4> {
        match self {
            Self::Matrix(matrix) => Some(matrix),
            Self::MatrixArray(_) => None,
        }
    }

    /// The per-placement matrices, if this is an array
    pub fn as_array(&self) -> Option<&[Mat4]> {
        match self {
            Self::Matrix(_) => None,
            Self::MatrixArray(matrices) => Some(matrices),
        }
    }
}
