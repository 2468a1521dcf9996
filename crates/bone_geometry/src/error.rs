//! Errors surfaced to the host

use thiserror::Error;

/// Requests the bone node does not recognise
///
/// None of these are fatal. The host treats them as "not handled" and falls
/// back to its default behaviour.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoneError {
    /// Evaluation of an output the node does not produce
    #[error("Unknown evaluation request: {0}")]
    UnknownRequest(String),

    /// Attribute name outside the bone's attribute set
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Display-state lookup for a placement that does not exist
    #[error("Invalid placement path: {0}")]
    InvalidPlacement(String),
}
