//! Host display state
//!
//! The host decides how each placement of a node is presented. The draw
//! override only needs two answers per placement, the wire colour and the
//! display status, and asks for them through [`DisplayStateProvider`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoneError;
use crate::foundation::color::Color;

/// Selection-derived display status of one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayStatus {
    /// Selected
    Active,
    /// Last selected
    Lead,
    /// Components of the object are being edited
    ActiveComponent,
    /// Highlighted for component selection
    Hilite,
    /// Templated, drawn but not selectable
    Template,
    /// Not selected
    #[default]
    Dormant,
    /// Hidden
    Invisible,
}

/// Path identifying one placement of a node in the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlacementPath(String);

impl PlacementPath {
    /// Create a path from its host representation
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl fmt::Display for PlacementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlacementPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Host lookups consumed while preparing a draw
///
/// Lookups for a placement that no longer exists return
/// [`BoneError::InvalidPlacement`].
pub trait DisplayStateProvider {
    /// Wire colour of the placement
    fn wire_color(&self, path: &PlacementPath) -> Result<Color, BoneError>;

    /// Display status of the placement
    fn display_status(&self, path: &PlacementPath) -> Result<DisplayStatus, BoneError>;
}
