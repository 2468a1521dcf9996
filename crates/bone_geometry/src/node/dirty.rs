//! Dirty-input tracking for the redraw decision

use crate::attributes::{Attribute, SizeField};

bitflags::bitflags! {
    /// Inputs the host reports as changed before an evaluation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirtyInputs: u32 {
        /// Cross-section width
        const WIDTH = 1 << 0;
        /// Cross-section height
        const HEIGHT = 1 << 1;
        /// Requested length
        const LENGTH = 1 << 2;
        /// Distal taper
        const TAPER = 1 << 3;
        /// Local position
        const POSITION = 1 << 4;
        /// Local rotation
        const ROTATION = 1 << 5;
        /// Local scale
        const SCALE = 1 << 6;
        /// Side fin group
        const SIDE_FINS = 1 << 7;
        /// Front fin group
        const FRONT_FIN = 1 << 8;
        /// Back fin group
        const BACK_FIN = 1 << 9;

        /// Inputs whose change invalidates the drawn geometry
        const REDRAW = Self::WIDTH.bits()
            | Self::HEIGHT.bits()
            | Self::LENGTH.bits()
            | Self::POSITION.bits()
            | Self::ROTATION.bits()
            | Self::SCALE.bits();
    }
}

impl DirtyInputs {
    /// Whether any of these inputs requires the geometry to be redrawn
    pub const fn requires_redraw(self) -> bool {
        self.intersects(Self::REDRAW)
    }
}

impl From<Attribute> for DirtyInputs {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Position(_) => Self::POSITION,
            Attribute::Rotation(_) => Self::ROTATION,
            Attribute::Scale(_) => Self::SCALE,
            Attribute::Size(SizeField::Width) => Self::WIDTH,
            Attribute::Size(SizeField::Height) => Self::HEIGHT,
            Attribute::Size(SizeField::Length) => Self::LENGTH,
            Attribute::Size(SizeField::Taper) => Self::TAPER,
            Attribute::SideFins(_) => Self::SIDE_FINS,
            Attribute::FrontFin(_) => Self::FRONT_FIN,
            Attribute::BackFin(_) => Self::BACK_FIN,
        }
    }
}

impl FromIterator<Attribute> for DirtyInputs {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |dirty, attribute| dirty | Self::from(attribute))
    }
}
