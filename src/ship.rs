//! Ship definitions: the closed set of sizes and the named ship types of a fleet.

use core::fmt;

use crate::common::EngineError;

/// Length of a ship. Only these four lengths exist in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipSize {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl ShipSize {
    /// Every size, smallest first.
    pub const ALL: [ShipSize; 4] = [ShipSize::Two, ShipSize::Three, ShipSize::Four, ShipSize::Five];

    /// Smallest possible ship.
    pub const MIN: ShipSize = ShipSize::Two;

    /// Number of cells covered by a ship of this size.
    pub const fn len(self) -> usize {
        self as usize
    }

    /// Returns `true` if `len` is one of the allowed ship lengths.
    pub fn is_valid(len: usize) -> bool {
        Self::try_from(len).is_ok()
    }
}

impl TryFrom<usize> for ShipSize {
    type Error = EngineError;

    fn try_from(len: usize) -> Result<Self, Self::Error> {
        match len {
            2 => Ok(ShipSize::Two),
            3 => Ok(ShipSize::Three),
            4 => Ok(ShipSize::Four),
            5 => Ok(ShipSize::Five),
            other => Err(EngineError::InvalidShipSize(other)),
        }
    }
}

impl fmt::Display for ShipSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.len())
    }
}

/// Type of ship: name and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipType {
    name: &'static str,
    size: ShipSize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, size: ShipSize) -> Self {
        Self { name, size }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's size.
    pub fn size(&self) -> ShipSize {
        self.size
    }

    /// Ship's length in cells.
    pub const fn length(&self) -> usize {
        self.size.len()
    }
}
