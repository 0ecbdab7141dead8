//! Common types for the targeting engine: shot responses, engine errors and
//! target board errors.

use alloc::string::String;
use core::fmt;

/// Response the opponent gave to one of our shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Shot landed on open water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot sank a ship.
    Sunk,
    /// Shot sank the last ship of the fleet.
    Won,
}

impl GuessResult {
    /// `true` for every response that means a ship cell was struck.
    pub fn is_hit(self) -> bool {
        !matches!(self, GuessResult::Miss)
    }

    /// `true` when the shot finished a ship.
    pub fn is_sunk(self) -> bool {
        matches!(self, GuessResult::Sunk | GuessResult::Won)
    }
}

impl fmt::Display for GuessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GuessResult::Miss => "MISS",
            GuessResult::Hit => "HIT",
            GuessResult::Sunk => "SUNK",
            GuessResult::Won => "WON",
        };
        f.write_str(label)
    }
}

/// Errors raised by the engine.
///
/// Every variant is a broken invariant of the deduction logic, never a user
/// input problem. Coordinates and alignments are rendered to strings so the
/// error stays independent of the coordinate system in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Shrinking an alignment would leave fewer than two coordinates.
    AtomicAlignment { alignment: String },
    /// The coordinate is not an open next extremum of the alignment.
    InvalidExtremum { alignment: String, extremum: String },
    /// Distance or direction requested between coordinates sharing no single axis.
    NonAlignedCoordinates { first: String, second: String },
    /// A length outside the closed set of ship sizes.
    InvalidShipSize(usize),
    /// Transition attempted on a ship already confirmed sunk.
    ShipAlreadySunk { ship: &'static str },
    /// The move history cannot be reconciled with the fleet.
    Contradiction { reason: String, snapshot: String },
    /// No candidate coordinate survived, not even the unfiltered universe.
    InvalidAiStrategy { snapshot: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::AtomicAlignment { alignment } => {
                write!(f, "Alignment {} cannot shrink below two coordinates", alignment)
            }
            EngineError::InvalidExtremum { alignment, extremum } => write!(
                f,
                "{} is not an open next extremum of alignment {}",
                extremum, alignment
            ),
            EngineError::NonAlignedCoordinates { first, second } => {
                write!(f, "Coordinates {} and {} are not aligned", first, second)
            }
            EngineError::InvalidShipSize(size) => write!(f, "{} is not a valid ship size", size),
            EngineError::ShipAlreadySunk { ship } => {
                write!(f, "Ship {} is already sunk and cannot change status", ship)
            }
            EngineError::Contradiction { reason, snapshot } => {
                write!(f, "Unresolved contradiction: {}\n{}", reason, snapshot)
            }
            EngineError::InvalidAiStrategy { snapshot } => {
                write!(f, "No candidate coordinate found\n{}", snapshot)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Errors returned by target board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Ship placement leaves the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Guess was already made at this position.
    AlreadyGuessed,
    /// Guess targets a cell outside the grid.
    OutOfBounds,
    /// Unable to place ship (random or manual placement failed).
    UnableToPlaceShip,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::AlreadyGuessed => write!(f, "Guess was already made at this position"),
            BoardError::OutOfBounds => write!(f, "Guess is outside the grid"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
