//! What we believe about each ship of the opponent's fleet.
//!
//! Each [`OpponentShip`] moves through `NotFound → UnverifiedSunk → Sunk`,
//! with one way back: an unverified ship can return to `NotFound` when later
//! evidence shows its alignment was mis-sized.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use crate::alignment::CoordinateAlignment;
use crate::common::EngineError;
use crate::coordinate::{AxisKey, Coordinate};
use crate::ship::{ShipSize, ShipType};

/// Deduction state of one opponent ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipStatus<C, R> {
    /// No alignment has been attributed to the ship yet.
    NotFound,
    /// Attributed to an alignment that could still be wrong.
    UnverifiedSunk(CoordinateAlignment<C, R>),
    /// Attributed to an alignment with certainty.
    Sunk(CoordinateAlignment<C, R>),
}

impl<C: AxisKey, R: AxisKey> ShipStatus<C, R> {
    pub fn alignment(&self) -> Option<&CoordinateAlignment<C, R>> {
        match self {
            ShipStatus::NotFound => None,
            ShipStatus::UnverifiedSunk(a) | ShipStatus::Sunk(a) => Some(a),
        }
    }
}

impl<C: AxisKey, R: AxisKey> fmt::Display for ShipStatus<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipStatus::NotFound => f.write_str("NOT_FOUND"),
            ShipStatus::UnverifiedSunk(a) => write!(f, "NON_VERIFIED_SUNK[{}]", a),
            ShipStatus::Sunk(a) => write!(f, "SUNK[{}]", a),
        }
    }
}

/// One ship of the opponent's fleet and what we know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentShip<C, R> {
    ship: ShipType,
    status: ShipStatus<C, R>,
}

impl<C: AxisKey, R: AxisKey> OpponentShip<C, R> {
    pub fn new(ship: ShipType) -> Self {
        Self {
            ship,
            status: ShipStatus::NotFound,
        }
    }

    pub fn ship(&self) -> ShipType {
        self.ship
    }

    pub fn size(&self) -> ShipSize {
        self.ship.size()
    }

    pub fn status(&self) -> &ShipStatus<C, R> {
        &self.status
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.status, ShipStatus::NotFound)
    }

    pub fn is_unverified(&self) -> bool {
        matches!(self.status, ShipStatus::UnverifiedSunk(_))
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self.status, ShipStatus::Sunk(_))
    }

    /// Provisionally attribute `alignment` to this ship.
    pub fn mark_as_unverified_sunk(
        &self,
        alignment: CoordinateAlignment<C, R>,
    ) -> Result<Self, EngineError> {
        self.ensure_open()?;
        self.ensure_fits(&alignment)?;
        Ok(self.with_status(ShipStatus::UnverifiedSunk(alignment)))
    }

    /// Attribute `alignment` to this ship for good.
    pub fn mark_as_sunk(&self, alignment: CoordinateAlignment<C, R>) -> Result<Self, EngineError> {
        self.ensure_open()?;
        self.ensure_fits(&alignment)?;
        Ok(self.with_status(ShipStatus::Sunk(alignment)))
    }

    /// Undo a provisional attribution, handing back the alignment it held.
    /// A ship that is already `NotFound` stays as it is and yields `None`.
    pub fn mark_as_not_found(
        &self,
    ) -> Result<(Self, Option<CoordinateAlignment<C, R>>), EngineError> {
        match &self.status {
            ShipStatus::Sunk(_) => Err(EngineError::ShipAlreadySunk {
                ship: self.ship.name(),
            }),
            ShipStatus::NotFound => Ok((self.clone(), None)),
            ShipStatus::UnverifiedSunk(a) => {
                Ok((self.with_status(ShipStatus::NotFound), Some(a.clone())))
            }
        }
    }

    fn with_status(&self, status: ShipStatus<C, R>) -> Self {
        Self {
            ship: self.ship,
            status,
        }
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.is_sunk() {
            Err(EngineError::ShipAlreadySunk {
                ship: self.ship.name(),
            })
        } else {
            Ok(())
        }
    }

    fn ensure_fits(&self, alignment: &CoordinateAlignment<C, R>) -> Result<(), EngineError> {
        let size = ShipSize::try_from(alignment.len())?;
        if size == self.size() {
            Ok(())
        } else {
            Err(EngineError::InvalidShipSize(alignment.len()))
        }
    }
}

/// Result of attributing a sunk alignment to the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome<C, R> {
    /// A ship took the alignment.
    Marked,
    /// No ship of that size was free: the unverified ship of that size went back
    /// to `NotFound`. Neither alignment is attributed; both must be re-derived.
    Ambiguous {
        alignment: CoordinateAlignment<C, R>,
        backtracked: CoordinateAlignment<C, R>,
    },
}

/// The opponent's fleet as we understand it.
#[derive(Debug, Clone)]
pub struct OpponentFleet<C, R> {
    ships: Vec<OpponentShip<C, R>>,
    min_ship_size: Option<ShipSize>,
    max_ship_size: Option<ShipSize>,
    verified_max_ship_size: Option<ShipSize>,
}

impl<C: AxisKey, R: AxisKey> OpponentFleet<C, R> {
    pub fn new(fleet: &[ShipType]) -> Self {
        let mut opponent = Self {
            ships: fleet.iter().copied().map(OpponentShip::new).collect(),
            min_ship_size: None,
            max_ship_size: None,
            verified_max_ship_size: None,
        };
        opponent.recalculate();
        opponent
    }

    pub fn ships(&self) -> &[OpponentShip<C, R>] {
        &self.ships
    }

    /// Smallest ship not found yet.
    pub fn min_ship_size(&self) -> Option<ShipSize> {
        self.min_ship_size
    }

    /// Largest ship not found yet.
    pub fn max_ship_size(&self) -> Option<ShipSize> {
        self.max_ship_size
    }

    /// Largest ship not confirmed sunk.
    pub fn verified_max_ship_size(&self) -> Option<ShipSize> {
        self.verified_max_ship_size
    }

    /// Largest ship of the whole fleet, whatever its status.
    pub fn largest_ship_size(&self) -> Option<ShipSize> {
        self.ships.iter().map(OpponentShip::size).max()
    }

    pub fn has_not_found(&self, size: ShipSize) -> bool {
        self.ships.iter().any(|s| s.is_not_found() && s.size() == size)
    }

    pub fn has_unverified(&self, size: ShipSize) -> bool {
        self.ships.iter().any(|s| s.is_unverified() && s.size() == size)
    }

    /// Sizes of the ships not found yet, largest first, without repeats.
    pub fn not_found_sizes(&self) -> Vec<ShipSize> {
        let mut sizes: Vec<ShipSize> = self
            .ships
            .iter()
            .filter(|s| s.is_not_found())
            .map(OpponentShip::size)
            .collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();
        sizes
    }

    /// `true` once every ship is attributed, provisionally or not.
    pub fn all_found(&self) -> bool {
        !self.ships.iter().any(OpponentShip::is_not_found)
    }

    pub fn mark_as_unverified_sunk(
        &mut self,
        alignment: CoordinateAlignment<C, R>,
    ) -> Result<MarkOutcome<C, R>, EngineError> {
        self.mark(alignment, false)
    }

    pub fn mark_as_sunk(
        &mut self,
        alignment: CoordinateAlignment<C, R>,
    ) -> Result<MarkOutcome<C, R>, EngineError> {
        self.mark(alignment, true)
    }

    fn mark(
        &mut self,
        alignment: CoordinateAlignment<C, R>,
        certain: bool,
    ) -> Result<MarkOutcome<C, R>, EngineError> {
        let size = ShipSize::try_from(alignment.len())?;
        if let Some(index) = self
            .ships
            .iter()
            .position(|s| s.is_not_found() && s.size() == size)
        {
            let ship = &self.ships[index];
            self.ships[index] = if certain {
                ship.mark_as_sunk(alignment)?
            } else {
                ship.mark_as_unverified_sunk(alignment)?
            };
            self.recalculate();
            return Ok(MarkOutcome::Marked);
        }

        let backtrack = self
            .ships
            .iter()
            .position(|s| s.is_unverified() && s.size() == size);
        match backtrack {
            Some(index) => match self.mark_as_not_found(index)? {
                Some(backtracked) => Ok(MarkOutcome::Ambiguous {
                    alignment,
                    backtracked,
                }),
                None => Err(self.contradiction(&alignment)),
            },
            None => Err(self.contradiction(&alignment)),
        }
    }

    /// Send the ship at `index` back to `NotFound`, returning the alignment it held.
    pub fn mark_as_not_found(
        &mut self,
        index: usize,
    ) -> Result<Option<CoordinateAlignment<C, R>>, EngineError> {
        let (ship, alignment) = self.ships[index].mark_as_not_found()?;
        self.ships[index] = ship;
        self.recalculate();
        Ok(alignment)
    }

    /// Promote the unverified ship at `index` to `Sunk`.
    pub fn confirm_sunk(&mut self, index: usize) -> Result<(), EngineError> {
        let ship = &self.ships[index];
        if let ShipStatus::UnverifiedSunk(alignment) = ship.status() {
            self.ships[index] = ship.mark_as_sunk(alignment.clone())?;
            self.recalculate();
        }
        Ok(())
    }

    /// Index of the unverified ship whose alignment ends right before `coordinate`.
    pub fn find_unverified_by_next_extremum(&self, coordinate: Coordinate<C, R>) -> Option<usize> {
        self.ships.iter().position(|s| match s.status() {
            ShipStatus::UnverifiedSunk(a) => a.is_next_extremum(coordinate),
            _ => false,
        })
    }

    /// Index of the first unverified ship holding any of `coordinates`.
    pub fn find_unverified_holding(&self, coordinates: &[Coordinate<C, R>]) -> Option<usize> {
        self.ships.iter().position(|s| match s.status() {
            ShipStatus::UnverifiedSunk(a) => coordinates.iter().any(|c| a.contains(*c)),
            _ => false,
        })
    }

    /// `true` if a confirmed ship holds exactly this alignment.
    pub fn is_confirmed(&self, alignment: &CoordinateAlignment<C, R>) -> bool {
        self.ships
            .iter()
            .any(|s| matches!(s.status(), ShipStatus::Sunk(a) if a == alignment))
    }

    fn recalculate(&mut self) {
        let not_found: Vec<ShipSize> = self
            .ships
            .iter()
            .filter(|s| s.is_not_found())
            .map(OpponentShip::size)
            .collect();
        self.min_ship_size = not_found.iter().copied().min();
        self.max_ship_size = not_found.iter().copied().max();
        self.verified_max_ship_size = self
            .ships
            .iter()
            .filter(|s| !s.is_sunk())
            .map(OpponentShip::size)
            .max();
    }

    fn contradiction(&self, alignment: &CoordinateAlignment<C, R>) -> EngineError {
        EngineError::Contradiction {
            reason: alloc::format!("no ship of size {} can take {}", alignment.len(), alignment),
            snapshot: self.to_string(),
        }
    }
}

impl<C: AxisKey, R: AxisKey> fmt::Display for OpponentFleet<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ship in &self.ships {
            writeln!(f, "  {} ({}): {}", ship.ship().name(), ship.size(), ship.status())?;
        }
        Ok(())
    }
}
