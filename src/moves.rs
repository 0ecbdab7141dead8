//! Ledger of the shots fired at the opponent during one match.

use alloc::vec::Vec;

use crate::common::GuessResult;
use crate::coordinate::{AxisKey, Coordinate};

/// One shot and the opponent's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviousMove<C, R> {
    pub target: Coordinate<C, R>,
    pub result: GuessResult,
}

impl<C: AxisKey, R: AxisKey> PreviousMove<C, R> {
    pub fn new(target: Coordinate<C, R>, result: GuessResult) -> Self {
        Self { target, result }
    }
}

/// Append-only history of shots.
#[derive(Debug, Clone)]
pub struct PreviousMoves<C, R> {
    moves: Vec<PreviousMove<C, R>>,
}

impl<C: AxisKey, R: AxisKey> Default for PreviousMoves<C, R> {
    fn default() -> Self {
        Self { moves: Vec::new() }
    }
}

impl<C: AxisKey, R: AxisKey> PreviousMoves<C, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: PreviousMove<C, R>) {
        self.moves.push(mv);
    }

    pub fn moves(&self) -> &[PreviousMove<C, R>] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<&PreviousMove<C, R>> {
        self.moves.last()
    }

    /// Every coordinate already fired at.
    pub fn known_coordinates(&self) -> Vec<Coordinate<C, R>> {
        self.moves.iter().map(|m| m.target).collect()
    }

    /// Coordinates that struck a ship, sinking shots included.
    pub fn hit_coordinates(&self) -> Vec<Coordinate<C, R>> {
        self.targets_where(GuessResult::is_hit)
    }

    /// Coordinates whose shot sank a ship.
    pub fn sunk_coordinates(&self) -> Vec<Coordinate<C, R>> {
        self.targets_where(GuessResult::is_sunk)
    }

    pub fn miss_coordinates(&self) -> Vec<Coordinate<C, R>> {
        self.targets_where(|r| r == GuessResult::Miss)
    }

    pub fn contains(&self, coordinate: Coordinate<C, R>) -> bool {
        self.moves.iter().any(|m| m.target == coordinate)
    }

    pub fn is_miss(&self, coordinate: Coordinate<C, R>) -> bool {
        self.moves
            .iter()
            .any(|m| m.target == coordinate && m.result == GuessResult::Miss)
    }

    fn targets_where(&self, keep: impl Fn(GuessResult) -> bool) -> Vec<Coordinate<C, R>> {
        self.moves
            .iter()
            .filter(|m| keep(m.result))
            .map(|m| m.target)
            .collect()
    }
}
