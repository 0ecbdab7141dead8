//! Self-play harness: a target board that answers shots truthfully and a match
//! loop driving a [`Player`] against it.

use std::collections::BTreeSet;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;

use crate::alignment::Direction;
use crate::common::{BoardError, GuessResult};
use crate::coordinate::{CoordinateOf, CoordinateSystem};
use crate::grid::GuessGrid;
use crate::navigator::CoordinateNavigator;
use crate::player::Player;
use crate::ship::ShipType;

const PLACEMENT_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone)]
struct PlacedShip<S: CoordinateSystem> {
    ship: ShipType,
    cells: Vec<CoordinateOf<S>>,
    hits: usize,
}

impl<S: CoordinateSystem> PlacedShip<S> {
    fn is_sunk(&self) -> bool {
        self.hits == self.cells.len()
    }
}

/// Hidden fleet layout of the opponent.
#[derive(Debug, Clone)]
pub struct TargetBoard<S: CoordinateSystem> {
    navigator: CoordinateNavigator<S>,
    ships: Vec<PlacedShip<S>>,
    guesses: BTreeSet<CoordinateOf<S>>,
}

impl<S: CoordinateSystem> TargetBoard<S> {
    /// Create an empty board (no ships placed).
    pub fn new(system: S) -> Self {
        Self {
            navigator: CoordinateNavigator::new(system),
            ships: Vec::new(),
            guesses: BTreeSet::new(),
        }
    }

    /// Board with the whole fleet placed at random. With `spaced` set no two
    /// ships touch orthogonally.
    pub fn random<R: Rng + ?Sized>(
        system: S,
        fleet: &[ShipType],
        rng: &mut R,
        spaced: bool,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(system);
        let all = board.navigator.all_coordinates();
        if all.is_empty() {
            return Err(BoardError::UnableToPlaceShip);
        }
        for &ship in fleet {
            let mut placed = false;
            for _ in 0..PLACEMENT_ATTEMPTS {
                let head = all[rng.random_range(0..all.len())];
                let direction = if rng.random() {
                    Direction::Horizontal
                } else {
                    Direction::Vertical
                };
                let Ok(cells) = board.cells_for(ship, head, direction) else {
                    continue;
                };
                if spaced && board.touches_fleet(&cells) {
                    continue;
                }
                board.ships.push(PlacedShip {
                    ship,
                    cells,
                    hits: 0,
                });
                placed = true;
                break;
            }
            if !placed {
                return Err(BoardError::UnableToPlaceShip);
            }
        }
        Ok(board)
    }

    /// Place `ship` from `head` onwards along `direction`.
    pub fn place(
        &mut self,
        ship: ShipType,
        head: CoordinateOf<S>,
        direction: Direction,
    ) -> Result<(), BoardError> {
        let cells = self.cells_for(ship, head, direction)?;
        self.ships.push(PlacedShip {
            ship,
            cells,
            hits: 0,
        });
        Ok(())
    }

    /// Answer a shot at `target`.
    pub fn guess(&mut self, target: CoordinateOf<S>) -> Result<GuessResult, BoardError> {
        if !self.is_on_grid(target) {
            return Err(BoardError::OutOfBounds);
        }
        if !self.guesses.insert(target) {
            return Err(BoardError::AlreadyGuessed);
        }
        let Some(index) = self.ships.iter().position(|s| s.cells.contains(&target)) else {
            return Ok(GuessResult::Miss);
        };
        self.ships[index].hits += 1;
        if !self.ships[index].is_sunk() {
            return Ok(GuessResult::Hit);
        }
        debug!("{} sunk at {}", self.ships[index].ship.name(), target);
        if self.all_sunk() {
            Ok(GuessResult::Won)
        } else {
            Ok(GuessResult::Sunk)
        }
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(PlacedShip::is_sunk)
    }

    /// Placed ships with their cells.
    pub fn ships(&self) -> impl Iterator<Item = (ShipType, &[CoordinateOf<S>])> {
        self.ships.iter().map(|s| (s.ship, s.cells.as_slice()))
    }

    pub fn system(&self) -> &S {
        self.navigator.system()
    }

    fn is_on_grid(&self, target: CoordinateOf<S>) -> bool {
        let system = self.navigator.system();
        system.columns().contains(&target.column()) && system.rows().contains(&target.row())
    }

    fn cells_for(
        &self,
        ship: ShipType,
        head: CoordinateOf<S>,
        direction: Direction,
    ) -> Result<Vec<CoordinateOf<S>>, BoardError> {
        if !self.is_on_grid(head) {
            return Err(BoardError::ShipOutOfBounds);
        }
        let mut cells = Vec::with_capacity(ship.length());
        cells.push(head);
        let mut current = head;
        while cells.len() < ship.length() {
            current = self
                .navigator
                .step(current, direction, true)
                .ok_or(BoardError::ShipOutOfBounds)?;
            cells.push(current);
        }
        if self
            .ships
            .iter()
            .any(|s| s.cells.iter().any(|c| cells.contains(c)))
        {
            return Err(BoardError::ShipOverlaps);
        }
        Ok(cells)
    }

    fn touches_fleet(&self, cells: &[CoordinateOf<S>]) -> bool {
        cells.iter().any(|&c| {
            self.navigator
                .surrounding_coordinates(c)
                .iter()
                .any(|n| self.ships.iter().any(|s| s.cells.contains(n)))
        })
    }
}

/// Summary of one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub turns: usize,
    pub won: bool,
    pub hits: usize,
    pub misses: usize,
}

/// Let `player` fire at `board` until the fleet is sunk or `max_turns` shots
/// have been fired.
pub fn play_match<S, P>(
    player: &mut P,
    board: &mut TargetBoard<S>,
    rng: &mut SmallRng,
    max_turns: usize,
) -> anyhow::Result<MatchReport>
where
    S: CoordinateSystem + Clone,
    P: Player<S>,
{
    let mut grid = GuessGrid::new(board.system().clone());
    let mut report = MatchReport {
        turns: 0,
        won: false,
        hits: 0,
        misses: 0,
    };
    while report.turns < max_turns {
        let target = player.select_target(rng, &grid)?;
        let result = board.guess(target)?;
        grid.record(target, result);
        player.handle_guess_result(target, result);
        report.turns += 1;
        if result.is_hit() {
            report.hits += 1;
        } else {
            report.misses += 1;
        }
        if result == GuessResult::Won {
            report.won = true;
            break;
        }
    }
    player.finish()?;
    info!(
        "match over after {} turns ({} hits, {} misses), won: {}",
        report.turns, report.hits, report.misses, report.won
    );
    Ok(report)
}
