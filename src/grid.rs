//! Read-only view of the opponent's grid as seen by the shooter.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use crate::common::GuessResult;
use crate::coordinate::{AxisKey, Coordinate, CoordinateOf, CoordinateSystem};
use crate::navigator::CoordinateNavigator;

/// What the shooter knows about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    Untouched,
    Missed,
    Hit,
}

/// Grid collaborator the strategy reads its candidate universe from.
pub trait OpponentGrid<C: AxisKey, R: AxisKey> {
    /// Status of every cell of the grid.
    fn cell_statuses(&self) -> Vec<(Coordinate<C, R>, CellStatus)>;

    /// Cells never fired at.
    fn untouched_coordinates(&self) -> BTreeSet<Coordinate<C, R>> {
        self.cell_statuses()
            .into_iter()
            .filter(|(_, status)| *status == CellStatus::Untouched)
            .map(|(c, _)| c)
            .collect()
    }
}

/// Shot record over a coordinate system, one status per cell.
#[derive(Debug, Clone)]
pub struct GuessGrid<S: CoordinateSystem> {
    navigator: CoordinateNavigator<S>,
    cells: BTreeMap<CoordinateOf<S>, CellStatus>,
}

impl<S: CoordinateSystem> GuessGrid<S> {
    pub fn new(system: S) -> Self {
        let navigator = CoordinateNavigator::new(system);
        let cells = navigator
            .all_coordinates()
            .into_iter()
            .map(|c| (c, CellStatus::Untouched))
            .collect();
        Self { navigator, cells }
    }

    /// Store the answer to a shot. Returns `false` if the cell is off the grid
    /// or was already fired at.
    pub fn record(&mut self, target: CoordinateOf<S>, result: GuessResult) -> bool {
        match self.cells.get_mut(&target) {
            Some(status @ CellStatus::Untouched) => {
                *status = if result.is_hit() {
                    CellStatus::Hit
                } else {
                    CellStatus::Missed
                };
                true
            }
            _ => false,
        }
    }

    pub fn status(&self, coordinate: CoordinateOf<S>) -> Option<CellStatus> {
        self.cells.get(&coordinate).copied()
    }

    pub fn system(&self) -> &S {
        self.navigator.system()
    }
}

impl<S: CoordinateSystem> OpponentGrid<S::Column, S::Row> for GuessGrid<S> {
    fn cell_statuses(&self) -> Vec<(CoordinateOf<S>, CellStatus)> {
        self.cells.iter().map(|(c, s)| (*c, *s)).collect()
    }
}

impl<S: CoordinateSystem> fmt::Display for GuessGrid<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let system = self.navigator.system();
        let columns = system.columns();
        write!(f, "   ")?;
        for column in &columns {
            write!(f, " {}", column)?;
        }
        writeln!(f)?;
        for row in system.rows() {
            write!(f, "{:>3}", row)?;
            for &column in &columns {
                let symbol = match self.status(Coordinate::new(column, row)) {
                    Some(CellStatus::Hit) => 'x',
                    Some(CellStatus::Missed) => 'o',
                    _ => '.',
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
