//! Geometry over a [`CoordinateSystem`]: neighbours, distances, alignment
//! discovery and the screening pattern.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::alignment::{AlignmentOf, CoordinateAlignment, Direction};
use crate::common::EngineError;
use crate::coordinate::{Coordinate, CoordinateOf, CoordinateSystem};
use crate::ship::ShipSize;

/// Walks a coordinate system through its adjacency functions only.
#[derive(Debug, Clone)]
pub struct CoordinateNavigator<S> {
    system: S,
}

impl<S: CoordinateSystem> CoordinateNavigator<S> {
    pub fn new(system: S) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// Every coordinate of the grid in canonical order.
    pub fn all_coordinates(&self) -> Vec<CoordinateOf<S>> {
        let rows = self.system.rows();
        self.system
            .columns()
            .into_iter()
            .flat_map(|column| rows.iter().map(move |&row| Coordinate::new(column, row)))
            .collect()
    }

    /// One step from `from` along `direction`, forwards or backwards.
    pub fn step(
        &self,
        from: CoordinateOf<S>,
        direction: Direction,
        forward: bool,
    ) -> Option<CoordinateOf<S>> {
        match (direction, forward) {
            (Direction::Horizontal, true) => self
                .system
                .next_column(from.column())
                .map(|c| Coordinate::new(c, from.row())),
            (Direction::Horizontal, false) => self
                .system
                .previous_column(from.column())
                .map(|c| Coordinate::new(c, from.row())),
            (Direction::Vertical, true) => self
                .system
                .next_row(from.row())
                .map(|r| Coordinate::new(from.column(), r)),
            (Direction::Vertical, false) => self
                .system
                .previous_row(from.row())
                .map(|r| Coordinate::new(from.column(), r)),
        }
    }

    /// The up to four coordinates one step away: up, right, down, left.
    pub fn surrounding_coordinates(&self, target: CoordinateOf<S>) -> Vec<CoordinateOf<S>> {
        [
            self.step(target, Direction::Vertical, false),
            self.step(target, Direction::Horizontal, true),
            self.step(target, Direction::Vertical, true),
            self.step(target, Direction::Horizontal, false),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Direction joining two coordinates that share exactly one axis.
    pub fn direction_between(
        &self,
        a: CoordinateOf<S>,
        b: CoordinateOf<S>,
    ) -> Option<Direction> {
        match (a.row() == b.row(), a.column() == b.column()) {
            (true, false) => Some(Direction::Horizontal),
            (false, true) => Some(Direction::Vertical),
            _ => None,
        }
    }

    /// Number of steps between two aligned coordinates, `None` when one cannot
    /// be reached from the other.
    pub fn calculate_distance(
        &self,
        a: CoordinateOf<S>,
        b: CoordinateOf<S>,
    ) -> Result<Option<usize>, EngineError> {
        let direction = self
            .direction_between(a, b)
            .ok_or_else(|| EngineError::NonAlignedCoordinates {
                first: a.to_string(),
                second: b.to_string(),
            })?;
        let forward = self.walk(a, b, direction, true);
        let backward = self.walk(a, b, direction, false);
        Ok(match (forward, backward) {
            (Some(ahead), Some(behind)) => Some(ahead.min(behind)),
            (ahead, behind) => ahead.or(behind),
        })
    }

    fn walk(
        &self,
        from: CoordinateOf<S>,
        to: CoordinateOf<S>,
        direction: Direction,
        forward: bool,
    ) -> Option<usize> {
        let limit = self.axis_len(direction);
        let mut current = from;
        for hops in 1..=limit {
            current = self.step(current, direction, forward)?;
            if current == to {
                return Some(hops);
            }
        }
        None
    }

    /// Number of keys on the axis a `direction` walks along.
    pub fn axis_len(&self, direction: Direction) -> usize {
        match direction {
            Direction::Horizontal => self.system.columns().len(),
            Direction::Vertical => self.system.rows().len(),
        }
    }

    /// Group `coordinates` into alignments whose members lie at most
    /// `max_distance` steps from the coordinate that opened the group.
    ///
    /// Groups are opened by each coordinate in input order and collect the
    /// coordinates after it. Single-coordinate groups and groups contained in
    /// an earlier alignment are dropped.
    pub fn find_alignments(
        &self,
        coordinates: &[CoordinateOf<S>],
        max_distance: usize,
    ) -> Result<Vec<AlignmentOf<S>>, EngineError> {
        let mut alignments: Vec<AlignmentOf<S>> = Vec::new();
        for (index, &reference) in coordinates.iter().enumerate() {
            let mut horizontal = alloc::vec![reference];
            let mut vertical = alloc::vec![reference];
            for &candidate in &coordinates[index + 1..] {
                let Some(direction) = self.direction_between(reference, candidate) else {
                    continue;
                };
                match self.calculate_distance(reference, candidate)? {
                    Some(distance) if distance <= max_distance => match direction {
                        Direction::Horizontal => horizontal.push(candidate),
                        Direction::Vertical => vertical.push(candidate),
                    },
                    _ => {}
                }
            }
            for (direction, group) in [
                (Direction::Horizontal, horizontal),
                (Direction::Vertical, vertical),
            ] {
                if group.len() < 2 {
                    continue;
                }
                let alignment = CoordinateAlignment::complete(direction, &group, self)?;
                let redundant = alignments
                    .iter()
                    .any(|known| alignment.coordinates().iter().all(|c| known.contains(*c)));
                if !redundant {
                    alignments.push(alignment);
                }
            }
        }
        Ok(alignments)
    }

    /// Diagonal covering pattern: no straight run of `min_size` cells avoids it.
    pub fn traverse_grid(&self, min_size: ShipSize) -> Vec<CoordinateOf<S>> {
        let step = min_size.len();
        let rows = self.system.rows();
        let mut pattern = Vec::new();
        for (ci, column) in self.system.columns().into_iter().enumerate() {
            for (ri, &row) in rows.iter().enumerate() {
                if (ci + ri) % step == 0 {
                    pattern.push(Coordinate::new(column, row));
                }
            }
        }
        pattern
    }

    /// Canonical total order over coordinates.
    pub fn create_coordinates_sorter(
        &self,
    ) -> impl Fn(&CoordinateOf<S>, &CoordinateOf<S>) -> Ordering {
        |a: &CoordinateOf<S>, b: &CoordinateOf<S>| a.cmp(b)
    }

    /// Sort in canonical order, removing duplicates.
    pub fn sort_coordinates(&self, coordinates: &mut Vec<CoordinateOf<S>>) {
        coordinates.sort_by(self.create_coordinates_sorter());
        coordinates.dedup();
    }
}
