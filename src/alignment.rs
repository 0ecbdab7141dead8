//! Directional runs of hit coordinates.
//!
//! A [`CoordinateAlignment`] is an immutable value: every operation that
//! changes it returns a new alignment. Gaps and next extremums are computed
//! once, when the alignment is completed against a navigator.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::common::EngineError;
use crate::coordinate::{AxisKey, Coordinate, CoordinateSystem};
use crate::navigator::CoordinateNavigator;
use crate::ship::ShipSize;

/// Axis an alignment runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Same row, columns vary.
    Horizontal,
    /// Same column, rows vary.
    Vertical,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Horizontal => f.write_str("HORIZONTAL"),
            Direction::Vertical => f.write_str("VERTICAL"),
        }
    }
}

/// The cell just beyond one end of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextExtremum<C, R> {
    /// The end touches the border of the grid.
    OffGrid,
    /// Not probed yet; the run may continue here.
    Open(Coordinate<C, R>),
    /// Probed and known not to extend this run.
    Removed(Coordinate<C, R>),
}

impl<C: AxisKey, R: AxisKey> NextExtremum<C, R> {
    /// The coordinate while it is still a candidate target.
    pub fn open(&self) -> Option<Coordinate<C, R>> {
        match self {
            NextExtremum::Open(c) => Some(*c),
            _ => None,
        }
    }

    fn from_step(step: Option<Coordinate<C, R>>) -> Self {
        step.map_or(NextExtremum::OffGrid, NextExtremum::Open)
    }
}

/// Alignment over the coordinates of a coordinate system.
pub type AlignmentOf<S> =
    CoordinateAlignment<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;

/// A run of at least two coordinates sharing one axis, possibly with gaps.
#[derive(Debug, Clone)]
pub struct CoordinateAlignment<C, R> {
    direction: Direction,
    coordinates: Vec<Coordinate<C, R>>,
    gaps: Vec<Coordinate<C, R>>,
    next_head: NextExtremum<C, R>,
    next_tail: NextExtremum<C, R>,
}

impl<C: AxisKey, R: AxisKey> CoordinateAlignment<C, R> {
    /// Build an alignment from raw coordinates: sort them, check they share the
    /// fixed axis of `direction`, then compute the gaps inside the span and the
    /// next extremum on each side.
    pub fn complete<S>(
        direction: Direction,
        coordinates: &[Coordinate<C, R>],
        navigator: &CoordinateNavigator<S>,
    ) -> Result<Self, EngineError>
    where
        S: CoordinateSystem<Column = C, Row = R>,
    {
        let mut sorted = coordinates.to_vec();
        navigator.sort_coordinates(&mut sorted);
        if sorted.len() < 2 {
            return Err(EngineError::AtomicAlignment {
                alignment: render(direction, &sorted),
            });
        }
        let head = sorted[0];
        if let Some(stray) = sorted.iter().find(|c| !shares_axis(direction, &head, c)) {
            return Err(EngineError::NonAlignedCoordinates {
                first: head.to_string(),
                second: stray.to_string(),
            });
        }
        let tail = sorted[sorted.len() - 1];

        let mut gaps = Vec::new();
        let mut current = head;
        for _ in 0..navigator.axis_len(direction) {
            match navigator.step(current, direction, true) {
                Some(next) if next != tail => {
                    if sorted.binary_search(&next).is_err() {
                        gaps.push(next);
                    }
                    current = next;
                }
                _ => break,
            }
        }

        Ok(Self {
            direction,
            next_head: NextExtremum::from_step(navigator.step(head, direction, false)),
            next_tail: NextExtremum::from_step(navigator.step(tail, direction, true)),
            coordinates: sorted,
            gaps,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Coordinates in canonical order, head first.
    pub fn coordinates(&self) -> &[Coordinate<C, R>] {
        &self.coordinates
    }

    pub fn gaps(&self) -> &[Coordinate<C, R>] {
        &self.gaps
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Always `false`: an alignment holds at least two coordinates.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn head(&self) -> Coordinate<C, R> {
        self.coordinates[0]
    }

    pub fn tail(&self) -> Coordinate<C, R> {
        self.coordinates[self.coordinates.len() - 1]
    }

    pub fn next_head(&self) -> &NextExtremum<C, R> {
        &self.next_head
    }

    pub fn next_tail(&self) -> &NextExtremum<C, R> {
        &self.next_tail
    }

    pub fn contains(&self, coordinate: Coordinate<C, R>) -> bool {
        self.coordinates.binary_search(&coordinate).is_ok()
    }

    /// Open next extremums, head side first.
    pub fn open_extremums(&self) -> Vec<Coordinate<C, R>> {
        [self.next_head.open(), self.next_tail.open()]
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn is_next_extremum(&self, coordinate: Coordinate<C, R>) -> bool {
        self.next_head.open() == Some(coordinate) || self.next_tail.open() == Some(coordinate)
    }

    pub fn has_no_gap(&self) -> bool {
        self.gaps.is_empty()
    }

    /// A gap-free run whose length is a ship size could be a whole ship.
    pub fn is_candidate_ship(&self) -> bool {
        self.has_no_gap() && ShipSize::is_valid(self.len())
    }

    /// Drop the head coordinate.
    pub fn shift<S>(&self, navigator: &CoordinateNavigator<S>) -> Result<Self, EngineError>
    where
        S: CoordinateSystem<Column = C, Row = R>,
    {
        self.ensure_shrinkable()?;
        let mut shrunk = Self::complete(self.direction, &self.coordinates[1..], navigator)?;
        shrunk.next_tail = self.next_tail;
        Ok(shrunk)
    }

    /// Drop the tail coordinate.
    pub fn pop<S>(&self, navigator: &CoordinateNavigator<S>) -> Result<Self, EngineError>
    where
        S: CoordinateSystem<Column = C, Row = R>,
    {
        self.ensure_shrinkable()?;
        let end = self.coordinates.len() - 1;
        let mut shrunk = Self::complete(self.direction, &self.coordinates[..end], navigator)?;
        shrunk.next_head = self.next_head;
        Ok(shrunk)
    }

    fn ensure_shrinkable(&self) -> Result<(), EngineError> {
        if self.coordinates.len() <= 2 {
            Err(EngineError::AtomicAlignment {
                alignment: self.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Mark the side whose open next extremum is `extremum` as probed.
    pub fn remove_next_extremum(&self, extremum: Coordinate<C, R>) -> Result<Self, EngineError> {
        let mut updated = self.clone();
        if self.next_head.open() == Some(extremum) {
            updated.next_head = NextExtremum::Removed(extremum);
        } else if self.next_tail.open() == Some(extremum) {
            updated.next_tail = NextExtremum::Removed(extremum);
        } else {
            return Err(EngineError::InvalidExtremum {
                alignment: self.to_string(),
                extremum: extremum.to_string(),
            });
        }
        Ok(updated)
    }

    /// Shrink to `len` coordinates while keeping `anchor`. Coordinates are
    /// dropped from the head first, as long as the head is not the anchor.
    pub fn shrink_around<S>(
        &self,
        anchor: Coordinate<C, R>,
        len: usize,
        navigator: &CoordinateNavigator<S>,
    ) -> Result<Self, EngineError>
    where
        S: CoordinateSystem<Column = C, Row = R>,
    {
        let mut current = self.clone();
        while current.len() > len {
            current = if current.head() != anchor {
                current.shift(navigator)?
            } else {
                current.pop(navigator)?
            };
        }
        Ok(current)
    }

    /// Longest gap-free stretch containing `anchor`, or `None` when the anchor
    /// has no aligned neighbour in this alignment.
    pub fn segment_around<S>(
        &self,
        anchor: Coordinate<C, R>,
        navigator: &CoordinateNavigator<S>,
    ) -> Result<Option<Self>, EngineError>
    where
        S: CoordinateSystem<Column = C, Row = R>,
    {
        let Ok(index) = self.coordinates.binary_search(&anchor) else {
            return Ok(None);
        };
        let adjacent = |a: Coordinate<C, R>, b: Coordinate<C, R>| {
            navigator.step(a, self.direction, true) == Some(b)
        };
        let mut start = index;
        while start > 0 && adjacent(self.coordinates[start - 1], self.coordinates[start]) {
            start -= 1;
        }
        let mut end = index;
        while end + 1 < self.coordinates.len()
            && adjacent(self.coordinates[end], self.coordinates[end + 1])
        {
            end += 1;
        }
        if end == start {
            return Ok(None);
        }
        let mut segment = self.clone();
        for _ in 0..start {
            segment = segment.shift(navigator)?;
        }
        for _ in end + 1..self.coordinates.len() {
            segment = segment.pop(navigator)?;
        }
        Ok(Some(segment))
    }

    /// Every neighbour of the run that lies outside it.
    pub fn outline<S>(&self, navigator: &CoordinateNavigator<S>) -> Vec<Coordinate<C, R>>
    where
        S: CoordinateSystem<Column = C, Row = R>,
    {
        let mut outline: Vec<Coordinate<C, R>> = self
            .coordinates
            .iter()
            .flat_map(|c| navigator.surrounding_coordinates(*c))
            .filter(|c| !self.contains(*c))
            .collect();
        navigator.sort_coordinates(&mut outline);
        outline
    }
}

fn shares_axis<C: AxisKey, R: AxisKey>(
    direction: Direction,
    a: &Coordinate<C, R>,
    b: &Coordinate<C, R>,
) -> bool {
    match direction {
        Direction::Horizontal => a.row() == b.row(),
        Direction::Vertical => a.column() == b.column(),
    }
}

fn render<C: AxisKey, R: AxisKey>(direction: Direction, coordinates: &[Coordinate<C, R>]) -> String {
    use core::fmt::Write;

    let mut out = String::new();
    let _ = write!(out, "{},(", direction);
    for (i, c) in coordinates.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", c);
    }
    out.push(')');
    out
}

impl<C: AxisKey, R: AxisKey> fmt::Display for CoordinateAlignment<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.direction, &self.coordinates))
    }
}

impl<C: PartialEq, R: PartialEq> PartialEq for CoordinateAlignment<C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction && self.coordinates == other.coordinates
    }
}

impl<C: Eq, R: Eq> Eq for CoordinateAlignment<C, R> {}

impl<C: Hash, R: Hash> Hash for CoordinateAlignment<C, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.direction.hash(state);
        self.coordinates.hash(state);
    }
}
