//! Coordinates and the coordinate systems they live in.
//!
//! The engine never assumes a concrete grid shape. A [`CoordinateSystem`]
//! exposes both axes as ordered lists of opaque keys together with their
//! previous/next adjacency functions; everything else is derived from those.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

/// Bounds required from a column or row key.
///
/// The `Ord` implementation must agree with the adjacency functions of the
/// coordinate system: `next_*(k)` is always greater than `k`.
pub trait AxisKey: Copy + Ord + Hash + fmt::Debug + fmt::Display {}

impl<T> AxisKey for T where T: Copy + Ord + Hash + fmt::Debug + fmt::Display {}

/// A cell of the grid, identified by its column and row keys.
///
/// Ordering is column-major, then row; this is the canonical order used to
/// make candidate selection reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate<C, R> {
    column: C,
    row: R,
}

impl<C: AxisKey, R: AxisKey> Coordinate<C, R> {
    pub const fn new(column: C, row: R) -> Self {
        Self { column, row }
    }

    pub fn column(&self) -> C {
        self.column
    }

    pub fn row(&self) -> R {
        self.row
    }
}

impl<C: fmt::Display, R: fmt::Display> fmt::Display for Coordinate<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Per-axis ordering and adjacency of a grid, supplied by the caller.
pub trait CoordinateSystem {
    type Column: AxisKey;
    type Row: AxisKey;

    /// Every column, in axis order.
    fn columns(&self) -> Vec<Self::Column>;
    /// Every row, in axis order.
    fn rows(&self) -> Vec<Self::Row>;

    fn previous_column(&self, column: Self::Column) -> Option<Self::Column>;
    fn next_column(&self, column: Self::Column) -> Option<Self::Column>;
    fn previous_row(&self, row: Self::Row) -> Option<Self::Row>;
    fn next_row(&self, row: Self::Row) -> Option<Self::Row>;
}

/// Coordinate type of a coordinate system.
pub type CoordinateOf<S> =
    Coordinate<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;

/// Classic lettered grid: columns `A..`, rows numbered from `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangularGrid {
    columns: u8,
    rows: u8,
}

impl RectangularGrid {
    /// Largest supported width, one column per letter.
    pub const MAX_COLUMNS: u8 = 26;

    /// Create a grid of `columns` × `rows` cells. Returns `None` for an empty
    /// grid or one wider than the alphabet.
    pub fn new(columns: u8, rows: u8) -> Option<Self> {
        if columns == 0 || rows == 0 || columns > Self::MAX_COLUMNS {
            None
        } else {
            Some(Self { columns, rows })
        }
    }

    /// Square grid of `size` × `size` cells; `size` is clamped to `1..=26`.
    pub const fn square(size: u8) -> Self {
        let size = if size == 0 {
            1
        } else if size > Self::MAX_COLUMNS {
            Self::MAX_COLUMNS
        } else {
            size
        };
        Self {
            columns: size,
            rows: size,
        }
    }

    pub fn column_count(&self) -> u8 {
        self.columns
    }

    pub fn row_count(&self) -> u8 {
        self.rows
    }

    fn last_column(&self) -> char {
        (b'A' + self.columns - 1) as char
    }
}

impl CoordinateSystem for RectangularGrid {
    type Column = char;
    type Row = u8;

    fn columns(&self) -> Vec<char> {
        (0..self.columns).map(|i| (b'A' + i) as char).collect()
    }

    fn rows(&self) -> Vec<u8> {
        (1..=self.rows).collect()
    }

    fn previous_column(&self, column: char) -> Option<char> {
        if column > 'A' && column <= self.last_column() {
            Some((column as u8 - 1) as char)
        } else {
            None
        }
    }

    fn next_column(&self, column: char) -> Option<char> {
        if column >= 'A' && column < self.last_column() {
            Some((column as u8 + 1) as char)
        } else {
            None
        }
    }

    fn previous_row(&self, row: u8) -> Option<u8> {
        if row > 1 && row <= self.rows {
            Some(row - 1)
        } else {
            None
        }
    }

    fn next_row(&self, row: u8) -> Option<u8> {
        if row >= 1 && row < self.rows {
            Some(row + 1)
        } else {
            None
        }
    }
}

/// Coordinate on a [`RectangularGrid`].
pub type GridCoordinate = Coordinate<char, u8>;
