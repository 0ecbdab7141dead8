use crate::coordinate::RectangularGrid;
use crate::ship::{ShipSize, ShipType};

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", ShipSize::Five),
    ShipType::new("Battleship", ShipSize::Four),
    ShipType::new("Cruiser", ShipSize::Three),
    ShipType::new("Submarine", ShipSize::Three),
    ShipType::new("Destroyer", ShipSize::Two),
];

/// The classic 10×10 grid, columns `A..J`, rows `1..10`.
pub const STANDARD_GRID: RectangularGrid = RectangularGrid::square(BOARD_SIZE);

/// Total number of ship cells in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&SHIPS);

/// Number of cells covered by `fleet`.
pub const fn fleet_cells(fleet: &[ShipType]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i].length();
        i += 1;
    }
    total
}

/// Switches of the move analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Attribute sunk runs to ships of the fleet. When off, sunk runs are only
    /// retired from the active hits and fleet sizes are never narrowed.
    pub track_ship_sizes: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            track_ship_sizes: true,
        }
    }
}

/// Switches of the hit strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyConfig {
    /// Offer the screening pattern as a candidate set above the unfiltered
    /// universe.
    pub screening: bool,
    pub analyzer: AnalyzerOptions,
}
