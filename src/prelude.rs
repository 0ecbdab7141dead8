//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiHitStrategy, AiPlayer, CoordinateSystem, Direction, EngineError, GridCoordinate,
    GuessGrid, GuessResult, MoveAnalyzer, Player, PreviousMove, RectangularGrid, StrategyConfig,
    SHIPS, STANDARD_GRID,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, play_match, MatchReport, TargetBoard};
