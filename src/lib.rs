#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod alignment;
mod analyzer;
mod common;
mod config;
mod coordinate;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod moves;
mod navigator;
mod opponent;
mod player;
pub mod prelude;
mod ship;
#[cfg(feature = "std")]
pub mod simulation;
mod strategy;

pub use alignment::*;
pub use analyzer::*;
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use moves::*;
pub use navigator::*;
pub use opponent::*;
pub use player::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use simulation::{play_match, MatchReport, TargetBoard};
pub use strategy::*;
