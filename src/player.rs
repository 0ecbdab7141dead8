use crate::{
    common::{EngineError, GuessResult},
    config::StrategyConfig,
    coordinate::{CoordinateOf, CoordinateSystem},
    grid::GuessGrid,
    moves::PreviousMove,
    ship::ShipType,
    strategy::AiHitStrategy,
};
use rand::rngs::SmallRng;

/// Interface implemented by anything that fires at an opponent grid.
pub trait Player<S: CoordinateSystem> {
    /// Choose the next target given what is known of the opponent grid.
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        grid: &GuessGrid<S>,
    ) -> Result<CoordinateOf<S>, EngineError>;

    /// Inform the player of the result of its last guess.
    fn handle_guess_result(&mut self, _coord: CoordinateOf<S>, _result: GuessResult) {}

    /// Called once the match is over.
    fn finish(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// AI player backed by the deductive hit strategy.
///
/// The answer to a shot is only fed to the analyzer on the next call to
/// [`Player::select_target`], or by [`Player::finish`] once the match is over.
#[derive(Debug, Clone)]
pub struct AiPlayer<S: CoordinateSystem> {
    strategy: AiHitStrategy<S>,
    pending: Option<PreviousMove<S::Column, S::Row>>,
}

impl<S: CoordinateSystem> AiPlayer<S> {
    pub fn new(system: S, fleet: &[ShipType], config: StrategyConfig) -> Self {
        Self {
            strategy: AiHitStrategy::new(system, fleet, config),
            pending: None,
        }
    }

    pub fn strategy(&self) -> &AiHitStrategy<S> {
        &self.strategy
    }
}

impl<S: CoordinateSystem> Player<S> for AiPlayer<S> {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        grid: &GuessGrid<S>,
    ) -> Result<CoordinateOf<S>, EngineError> {
        self.strategy.decide(grid, self.pending.take(), rng)
    }

    fn handle_guess_result(&mut self, coord: CoordinateOf<S>, result: GuessResult) {
        self.pending = Some(PreviousMove::new(coord, result));
    }

    /// Record the answer to the final shot of the match.
    fn finish(&mut self) -> Result<(), EngineError> {
        self.strategy.record(self.pending.take())
    }
}
