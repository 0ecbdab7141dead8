//! Target selection: weighted candidate sets built from the analyzer's state.
//!
//! Each [`ChoiceStrategy`] names a set of coordinates worth firing at and a
//! weight expressing how much we trust it. Strategies are intersected with the
//! untouched cells of the grid, ranked, and a target is drawn from the winner.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use log::{debug, trace};
use rand::Rng;

use crate::analyzer::MoveAnalyzer;
use crate::common::EngineError;
use crate::config::StrategyConfig;
use crate::coordinate::{AxisKey, Coordinate, CoordinateOf, CoordinateSystem};
use crate::grid::OpponentGrid;
use crate::moves::PreviousMove;
use crate::ship::ShipType;

/// Origin of a candidate set; the order of the variants is their rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChoiceKind {
    /// Every untouched cell.
    NoFilter,
    /// Covering pattern sized to the largest ship not found yet.
    Screening,
    /// Cells next to a single hit.
    Surroundings,
    /// Cells just past either end of an alignment.
    AlignmentExtremums,
    /// Holes inside an alignment.
    AlignmentGaps,
}

impl ChoiceKind {
    pub const fn weight(self) -> u32 {
        match self {
            ChoiceKind::AlignmentGaps => 30,
            ChoiceKind::AlignmentExtremums => 20,
            ChoiceKind::Surroundings => 10,
            ChoiceKind::Screening => 5,
            ChoiceKind::NoFilter => 0,
        }
    }
}

/// A named, weighted filter over the untouched cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceStrategy<C, R> {
    kind: ChoiceKind,
    name: String,
    targets: Vec<Coordinate<C, R>>,
}

impl<C: AxisKey, R: AxisKey> ChoiceStrategy<C, R> {
    pub fn new(kind: ChoiceKind, name: String, targets: Vec<Coordinate<C, R>>) -> Self {
        Self { kind, name, targets }
    }

    pub fn kind(&self) -> ChoiceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> u32 {
        self.kind.weight()
    }

    pub fn targets(&self) -> &[Coordinate<C, R>] {
        &self.targets
    }

    /// Keep the targets that are still untouched, in canonical order.
    pub fn apply(&self, universe: &BTreeSet<Coordinate<C, R>>) -> Choice<C, R> {
        let candidates: BTreeSet<Coordinate<C, R>> = self
            .targets
            .iter()
            .filter(|c| universe.contains(c))
            .copied()
            .collect();
        Choice {
            kind: self.kind,
            strategy: self.name.clone(),
            candidates: candidates.into_iter().collect(),
        }
    }
}

/// Outcome of one filter: the surviving candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<C, R> {
    pub kind: ChoiceKind,
    pub strategy: String,
    pub candidates: Vec<Coordinate<C, R>>,
}

impl<C, R> Choice<C, R> {
    pub fn weight(&self) -> u32 {
        self.kind.weight()
    }
}

/// Non-empty choices, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices<C, R> {
    ranked: Vec<Choice<C, R>>,
}

impl<C, R> Choices<C, R> {
    /// Rank by weight, heaviest first, then by fewest candidates. Empty
    /// choices are dropped; ties keep their input order.
    pub fn rank(mut choices: Vec<Choice<C, R>>) -> Self {
        choices.retain(|c| !c.candidates.is_empty());
        choices.sort_by(|a, b| {
            b.weight()
                .cmp(&a.weight())
                .then(a.candidates.len().cmp(&b.candidates.len()))
        });
        Self { ranked: choices }
    }

    pub fn best(&self) -> Option<&Choice<C, R>> {
        self.ranked.first()
    }

    pub fn ranked(&self) -> &[Choice<C, R>] {
        &self.ranked
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

type Move<S> = PreviousMove<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;
type Strategy<S> = ChoiceStrategy<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;
type ChoicesOf<S> = Choices<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;

/// Picks where to fire next against one opponent.
#[derive(Debug, Clone)]
pub struct AiHitStrategy<S: CoordinateSystem> {
    analyzer: MoveAnalyzer<S>,
    config: StrategyConfig,
}

impl<S: CoordinateSystem> AiHitStrategy<S> {
    pub fn new(system: S, fleet: &[ShipType], config: StrategyConfig) -> Self {
        Self {
            analyzer: MoveAnalyzer::new(system, fleet, config.analyzer),
            config,
        }
    }

    pub fn analyzer(&self) -> &MoveAnalyzer<S> {
        &self.analyzer
    }

    pub fn config(&self) -> StrategyConfig {
        self.config
    }

    /// Feed the answer to our last shot, if any, into the analyzer.
    pub fn record(&mut self, previous: Option<Move<S>>) -> Result<(), EngineError> {
        match previous {
            Some(mv) => self.analyzer.record(mv),
            None => Ok(()),
        }
    }

    /// Every filter the current deductions suggest, unranked.
    pub fn candidate_strategies(&self) -> Vec<Strategy<S>> {
        let navigator = self.analyzer.navigator();
        let mut strategies = Vec::new();

        for alignment in self.analyzer.alignments() {
            if !alignment.has_no_gap() {
                strategies.push(ChoiceStrategy::new(
                    ChoiceKind::AlignmentGaps,
                    alloc::format!("HitAlignedGapsHitTargets<{}>", alignment),
                    alignment.gaps().to_vec(),
                ));
            }
        }
        let moves = self.analyzer.previous_moves();
        for alignment in self.analyzer.alignments() {
            // a missed gap splits the run across ships
            if alignment.gaps().iter().any(|gap| moves.is_miss(*gap)) {
                continue;
            }
            strategies.push(ChoiceStrategy::new(
                ChoiceKind::AlignmentExtremums,
                alloc::format!("HitAlignedExtremumsHitTargets<{}>", alignment),
                alignment.open_extremums(),
            ));
        }
        for &hit in self.analyzer.hits() {
            strategies.push(ChoiceStrategy::new(
                ChoiceKind::Surroundings,
                alloc::format!("HitTargetSurroundings<{}>", hit),
                navigator.surrounding_coordinates(hit),
            ));
        }
        if self.config.screening {
            if let Some(size) = self.analyzer.max_ship_size() {
                strategies.push(ChoiceStrategy::new(
                    ChoiceKind::Screening,
                    alloc::format!("ScreeningTargets<{}>", size),
                    navigator.traverse_grid(size),
                ));
            }
        }
        strategies.push(ChoiceStrategy::new(
            ChoiceKind::NoFilter,
            String::from("NoFilter"),
            navigator.all_coordinates(),
        ));
        strategies
    }

    /// Rank the candidate filters against the grid without changing any state.
    pub fn rank_choices<G>(&self, grid: &G) -> ChoicesOf<S>
    where
        G: OpponentGrid<S::Column, S::Row>,
    {
        let universe = grid.untouched_coordinates();
        let choices = Choices::rank(
            self.candidate_strategies()
                .iter()
                .map(|strategy| strategy.apply(&universe))
                .collect(),
        );
        for choice in choices.ranked() {
            trace!(
                "{} (weight {}): {} candidates",
                choice.strategy,
                choice.weight(),
                choice.candidates.len()
            );
        }
        choices
    }

    /// Record `previous`, then rank the choices it leads to.
    pub fn find_choices<G>(
        &mut self,
        grid: &G,
        previous: Option<Move<S>>,
    ) -> Result<ChoicesOf<S>, EngineError>
    where
        G: OpponentGrid<S::Column, S::Row>,
    {
        self.record(previous)?;
        Ok(self.rank_choices(grid))
    }

    /// Record `previous` and pick the next target uniformly among the
    /// candidates of the best choice.
    pub fn decide<G, Rn>(
        &mut self,
        grid: &G,
        previous: Option<Move<S>>,
        rng: &mut Rn,
    ) -> Result<CoordinateOf<S>, EngineError>
    where
        G: OpponentGrid<S::Column, S::Row>,
        Rn: Rng + ?Sized,
    {
        let choices = self.find_choices(grid, previous)?;
        let Some(best) = choices.best() else {
            return Err(EngineError::InvalidAiStrategy {
                snapshot: self.snapshot(grid, &choices),
            });
        };
        let target = best.candidates[rng.random_range(0..best.candidates.len())];
        debug!("{} -> {}", best.strategy, target);
        Ok(target)
    }

    fn snapshot<G>(&self, grid: &G, choices: &ChoicesOf<S>) -> String
    where
        G: OpponentGrid<S::Column, S::Row>,
    {
        let mut out = String::new();
        let _ = write!(out, "grid:");
        for (coordinate, status) in grid.cell_statuses() {
            let _ = write!(out, " {}={:?}", coordinate, status);
        }
        let _ = write!(out, "\n{}", self.analyzer.snapshot());
        for strategy in self.candidate_strategies() {
            let _ = writeln!(out, "strategy {} ({} targets)", strategy.name(), strategy.targets().len());
        }
        let _ = writeln!(out, "choices: {}", choices.ranked().len());
        out
    }
}
