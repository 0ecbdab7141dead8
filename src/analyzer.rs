//! Reconciles the shot history with the opponent's fleet.
//!
//! The analyzer keeps the set of *active* hits (hits not yet attributed to a
//! ship) and the alignments they form. Sinking shots attribute a run of hits
//! to a ship; when an attribution later proves impossible the affected ship is
//! sent back to `NotFound` and its hits become active again.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use log::{debug, warn};

use crate::alignment::{AlignmentOf, CoordinateAlignment};
use crate::common::{EngineError, GuessResult};
use crate::config::AnalyzerOptions;
use crate::coordinate::{CoordinateOf, CoordinateSystem};
use crate::moves::{PreviousMove, PreviousMoves};
use crate::navigator::CoordinateNavigator;
use crate::opponent::{MarkOutcome, OpponentFleet, ShipStatus};
use crate::ship::{ShipSize, ShipType};

type Fleet<S> = OpponentFleet<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;
type Moves<S> = PreviousMoves<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;
type Move<S> = PreviousMove<<S as CoordinateSystem>::Column, <S as CoordinateSystem>::Row>;

/// Deduced state of one opponent grid for the length of a match.
#[derive(Debug, Clone)]
pub struct MoveAnalyzer<S: CoordinateSystem> {
    navigator: CoordinateNavigator<S>,
    options: AnalyzerOptions,
    previous_moves: Moves<S>,
    fleet: Fleet<S>,
    hits: Vec<CoordinateOf<S>>,
    alignments: Vec<AlignmentOf<S>>,
    suspicious: Vec<AlignmentOf<S>>,
}

impl<S: CoordinateSystem> MoveAnalyzer<S> {
    pub fn new(system: S, fleet: &[ShipType], options: AnalyzerOptions) -> Self {
        Self {
            navigator: CoordinateNavigator::new(system),
            options,
            previous_moves: PreviousMoves::new(),
            fleet: OpponentFleet::new(fleet),
            hits: Vec::new(),
            alignments: Vec::new(),
            suspicious: Vec::new(),
        }
    }

    pub fn navigator(&self) -> &CoordinateNavigator<S> {
        &self.navigator
    }

    pub fn options(&self) -> AnalyzerOptions {
        self.options
    }

    pub fn previous_moves(&self) -> &Moves<S> {
        &self.previous_moves
    }

    /// Hits not attributed to any ship, in the order they were recorded.
    pub fn hits(&self) -> &[CoordinateOf<S>] {
        &self.hits
    }

    pub fn alignments(&self) -> &[AlignmentOf<S>] {
        &self.alignments
    }

    /// Alignments involved in a backtrack and not settled since.
    pub fn suspicious_alignments(&self) -> &[AlignmentOf<S>] {
        &self.suspicious
    }

    pub fn fleet(&self) -> &Fleet<S> {
        &self.fleet
    }

    pub fn min_ship_size(&self) -> Option<ShipSize> {
        self.fleet.min_ship_size()
    }

    pub fn max_ship_size(&self) -> Option<ShipSize> {
        self.fleet.max_ship_size()
    }

    pub fn verified_max_ship_size(&self) -> Option<ShipSize> {
        self.fleet.verified_max_ship_size()
    }

    /// Ingest the answer to one shot.
    pub fn record(&mut self, mv: Move<S>) -> Result<(), EngineError> {
        if self.previous_moves.contains(mv.target) {
            warn!("ignoring repeated move {} at {}", mv.result, mv.target);
            return Ok(());
        }
        debug!("recording {} at {}", mv.result, mv.target);
        self.previous_moves.push(mv);

        match mv.result {
            GuessResult::Miss => self.discard_extremum(mv.target),
            GuessResult::Hit => {
                self.hits.push(mv.target);
                self.refresh_alignments()
            }
            GuessResult::Sunk | GuessResult::Won => {
                self.hits.push(mv.target);
                self.refresh_alignments()?;
                if self.options.track_ship_sizes {
                    let resolved = self.resolve_sunk(mv.target, true)?;
                    self.confirm_unverified()?;
                    self.resolve_orphan(mv.target, resolved)
                } else {
                    self.retire_sunk(mv.target)
                }
            }
        }
    }

    /// A zero-gap run of ship length whose every outside neighbour is a known
    /// miss cannot be anything but one whole ship.
    pub fn is_alignment_certain(&self, alignment: &AlignmentOf<S>) -> bool {
        alignment.is_candidate_ship()
            && alignment
                .outline(&self.navigator)
                .iter()
                .all(|c| self.previous_moves.is_miss(*c))
    }

    /// Human readable dump of the whole deduced state.
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "moves:");
        for mv in self.previous_moves.moves() {
            let _ = write!(out, " {}:{}", mv.target, mv.result);
        }
        let _ = write!(out, "\nhits:");
        for hit in &self.hits {
            let _ = write!(out, " {}", hit);
        }
        let _ = writeln!(out);
        for alignment in &self.alignments {
            let _ = writeln!(out, "alignment {}", alignment);
        }
        for alignment in &self.suspicious {
            let _ = writeln!(out, "suspicious {}", alignment);
        }
        let _ = write!(out, "fleet:\n{}", self.fleet);
        out
    }

    fn discard_extremum(&mut self, target: CoordinateOf<S>) -> Result<(), EngineError> {
        for alignment in self.alignments.iter_mut() {
            if alignment.is_next_extremum(target) {
                *alignment = alignment.remove_next_extremum(target)?;
            }
        }
        Ok(())
    }

    fn refresh_alignments(&mut self) -> Result<(), EngineError> {
        let tracked = if self.options.track_ship_sizes {
            self.fleet
                .max_ship_size()
                .or_else(|| self.fleet.verified_max_ship_size())
        } else {
            None
        };
        let max_distance = tracked
            .or_else(|| self.fleet.largest_ship_size())
            .map_or(0, |size| size.len() - 1);

        let mut alignments = self.navigator.find_alignments(&self.hits, max_distance)?;
        for alignment in alignments.iter_mut() {
            for extremum in alignment.open_extremums() {
                if self.previous_moves.contains(extremum) {
                    *alignment = alignment.remove_next_extremum(extremum)?;
                }
            }
        }
        self.alignments = alignments;
        Ok(())
    }

    /// Gap-free runs of active hits through `target`, the longest one per
    /// direction.
    fn sunk_segments(&self, target: CoordinateOf<S>) -> Result<Vec<AlignmentOf<S>>, EngineError> {
        let mut segments: Vec<AlignmentOf<S>> = Vec::new();
        for alignment in &self.alignments {
            let Some(segment) = alignment.segment_around(target, &self.navigator)? else {
                continue;
            };
            match segments
                .iter_mut()
                .find(|s| s.direction() == segment.direction())
            {
                Some(known) if known.len() < segment.len() => *known = segment,
                Some(_) => {}
                None => segments.push(segment),
            }
        }
        Ok(segments)
    }

    /// Attribute the run sunk at `target` to a ship. Returns `false` when the
    /// target has no aligned active hit to form a run with.
    fn resolve_sunk(
        &mut self,
        target: CoordinateOf<S>,
        allow_backtrack: bool,
    ) -> Result<bool, EngineError> {
        let segments = self.sunk_segments(target)?;
        if segments.is_empty() {
            debug!("sunk at {} has no aligned hit", target);
            return Ok(false);
        }
        let lone = segments.len() == 1;

        let free = segments
            .iter()
            .find(|s| self.size_of(s).is_some_and(|size| self.fleet.has_not_found(size)));
        if let Some(segment) = free {
            let certain = lone
                && (segment.len() == ShipSize::MIN.len() || self.is_alignment_certain(segment));
            let segment = segment.clone();
            return self.attribute(segment, certain, target, allow_backtrack);
        }

        if allow_backtrack {
            let provisional = segments
                .iter()
                .find(|s| self.size_of(s).is_some_and(|size| self.fleet.has_unverified(size)));
            if let Some(segment) = provisional {
                let segment = segment.clone();
                return self.attribute(segment, false, target, allow_backtrack);
            }
        }

        let mut longest = &segments[0];
        for segment in &segments[1..] {
            if segment.len() > longest.len() {
                longest = segment;
            }
        }
        if let Some(size) = self
            .fleet
            .not_found_sizes()
            .into_iter()
            .find(|size| size.len() < longest.len())
        {
            let window = longest.shrink_around(target, size.len(), &self.navigator)?;
            debug!("sunk run {} is longer than any free ship, keeping {}", longest, window);
            return self.attribute(window, false, target, allow_backtrack);
        }

        if allow_backtrack {
            let beyond: Vec<CoordinateOf<S>> = [
                self.navigator.step(longest.head(), longest.direction(), false),
                self.navigator.step(longest.tail(), longest.direction(), true),
            ]
            .into_iter()
            .flatten()
            .collect();
            if let Some(index) = self.fleet.find_unverified_holding(&beyond) {
                if let Some(held) = self.fleet.mark_as_not_found(index)? {
                    debug!("sunk run {} reopens {}", longest, held);
                    self.restore(held.coordinates());
                    self.suspicious.push(held);
                    self.refresh_alignments()?;
                    return self.resolve_sunk(target, false);
                }
            }
        }

        Err(self.contradiction(alloc::format!(
            "sunk run {} through {} fits no remaining ship",
            longest, target
        )))
    }

    fn attribute(
        &mut self,
        segment: AlignmentOf<S>,
        certain: bool,
        target: CoordinateOf<S>,
        allow_backtrack: bool,
    ) -> Result<bool, EngineError> {
        let outcome = if certain {
            self.fleet.mark_as_sunk(segment.clone())?
        } else {
            self.fleet.mark_as_unverified_sunk(segment.clone())?
        };
        match outcome {
            MarkOutcome::Marked => {
                debug!(
                    "{} attributed as {}",
                    segment,
                    if certain { "sunk" } else { "unverified sunk" }
                );
                self.retire(segment.coordinates());
                self.refresh_alignments()?;
                Ok(true)
            }
            MarkOutcome::Ambiguous {
                alignment,
                backtracked,
            } if allow_backtrack => {
                debug!("{} displaces unverified {}", alignment, backtracked);
                self.restore(backtracked.coordinates());
                self.suspicious.push(alignment);
                self.suspicious.push(backtracked);
                self.refresh_alignments()?;
                self.resolve_sunk(target, false)
            }
            MarkOutcome::Ambiguous { alignment, .. } => Err(self.contradiction(alloc::format!(
                "{} still conflicts after backtracking",
                alignment
            ))),
        }
    }

    /// Promote unverified ships whose alignment has become certain.
    fn confirm_unverified(&mut self) -> Result<(), EngineError> {
        let certain: Vec<usize> = self
            .fleet
            .ships()
            .iter()
            .enumerate()
            .filter_map(|(index, ship)| match ship.status() {
                ShipStatus::UnverifiedSunk(a) if self.is_alignment_certain(a) => Some(index),
                _ => None,
            })
            .collect();
        for index in certain {
            debug!("confirming {}", self.fleet.ships()[index].ship().name());
            self.fleet.confirm_sunk(index)?;
        }

        let fleet = &self.fleet;
        let hits = &self.hits;
        self.suspicious.retain(|a| {
            let held = fleet.ships().iter().any(|s| match s.status() {
                ShipStatus::UnverifiedSunk(held) => held == a,
                _ => false,
            });
            let active = a.coordinates().iter().all(|c| hits.contains(c));
            !fleet.is_confirmed(a) && (held || active)
        });
        Ok(())
    }

    /// A hit that can no longer extend anywhere proves an earlier provisional
    /// attribution wrong.
    fn resolve_orphan(
        &mut self,
        target: CoordinateOf<S>,
        sunk_resolved: bool,
    ) -> Result<(), EngineError> {
        let orphan = if !sunk_resolved && self.hits.contains(&target) {
            Some(target)
        } else if self.hits.len() == 1 && self.is_enclosed(self.hits[0]) {
            Some(self.hits[0])
        } else {
            None
        };
        let Some(orphan) = orphan else {
            return Ok(());
        };
        debug!("orphan hit at {}", orphan);

        if let Some(index) = self.fleet.find_unverified_by_next_extremum(orphan) {
            let Some(held) = self.fleet.mark_as_not_found(index)? else {
                return Err(self.contradiction(alloc::format!("orphan {} lost its ship", orphan)));
            };
            let mut union = held.coordinates().to_vec();
            union.push(orphan);
            let merged = CoordinateAlignment::complete(held.direction(), &union, &self.navigator)?;
            let corrected = merged.shrink_around(orphan, held.len(), &self.navigator)?;
            let excluded: Vec<CoordinateOf<S>> = merged
                .coordinates()
                .iter()
                .copied()
                .filter(|c| !corrected.contains(*c))
                .collect();
            if let MarkOutcome::Ambiguous { alignment, .. } =
                self.fleet.mark_as_sunk(corrected.clone())?
            {
                return Err(self.contradiction(alloc::format!(
                    "corrected alignment {} has no free ship",
                    alignment
                )));
            }
            debug!("{} corrected to {}", held, corrected);
            self.retire(corrected.coordinates());
            self.restore(&excluded);
            self.suspicious.retain(|a| *a != held);
            return self.refresh_alignments();
        }

        let neighbours = self.navigator.surrounding_coordinates(orphan);
        if let Some(index) = self.fleet.find_unverified_holding(&neighbours) {
            if let Some(held) = self.fleet.mark_as_not_found(index)? {
                debug!("orphan {} reopens {}", orphan, held);
                self.restore(held.coordinates());
                self.suspicious.push(held);
                self.refresh_alignments()?;
                if orphan == target {
                    self.resolve_sunk(target, false)?;
                }
                return Ok(());
            }
        }

        Err(self.contradiction(alloc::format!("orphan hit {} belongs to no ship", orphan)))
    }

    fn retire_sunk(&mut self, target: CoordinateOf<S>) -> Result<(), EngineError> {
        let segments = self.sunk_segments(target)?;
        match segments.iter().max_by_key(|s| s.len()) {
            Some(segment) => {
                let coordinates = segment.coordinates().to_vec();
                self.retire(&coordinates);
            }
            None => self.retire(&[target]),
        }
        self.refresh_alignments()
    }

    fn is_enclosed(&self, coordinate: CoordinateOf<S>) -> bool {
        self.navigator
            .surrounding_coordinates(coordinate)
            .into_iter()
            .all(|c| self.previous_moves.contains(c))
    }

    fn size_of(&self, alignment: &AlignmentOf<S>) -> Option<ShipSize> {
        ShipSize::try_from(alignment.len()).ok()
    }

    fn retire(&mut self, coordinates: &[CoordinateOf<S>]) {
        self.hits.retain(|h| !coordinates.contains(h));
    }

    fn restore(&mut self, coordinates: &[CoordinateOf<S>]) {
        for &c in coordinates {
            if !self.hits.contains(&c) {
                self.hits.push(c);
            }
        }
    }

    fn contradiction(&self, reason: String) -> EngineError {
        EngineError::Contradiction {
            reason,
            snapshot: self.snapshot(),
        }
    }
}
