//! Bounded lane assignment for a children-first commit list.
//!
//! Each lane keeps the set of hashes expected to land on it: a commit's first
//! parent stays on the commit's lane, further (merge) parents take the lowest
//! free lane. When every lane is busy the layout falls back to lane 0 and
//! accepts visual overlap instead of widening past [`MAX_LANES`].
//!
//! A hash expected on several lanes lands on the lane that has been busy the
//! longest: every lane records when it last went from free to busy.

use std::collections::{HashMap, HashSet};

use crate::git::Commit;

/// Upper bound on the number of lanes a layout may use.
pub const MAX_LANES: usize = 8;

/// Lane placement for one commit list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneLayout {
    lanes: HashMap<String, usize>,
    max_lane: usize,
}

impl LaneLayout {
    /// Lane assigned to `hash`, if the commit was part of the input.
    pub fn lane_of(&self, hash: &str) -> Option<usize> {
        self.lanes.get(hash).copied()
    }

    /// Highest lane index used by any commit; 0 for an empty layout.
    pub fn max_lane(&self) -> usize {
        self.max_lane
    }

    /// Number of lane columns needed to draw the layout.
    pub fn width(&self) -> usize {
        self.max_lane + 1
    }

    /// Number of placed commits.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Whether no commit was placed.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

/// Per-call bookkeeping: one set of pending hashes per lane. An empty set is
/// a free lane.
#[derive(Debug, Default)]
struct LaneArena<'c> {
    pending: [HashSet<&'c str>; MAX_LANES],
    /// Open order of each busy lane; only meaningful while `pending` is non-empty.
    opened: [u64; MAX_LANES],
    next_open: u64,
}

impl<'c> LaneArena<'c> {
    /// Takes `hash` off the longest-busy lane that expects it.
    fn claim(&mut self, hash: &str) -> Option<usize> {
        let lane = (0..MAX_LANES)
            .filter(|&lane| self.pending[lane].contains(hash))
            .min_by_key(|&lane| self.opened[lane])?;
        self.pending[lane].remove(hash);
        Some(lane)
    }

    /// Lowest lane with nothing pending, or lane 0 when all are taken.
    fn free_lane(&self) -> usize {
        self.pending
            .iter()
            .position(HashSet::is_empty)
            .unwrap_or(0)
    }

    fn expect(&mut self, lane: usize, hash: &'c str) {
        if self.pending[lane].is_empty() {
            self.opened[lane] = self.next_open;
            self.next_open += 1;
        }
        self.pending[lane].insert(hash);
    }
}

/// Assigns a lane to every commit in one pass.
///
/// `commits` must list children before their parents; no sorting happens
/// here. Parents that never show up in the list leave an unconsumed entry
/// behind, which only keeps that lane busy for the rest of the pass.
pub fn assign_lanes(commits: &[Commit]) -> LaneLayout {
    let mut arena = LaneArena::default();
    let mut layout = LaneLayout {
        lanes: HashMap::with_capacity(commits.len()),
        max_lane: 0,
    };

    for commit in commits {
        let lane = match arena.claim(&commit.hash) {
            Some(lane) => lane,
            None => arena.free_lane(),
        };
        layout.max_lane = layout.max_lane.max(lane);
        layout.lanes.insert(commit.hash.clone(), lane);

        for (index, parent) in commit.parents.iter().enumerate() {
            let parent_lane = if index == 0 { lane } else { arena.free_lane() };
            arena.expect(parent_lane, parent);
        }
    }

    layout
}
