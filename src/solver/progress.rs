use std::time::Duration;

use crate::types::Weight;

/// A new incumbent tour found during the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Improvement<W> {
    /// Search node counter at the time the tour was found.
    pub node: u64,
    pub cost: W,
}

/// Counters describing how much of the search tree was explored.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchStats<W> {
    /// Number of search nodes expanded, the root included
    pub nodes: u64,
    /// Number of branches abandoned because their cost reached the incumbent
    pub pruned: u64,
    /// Number of complete paths without an edge back to the start
    pub dead_ends: u64,
    /// Incumbent history, in the order tours were found
    pub improvements: Vec<Improvement<W>>,
    /// Wall clock time of the solve
    pub elapsed: Duration,
}

impl<W: Weight> SearchStats<W> {
    pub fn new() -> Self {
        SearchStats {
            nodes: 0,
            pruned: 0,
            dead_ends: 0,
            improvements: vec![],
            elapsed: Duration::ZERO,
        }
    }

    pub fn record_improvement(&mut self, cost: W) {
        self.improvements.push(Improvement {
            node: self.nodes,
            cost,
        });
    }

    /// Folds the counters of a worker into this one.
    pub fn merge(&mut self, other: SearchStats<W>) {
        self.nodes += other.nodes;
        self.pruned += other.pruned;
        self.dead_ends += other.dead_ends;
        self.improvements.extend(other.improvements);
    }
}

impl<W: Weight> Default for SearchStats<W> {
    fn default() -> Self {
        Self::new()
    }
}
