use std::cmp::Ordering;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::graph::WeightedDigraph;
use crate::solver::incumbent::Incumbent;
use crate::solver::parallel;
use crate::solver::progress::SearchStats;
use crate::types::{Vertex, Weight};

/// Number of nodes expanded between two deadline checks.
const CLOCK_INTERVAL: u64 = 1024;

/// Knobs of the branch-and-bound search. None of them changes the optimal cost.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Abandon partial paths whose cost already reaches the incumbent.
    pub prune: bool,
    /// Expand cheaper edges first.
    pub order_candidates: bool,
    /// Stop early and return the incumbent once this much time has passed.
    pub time_limit: Option<Duration>,
    /// Explore the first level of branches on the rayon pool.
    pub parallel: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            prune: true,
            order_candidates: true,
            time_limit: None,
            parallel: false,
        }
    }
}

/// A closed tour: `path` starts and ends at the same vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour<W> {
    pub cost: W,
    pub path: Vec<Vertex>,
}

impl<W> Tour<W> {
    /// Consecutive `(from, to)` pairs of the tour.
    pub fn legs(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

#[derive(Clone, Debug)]
pub struct Solution<W> {
    pub tour: Tour<W>,
    /// `false` when the time limit cut the search short, in which case the
    /// tour is the best found so far rather than a proven optimum.
    pub complete: bool,
    pub stats: SearchStats<W>,
}

/// Exact minimum-cost Hamiltonian cycle search by depth-first branch-and-bound.
pub struct ExactTourSolver<'g, W, P> {
    graph: &'g WeightedDigraph<W, P>,
    options: SolverOptions,
}

impl<'g, W: Weight, P: Sync> ExactTourSolver<'g, W, P> {
    pub fn new(graph: &'g WeightedDigraph<W, P>) -> Self {
        Self::with_options(graph, SolverOptions::default())
    }

    pub fn with_options(graph: &'g WeightedDigraph<W, P>, options: SolverOptions) -> Self {
        ExactTourSolver { graph, options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Finds the cheapest tour leaving `start`, visiting every vertex once and
    /// returning to `start`.
    pub fn solve(&self, start: Vertex) -> Result<Solution<W>> {
        self.graph.check_vertex(start)?;

        let started = Instant::now();
        let deadline = self.options.time_limit.map(|limit| started + limit);

        debug!(
            "solving {} vertices from {} (prune: {}, ordered: {}, parallel: {})",
            self.graph.vertex_count(),
            start,
            self.options.prune,
            self.options.order_candidates,
            self.options.parallel
        );

        let outcome = if self.options.parallel && self.graph.vertex_count() > 2 {
            parallel::search(self.graph, &self.options, start, deadline)
        } else {
            let mut search =
                Search::new(self.graph, &self.options, start, None::<Tour<W>>, deadline);
            search.explore(start, W::ZERO);
            search.finish()
        };

        let mut solution = outcome.into_solution(start)?;
        solution.stats.elapsed = started.elapsed();

        if !solution.complete {
            warn!(
                "time limit reached after {} nodes, returning incumbent of cost {:?}",
                solution.stats.nodes, solution.tour.cost
            );
        }
        info!(
            "tour from {} costs {:?} ({} nodes, {} pruned, {} improvements, {:?})",
            start,
            solution.tour.cost,
            solution.stats.nodes,
            solution.stats.pruned,
            solution.stats.improvements.len(),
            solution.stats.elapsed
        );

        Ok(solution)
    }
}

/// Solves with default options and returns only the optimal tour.
pub fn solve<W: Weight, P: Sync>(graph: &WeightedDigraph<W, P>, start: Vertex) -> Result<Tour<W>> {
    ExactTourSolver::new(graph)
        .solve(start)
        .map(|solution| solution.tour)
}

/// Outgoing edges of `current` to unvisited vertices, cheapest first when
/// ordering is enabled. The sort is stable, so equal weights keep ascending
/// vertex order.
pub(super) fn candidates<W: Weight, P>(
    graph: &WeightedDigraph<W, P>,
    visited: &[bool],
    current: Vertex,
    ordered: bool,
) -> Vec<(Vertex, W)> {
    let mut candidates: Vec<(Vertex, W)> = visited
        .iter()
        .enumerate()
        .filter(|&(_, &seen)| !seen)
        .filter_map(|(v, _)| graph.weight(current, v).map(|w| (v, w)))
        .collect();

    if ordered {
        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    }

    candidates
}

/// What a finished search hands back to the solver.
pub(super) struct Outcome<W> {
    pub(super) best: Option<Tour<W>>,
    pub(super) stats: SearchStats<W>,
    pub(super) timed_out: bool,
    pub(super) overflowed: bool,
}

impl<W: Weight> Outcome<W> {
    fn into_solution(self, start: Vertex) -> Result<Solution<W>> {
        match self.best {
            Some(tour) => Ok(Solution {
                tour,
                complete: !self.timed_out,
                stats: self.stats,
            }),
            None if self.timed_out => Err(Error::DeadlineExceeded { start }),
            None if self.overflowed => Err(Error::CostOverflow { start }),
            None => Err(Error::NoTourExists { start }),
        }
    }
}

/// Scratch state of one depth-first search. `visited` and `path` are restored
/// on every exit from a branch.
pub(super) struct Search<'g, W, P, I> {
    graph: &'g WeightedDigraph<W, P>,
    options: &'g SolverOptions,
    start: Vertex,
    visited: Vec<bool>,
    path: Vec<Vertex>,
    incumbent: I,
    stats: SearchStats<W>,
    deadline: Option<Instant>,
    timed_out: bool,
    overflowed: bool,
}

impl<'g, W: Weight, P, I: Incumbent<W>> Search<'g, W, P, I> {
    pub(super) fn new(
        graph: &'g WeightedDigraph<W, P>,
        options: &'g SolverOptions,
        start: Vertex,
        incumbent: I,
        deadline: Option<Instant>,
    ) -> Self {
        let n = graph.vertex_count();
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut path = Vec::with_capacity(n + 1);
        path.push(start);

        Search {
            graph,
            options,
            start,
            visited,
            path,
            incumbent,
            stats: SearchStats::new(),
            deadline,
            timed_out: false,
            overflowed: false,
        }
    }

    /// Extends the path by `next` over an edge of weight `weight`, explores
    /// the subtree and backtracks.
    pub(super) fn descend(&mut self, next: Vertex, cost: W, weight: W) {
        self.visited[next] = true;
        self.path.push(next);

        match cost.checked_sum(weight) {
            Some(next_cost) => self.explore(next, next_cost),
            // The prefix is unrepresentable; it only counts as an overflowed
            // tour if it can still be closed.
            None => {
                if !self.overflowed && self.completes(next) {
                    self.overflowed = true;
                }
            }
        }

        self.path.pop();
        self.visited[next] = false;
    }

    /// Whether the current path extends to a closed tour at all, ignoring cost.
    fn completes(&mut self, current: Vertex) -> bool {
        self.stats.nodes += 1;

        if self.clock_expired() {
            return false;
        }

        if self.path.len() == self.graph.vertex_count() {
            return self.graph.weight(current, self.start).is_some();
        }

        for (v, _) in candidates(self.graph, &self.visited, current, false) {
            self.visited[v] = true;
            self.path.push(v);
            let found = self.completes(v);
            self.path.pop();
            self.visited[v] = false;

            if found || self.timed_out {
                return found;
            }
        }
        false
    }

    /// Expands the node for `current` reached at accumulated `cost`.
    pub(super) fn explore(&mut self, current: Vertex, cost: W) {
        self.stats.nodes += 1;

        if self.clock_expired() {
            return;
        }

        if self.path.len() == self.graph.vertex_count() {
            self.close(current, cost);
            return;
        }

        if self.options.prune {
            if let Some(bound) = self.incumbent.bound() {
                if cost >= bound {
                    self.stats.pruned += 1;
                    return;
                }
            }
        }

        let next = candidates(
            self.graph,
            &self.visited,
            current,
            self.options.order_candidates,
        );

        for (v, weight) in next {
            self.descend(v, cost, weight);
            if self.timed_out {
                return;
            }
        }
    }

    /// All vertices are on the path: try the edge back to the start.
    fn close(&mut self, current: Vertex, cost: W) {
        let Some(weight) = self.graph.weight(current, self.start) else {
            self.stats.dead_ends += 1;
            return;
        };
        let Some(total) = cost.checked_sum(weight) else {
            self.overflowed = true;
            return;
        };

        if self.incumbent.offer(total, &self.path, self.start) {
            trace!("incumbent {:?} after {} nodes", total, self.stats.nodes);
            self.stats.record_improvement(total);
        }
    }

    fn clock_expired(&mut self) -> bool {
        if self.timed_out {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.stats.nodes % CLOCK_INTERVAL == 1 && Instant::now() >= deadline {
                self.timed_out = true;
            }
        }
        self.timed_out
    }

    /// Counters and flags of this search, without the incumbent.
    pub(super) fn into_parts(self) -> (SearchStats<W>, bool, bool) {
        (self.stats, self.timed_out, self.overflowed)
    }
}

impl<W: Weight, P> Search<'_, W, P, Option<Tour<W>>> {
    fn finish(self) -> Outcome<W> {
        Outcome {
            best: self.incumbent,
            stats: self.stats,
            timed_out: self.timed_out,
            overflowed: self.overflowed,
        }
    }
}
