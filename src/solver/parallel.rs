use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use crate::graph::WeightedDigraph;
use crate::solver::exact::{candidates, Outcome, Search, SolverOptions};
use crate::solver::incumbent::SharedIncumbent;
use crate::solver::progress::SearchStats;
use crate::solver::Tour;
use crate::types::{Vertex, Weight};

/// Runs one depth-first search per edge leaving `start`, all sharing a single
/// incumbent. Each worker owns its own visited set and path.
pub(super) fn search<W: Weight, P: Sync>(
    graph: &WeightedDigraph<W, P>,
    options: &SolverOptions,
    start: Vertex,
    deadline: Option<Instant>,
) -> Outcome<W> {
    let mut visited = vec![false; graph.vertex_count()];
    visited[start] = true;
    let roots = candidates(graph, &visited, start, options.order_candidates);

    debug!(
        "splitting {} root branches over {} threads",
        roots.len(),
        rayon::current_num_threads()
    );

    let best: Mutex<Option<Tour<W>>> = Mutex::new(None);

    let workers: Vec<_> = roots
        .par_iter()
        .map(|&(next, weight)| {
            let mut search = Search::new(
                graph,
                options,
                start,
                SharedIncumbent::new(&best),
                deadline,
            );
            search.descend(next, W::ZERO, weight);
            search.into_parts()
        })
        .collect();

    // The root node itself is expanded here rather than by a worker.
    let mut stats = SearchStats::new();
    stats.nodes = 1;
    let mut timed_out = false;
    let mut overflowed = false;

    for (worker_stats, worker_timed_out, worker_overflowed) in workers {
        stats.merge(worker_stats);
        timed_out |= worker_timed_out;
        overflowed |= worker_overflowed;
    }

    Outcome {
        best: best.into_inner().unwrap_or_else(PoisonError::into_inner),
        stats,
        timed_out,
        overflowed,
    }
}
