use std::sync::{Mutex, PoisonError};

use crate::solver::Tour;
use crate::types::{Vertex, Weight};

/// How many bound reads a worker serves from its cache before re-reading the
/// shared incumbent.
const REFRESH_INTERVAL: u32 = 64;

/// Best-known tour as seen by one search.
pub(super) trait Incumbent<W: Weight> {
    /// Cost of the best tour known, if any.
    fn bound(&mut self) -> Option<W>;

    /// Offers the closed tour `path + [start]` of the given cost.
    /// Only a strict improvement replaces the incumbent.
    fn offer(&mut self, cost: W, path: &[Vertex], start: Vertex) -> bool;
}

fn closed(path: &[Vertex], start: Vertex) -> Vec<Vertex> {
    let mut tour = Vec::with_capacity(path.len() + 1);
    tour.extend_from_slice(path);
    tour.push(start);
    tour
}

impl<W: Weight> Incumbent<W> for Option<Tour<W>> {
    #[inline(always)]
    fn bound(&mut self) -> Option<W> {
        self.as_ref().map(|tour| tour.cost)
    }

    fn offer(&mut self, cost: W, path: &[Vertex], start: Vertex) -> bool {
        if self.as_ref().is_some_and(|best| cost >= best.cost) {
            return false;
        }
        *self = Some(Tour {
            cost,
            path: closed(path, start),
        });
        true
    }
}

/// Incumbent shared between parallel workers.
///
/// Bound reads may be stale, which only costs extra nodes. Updates happen
/// under the lock with the same strict comparison as the sequential search.
pub(super) struct SharedIncumbent<'a, W> {
    best: &'a Mutex<Option<Tour<W>>>,
    cached: Option<W>,
    reads: u32,
}

impl<'a, W: Weight> SharedIncumbent<'a, W> {
    pub(super) fn new(best: &'a Mutex<Option<Tour<W>>>) -> Self {
        let mut shared = SharedIncumbent {
            best,
            cached: None,
            reads: 0,
        };
        shared.refresh();
        shared
    }

    fn refresh(&mut self) {
        let guard = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        self.cached = (*guard).as_ref().map(|tour| tour.cost);
    }
}

impl<W: Weight> Incumbent<W> for SharedIncumbent<'_, W> {
    fn bound(&mut self) -> Option<W> {
        self.reads += 1;
        if self.reads >= REFRESH_INTERVAL {
            self.reads = 0;
            self.refresh();
        }
        self.cached
    }

    fn offer(&mut self, cost: W, path: &[Vertex], start: Vertex) -> bool {
        let mut guard = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        let improved = Incumbent::offer(&mut *guard, cost, path, start);
        self.cached = (*guard).as_ref().map(|tour| tour.cost);
        improved
    }
}
