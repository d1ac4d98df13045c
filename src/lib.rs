//! Round trip planning: an exact travelling salesman search over a directed
//! graph of travel times.

pub mod error;
pub mod graph;
pub mod instance;
pub mod logging;
pub mod metrics;
pub mod solver;
pub mod trip;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use graph::{Edge, WeightedDigraph};
pub use solver::{ExactTourSolver, Solution, SolverOptions, Tour};
pub use trip::{travel_graph, Leg, TravelSegment, TravelTimes, Trip};
