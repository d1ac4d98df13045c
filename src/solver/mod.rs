mod exact;
mod incumbent;
mod parallel;
pub mod progress;

pub use exact::{solve, ExactTourSolver, Solution, SolverOptions, Tour};
pub use progress::{Improvement, SearchStats};
