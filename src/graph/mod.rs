mod digraph;

pub use digraph::{Edge, WeightedDigraph};

#[cfg(test)]
mod tests;
