use std::fmt;

use crate::error::{Error, Result};
use crate::types::{Vertex, Weight};

/// A directed edge stored in the bucket of its source vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<W, P> {
    pub destination: Vertex,
    pub weight: W,
    /// Caller data attached to this edge, never inspected by the graph.
    pub payload: P,
}

/// Directed weighted graph over a fixed vertex set `0..vertex_count`.
///
/// Edges are kept in one bucket per source vertex. Buckets are appended to and
/// scanned back to front, so the most recently inserted edge for a
/// `(source, destination)` pair shadows earlier ones.
#[derive(Clone, Debug)]
pub struct WeightedDigraph<W, P> {
    buckets: Vec<Vec<Edge<W, P>>>,
    edge_count: usize,
}

impl<W: Weight, P> WeightedDigraph<W, P> {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Result<Self> {
        if vertex_count == 0 {
            return Err(Error::invalid_argument(
                "vertex count must be positive",
            ));
        }

        let mut buckets = Vec::with_capacity(vertex_count);
        buckets.resize_with(vertex_count, Vec::new);

        Ok(Self {
            buckets,
            edge_count: 0,
        })
    }

    /// Builds a graph from a sequence of `(source, destination, weight, payload)` tuples.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vertex, Vertex, W, P)>,
    {
        let mut graph = Self::new(vertex_count)?;
        for (source, destination, weight, payload) in edges {
            graph.add_edge(source, destination, weight, payload)?;
        }
        Ok(graph)
    }

    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of stored edges, shadowed duplicates included.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Inserts a directed edge. The graph is left untouched on error.
    pub fn add_edge(
        &mut self,
        source: Vertex,
        destination: Vertex,
        weight: W,
        payload: P,
    ) -> Result<()> {
        self.check_vertex(source)?;
        self.check_vertex(destination)?;

        if !weight.is_admissible() {
            return Err(Error::InvalidWeight {
                source_vertex: source,
                destination,
                weight: format!("{:?}", weight),
            });
        }

        self.buckets[source].push(Edge {
            destination,
            weight,
            payload,
        });
        self.edge_count += 1;

        Ok(())
    }

    /// Looks up the authoritative edge for a pair of vertices.
    ///
    /// Out of range vertices simply yield `None`.
    pub fn edge(&self, source: Vertex, destination: Vertex) -> Option<&Edge<W, P>> {
        self.buckets
            .get(source)?
            .iter()
            .rev()
            .find(|edge| edge.destination == destination)
    }

    /// Returns the weight and payload of the edge `source -> destination`.
    pub fn find_edge(&self, source: Vertex, destination: Vertex) -> Option<(W, &P)> {
        self.edge(source, destination)
            .map(|edge| (edge.weight, &edge.payload))
    }

    /// Weight-only lookup for the search loop.
    #[inline]
    pub fn weight(&self, source: Vertex, destination: Vertex) -> Option<W> {
        self.edge(source, destination).map(|edge| edge.weight)
    }

    /// Iterates over the edges leaving `source`, most recently inserted first.
    pub fn edges_from(&self, source: Vertex) -> impl Iterator<Item = &Edge<W, P>> {
        self.buckets
            .get(source)
            .into_iter()
            .flat_map(|bucket| bucket.iter().rev())
    }

    #[inline(always)]
    pub fn contains_vertex(&self, vertex: Vertex) -> bool {
        vertex < self.buckets.len()
    }

    pub(crate) fn check_vertex(&self, vertex: Vertex) -> Result<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }
}

impl<W: Weight, P> fmt::Display for WeightedDigraph<W, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in 0..self.vertex_count() {
            write!(f, "Vertex {}:", vertex)?;
            for edge in self.edges_from(vertex) {
                write!(f, " -> {} = {:?}", edge.destination, edge.weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
