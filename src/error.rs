use thiserror::Error as ThisError;

use crate::types::Vertex;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("vertex {vertex} out of range for graph with {vertex_count} vertices")]
    OutOfRange { vertex: Vertex, vertex_count: usize },
    #[error("no tour visiting every vertex exists from vertex {start}")]
    NoTourExists { start: Vertex },
    #[error("inadmissible edge weight {weight} on {source_vertex} -> {destination}")]
    InvalidWeight {
        source_vertex: Vertex,
        destination: Vertex,
        weight: String,
    },
    #[error("every tour from vertex {start} overflows the weight type")]
    CostOverflow { start: Vertex },
    #[error("time limit reached before any tour from vertex {start} was found")]
    DeadlineExceeded { start: Vertex },
    #[error("no travel leg from {origin:?} to {destination:?}")]
    NoLeg { origin: String, destination: String },
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
