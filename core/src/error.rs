use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by graph construction and queries.
///
/// None of these are fatal: the caller reports them and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or not finite.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("invalid distance threshold: {0} miles")]
    InvalidThreshold(f64),

    #[error("invalid sample size: {0}")]
    InvalidSampleSize(usize),

    #[error("duplicate facility id {0}")]
    DuplicateNode(NodeId),

    #[error("facility {0} is not in the graph")]
    UnknownNode(NodeId),

    #[error("no path found between facilities {from} and {to}")]
    NoPathFound { from: NodeId, to: NodeId },

    /// The graph has no edges at all, so nothing is "most connected".
    #[error("no connections found in the network")]
    EmptyGraph,

    #[error("invalid ZIP prefix '{0}': expected 1-5 digits")]
    InvalidZipPrefix(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
