//! pharmacy-graph-core: proximity graph engine for geolocated facilities.
//!
//! A pure Rust library that holds a set of facilities, connects every pair
//! lying within a distance threshold, and answers neighbor, shortest path,
//! degree and info queries over the resulting undirected graph.
//! No I/O happens here; loading and presentation live in the CLI crate.
//!
//! Construction is a brute-force pairwise scan (O(N²)) intended for samples
//! of a few hundred facilities. Callers bound N through [`GraphConfig`].

mod builder;
mod config;
mod distance;
mod error;
mod facility;
mod graph;
mod query;
mod traversal;

pub use builder::build;
pub use config::{
    GraphConfig, DEFAULT_SAMPLE_SIZE, DEFAULT_THRESHOLD_MILES, MAX_SAMPLE_SIZE,
    MAX_THRESHOLD_MILES,
};
pub use distance::{distance, Coordinate, EARTH_RADIUS_MILES};
pub use error::{GraphError, GraphResult};
pub use facility::{map_link, Facility, FacilityRecord, FacilityStore};
pub use graph::{Graph, NodeId};
pub use query::{DegreeEntry, FacilityInfo, GraphSummary, QueryEngine};
pub use traversal::{degree_centrality, shortest_path, DegreeResult};
