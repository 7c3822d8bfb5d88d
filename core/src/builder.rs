use std::time::Instant;

use tracing::debug;

use crate::distance::haversine_miles;
use crate::error::{GraphError, GraphResult};
use crate::facility::Facility;
use crate::graph::Graph;

/// Build the proximity graph over `facilities`.
///
/// Every unordered pair (i, j), i < j, is compared and joined by an edge when
/// their great-circle distance is at most `threshold_miles`. This is an
/// O(N²) scan with no spatial index: fine for a few hundred facilities, but it
/// does not scale, so callers must bound N (see `GraphConfig::sample_size`).
///
/// The result depends only on the input order and threshold. Adjacency lists
/// come out sorted by id.
///
/// Errors:
/// - `InvalidThreshold` for a negative or non-finite threshold
/// - `InvalidCoordinate` for the first facility with an out-of-range position
/// - `DuplicateNode` if two facilities share an id
pub fn build(facilities: &[Facility], threshold_miles: f64) -> GraphResult<Graph> {
    if !threshold_miles.is_finite() || threshold_miles < 0.0 {
        return Err(GraphError::InvalidThreshold(threshold_miles));
    }

    let start = Instant::now();
    let mut graph = Graph::with_capacity(facilities.len(), threshold_miles);

    // Validate once up front so the pair loop can use the unchecked formula
    // and append edges without a duplicate check.
    let mut coords = Vec::with_capacity(facilities.len());
    for facility in facilities {
        coords.push(facility.coordinate().validated()?);
        if !graph.add_node(facility.clone()) {
            return Err(GraphError::DuplicateNode(facility.id));
        }
    }

    for i in 0..facilities.len() {
        for j in (i + 1)..facilities.len() {
            if haversine_miles(coords[i], coords[j]) <= threshold_miles {
                graph.push_edge(facilities[i].id, facilities[j].id);
            }
        }
    }
    graph.sort_adjacency();

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        threshold_miles,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "proximity graph built"
    );

    Ok(graph)
}
