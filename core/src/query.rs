use serde::Serialize;

use crate::builder::build;
use crate::config::GraphConfig;
use crate::error::{GraphError, GraphResult};
use crate::facility::{Facility, FacilityStore};
use crate::graph::{Graph, NodeId};
use crate::traversal::{degree_centrality, shortest_path};

/// A facility together with its degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeEntry<'a> {
    pub facility: &'a Facility,
    pub degree: usize,
}

/// Facility details plus a Google Maps link to its location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityInfo<'a> {
    pub facility: &'a Facility,
    pub map_link: String,
}

/// Headline numbers for a built graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub isolated_count: usize,
    pub threshold_miles: f64,
}

/// Read-only query surface over a built proximity graph.
///
/// Owns the graph; every query borrows it immutably. Unknown ids and
/// disconnected endpoints come back as [`GraphError`] values, never panics.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    graph: Graph,
}

impl QueryEngine {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Validate `config`, then build over the store's leading sample.
    pub fn from_store(store: &FacilityStore, config: &GraphConfig) -> GraphResult<Self> {
        config.validate()?;
        let graph = build(store.sample(config.sample_size), config.threshold_miles)?;
        Ok(Self::new(graph))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Look up a facility that is part of the graph.
    pub fn facility(&self, id: NodeId) -> GraphResult<&Facility> {
        self.graph.node(id).ok_or(GraphError::UnknownNode(id))
    }

    /// Facilities within the threshold of `id`, ascending by id.
    ///
    /// An isolated facility yields an empty list; an id outside the graph
    /// yields `UnknownNode`.
    pub fn neighbors(&self, id: NodeId) -> GraphResult<Vec<&Facility>> {
        self.facility(id)?;
        Ok(self
            .graph
            .neighbors(id)
            .iter()
            .filter_map(|&n| self.graph.node(n))
            .collect())
    }

    /// Minimum-hop path from `source` to `target`, both inclusive.
    pub fn shortest_path(&self, source: NodeId, target: NodeId) -> GraphResult<Vec<NodeId>> {
        self.facility(source)?;
        self.facility(target)?;
        shortest_path(&self.graph, source, target).ok_or(GraphError::NoPathFound {
            from: source,
            to: target,
        })
    }

    /// The facility with the most neighbors; ties go to the smallest id.
    pub fn most_connected(&self) -> GraphResult<DegreeEntry<'_>> {
        if self.graph.edge_count() == 0 {
            return Err(GraphError::EmptyGraph);
        }
        self.degree_ranking(1)
            .into_iter()
            .next()
            .ok_or(GraphError::EmptyGraph)
    }

    /// Facilities by degree, descending, ids ascending within ties.
    /// `top_n == 0` returns every facility.
    pub fn degree_ranking(&self, top_n: usize) -> Vec<DegreeEntry<'_>> {
        degree_centrality(&self.graph, top_n)
            .into_iter()
            .filter_map(|dr| {
                self.graph.node(dr.node_id).map(|facility| DegreeEntry {
                    facility,
                    degree: dr.degree,
                })
            })
            .collect()
    }

    pub fn get_info(&self, id: NodeId) -> GraphResult<FacilityInfo<'_>> {
        let facility = self.facility(id)?;
        Ok(FacilityInfo {
            facility,
            map_link: facility.map_link(),
        })
    }

    pub fn summary(&self) -> GraphSummary {
        let isolated_count = self
            .graph
            .nodes_iter()
            .filter(|f| self.graph.degree(f.id) == 0)
            .count();
        GraphSummary {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            isolated_count,
            threshold_miles: self.graph.threshold_miles(),
        }
    }
}
