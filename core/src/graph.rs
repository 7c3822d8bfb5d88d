use std::collections::HashMap;

use crate::facility::Facility;

/// Facility identifier (its index in the `FacilityStore`).
pub type NodeId = u64;

/// Undirected proximity graph: facilities + adjacency lists.
///
/// Simple graph: no self-loops, no parallel edges. Each edge is stored on
/// both endpoints. Adjacency lists are kept sorted by ascending id so
/// traversals expand neighbors in a deterministic order.
///
/// Node and edge sets are fixed once [`build`](crate::build) returns; the
/// mutators are crate-private.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: HashMap<NodeId, Facility>,
    /// Node ids in insertion order, for stable iteration.
    order: Vec<NodeId>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    edge_count: usize,
    threshold_miles: f64,
}

impl Graph {
    /// Empty graph for the given threshold, pre-allocated for `node_count` nodes.
    pub(crate) fn with_capacity(node_count: usize, threshold_miles: f64) -> Self {
        Self {
            nodes: HashMap::with_capacity(node_count),
            order: Vec::with_capacity(node_count),
            adjacency: HashMap::with_capacity(node_count),
            edge_count: 0,
            threshold_miles,
        }
    }

    /// Register a node. Returns false if the id is already present.
    pub(crate) fn add_node(&mut self, facility: Facility) -> bool {
        let id = facility.id;
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, facility);
        self.order.push(id);
        self.adjacency.insert(id, Vec::new());
        true
    }

    /// Add an undirected edge. Both endpoints must already be registered.
    /// Self-loops and repeated edges are ignored.
    pub(crate) fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if a == b || self.has_edge(a, b) {
            return;
        }
        self.push_edge(a, b);
    }

    /// Add an undirected edge without looking for an existing one.
    ///
    /// Callers guarantee `a != b`, both endpoints are registered, and the pair
    /// has not been pushed before. The builder's i < j scan over distinct ids
    /// satisfies this, and it keeps construction at one append per edge.
    pub(crate) fn push_edge(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b);
        if let Some(list) = self.adjacency.get_mut(&a) {
            list.push(b);
        }
        if let Some(list) = self.adjacency.get_mut(&b) {
            list.push(a);
        }
        self.edge_count += 1;
    }

    /// Sort every adjacency list by id. Called once at the end of construction.
    pub(crate) fn sort_adjacency(&mut self) {
        for list in self.adjacency.values_mut() {
            list.sort_unstable();
        }
    }

    /// Get node metadata.
    pub fn node(&self, id: NodeId) -> Option<&Facility> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Neighbor ids of a node, ascending. Empty for isolated or unknown nodes.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|list| list.contains(&b))
    }

    /// Iterate facilities in insertion order.
    pub fn nodes_iter(&self) -> impl Iterator<Item = &Facility> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Iterate each undirected edge once, as `(low, high)` id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.order.iter().flat_map(move |&a| {
            self.neighbors(a)
                .iter()
                .filter(move |&&b| a < b)
                .map(move |&b| (a, b))
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Distance threshold, in miles, the graph was built with.
    pub fn threshold_miles(&self) -> f64 {
        self.threshold_miles
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let strings: usize = self
            .nodes
            .values()
            .map(|f| f.name.len() + f.city.len() + f.zip.len())
            .sum();
        let nodes_mem = self.nodes.len() * (size_of::<NodeId>() + size_of::<Facility>() + 16);
        let adj_mem: usize = self
            .adjacency
            .values()
            .map(|v| size_of::<Vec<NodeId>>() + v.capacity() * size_of::<NodeId>())
            .sum();

        nodes_mem + strings + adj_mem + self.order.capacity() * size_of::<NodeId>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(id: NodeId) -> Facility {
        Facility {
            id,
            name: format!("Pharmacy {}", id),
            city: "Flint".to_string(),
            zip: "48502".to_string(),
            latitude: 43.01,
            longitude: -83.69,
        }
    }

    fn triangle() -> Graph {
        let mut g = Graph::with_capacity(3, 2.0);
        for id in [2, 0, 1] {
            g.add_node(facility(id));
        }
        g.add_edge(2, 0);
        g.add_edge(1, 2);
        g.add_edge(0, 1);
        g.sort_adjacency();
        g
    }

    #[test]
    fn test_graph_counts() {
        let g = triangle();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.threshold_miles(), 2.0);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut g = Graph::with_capacity(1, 2.0);
        assert!(g.add_node(facility(7)));
        assert!(!g.add_node(facility(7)));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_edges_stored_both_ways() {
        let g = triangle();
        assert!(g.has_edge(0, 2));
        assert!(g.has_edge(2, 0));
        assert_eq!(g.degree(2), 2);
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut g = Graph::with_capacity(1, 2.0);
        g.add_node(facility(0));
        g.add_edge(0, 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(0).is_empty());
    }

    #[test]
    fn test_parallel_edge_ignored() {
        let mut g = Graph::with_capacity(2, 2.0);
        g.add_node(facility(0));
        g.add_node(facility(1));
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(0), &[1]);
    }

    #[test]
    fn test_push_edge_appends_both_ends() {
        let mut g = Graph::with_capacity(3, 2.0);
        for id in 0..3 {
            g.add_node(facility(id));
        }
        g.push_edge(2, 0);
        g.push_edge(0, 1);
        g.sort_adjacency();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert_eq!(g.neighbors(2), &[0]);
    }

    #[test]
    fn test_adjacency_sorted() {
        let g = triangle();
        assert_eq!(g.neighbors(2), &[0, 1]);
        assert_eq!(g.neighbors(0), &[1, 2]);
    }

    #[test]
    fn test_nodes_iter_insertion_order() {
        let g = triangle();
        let ids: Vec<NodeId> = g.nodes_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 0, 1]);
    }

    #[test]
    fn test_edges_listed_once() {
        let g = triangle();
        let mut edges: Vec<_> = g.edges().collect();
        edges.sort();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let g = triangle();
        assert!(g.neighbors(999).is_empty());
        assert!(g.node(999).is_none());
    }

    #[test]
    fn test_memory_usage_nonzero() {
        assert!(triangle().memory_usage() > 0);
    }
}
