use std::collections::{HashMap, VecDeque};

use crate::graph::{Graph, NodeId};

/// Degree information for a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub degree: usize,
}

/// Shortest path from `start` to `target` using BFS (unweighted).
///
/// Every edge counts as one hop: the graph only records "within threshold",
/// not how far apart two facilities are. Neighbors are expanded in ascending
/// id order, so the same graph always yields the same path.
///
/// Returns None if no path exists, or if either node is not in the graph.
/// The path includes both endpoints; `start == target` gives `[start]`.
pub fn shortest_path(graph: &Graph, start: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
    if !graph.contains(start) || !graph.contains(target) {
        return None;
    }

    if start == target {
        return Some(vec![start]);
    }

    // BFS with parent tracking: node → parent. The start node is its own parent.
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    parents.insert(start, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors(current) {
            if parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, current);

            if next == target {
                return Some(reconstruct_path(&parents, start, target));
            }

            queue.push_back(next);
        }
    }

    None
}

/// Walk parent pointers from `target` back to `start`.
fn reconstruct_path(parents: &HashMap<NodeId, NodeId>, start: NodeId, target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut current = target;

    while current != start {
        current = parents[&current];
        path.push(current);
    }

    path.reverse();
    path
}

/// Return nodes ranked by degree.
///
/// If `top_n` is 0, returns all nodes. Otherwise returns the top N by degree
/// (descending). Ties are broken by node ID (ascending).
pub fn degree_centrality(graph: &Graph, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = graph
        .nodes_iter()
        .map(|f| DegreeResult {
            node_id: f.id,
            degree: graph.degree(f.id),
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.node_id.cmp(&b.node_id)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
