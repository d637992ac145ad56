//! Dependency-chain detection over the entity graph
//!
//! Long simple paths read as chains of "A is mostly B" claims; the longest
//! one is the headline finding of a run.

use std::collections::{BTreeMap, VecDeque};

use super::RatioGraph;

/// Longest path of an acyclic graph, by edge count
///
/// Computed over a topological order. Returns an empty path when the graph
/// is empty or contains a cycle; cyclic graphs have no well-defined longest
/// path. Ties resolve to the lexicographically smallest endpoint so the
/// result is reproducible.
pub fn longest_path(graph: &RatioGraph) -> Vec<String> {
    let Some(order) = topological_order(graph) else {
        return Vec::new();
    };

    let mut length: BTreeMap<&String, usize> = BTreeMap::new();
    let mut previous: BTreeMap<&String, &String> = BTreeMap::new();

    for &node in &order {
        let node_length = length.get(node).copied().unwrap_or(0);
        for (next, _) in graph.successors(node) {
            if node_length + 1 > length.get(next).copied().unwrap_or(0) {
                length.insert(next, node_length + 1);
                previous.insert(next, node);
            }
        }
    }

    let Some(end) = order.iter().copied().max_by_key(|node| {
        (
            length.get(*node).copied().unwrap_or(0),
            std::cmp::Reverse(*node),
        )
    }) else {
        return Vec::new();
    };

    let mut path = vec![end.clone()];
    let mut cursor = end;
    while let Some(&prev) = previous.get(cursor) {
        path.push(prev.clone());
        cursor = prev;
    }
    path.reverse();
    path
}

/// All simple paths of at least `min_nodes` nodes, longest first
///
/// Every simple route from every source counts, so sub-chains of a longer
/// chain appear as their own entries, mirroring an all-pairs enumeration.
pub fn all_simple_paths(graph: &RatioGraph, min_nodes: usize) -> Vec<Vec<String>> {
    let mut paths = Vec::new();

    for source in graph.nodes() {
        let mut path = vec![source.clone()];
        collect(graph, source, &mut path, min_nodes, &mut paths);
    }

    paths.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    paths
}

fn collect(
    graph: &RatioGraph,
    current: &str,
    path: &mut Vec<String>,
    min_nodes: usize,
    paths: &mut Vec<Vec<String>>,
) {
    for (next, _) in graph.successors(current) {
        if path.iter().any(|n| n == next) {
            continue;
        }

        path.push(next.clone());
        if path.len() >= min_nodes {
            paths.push(path.clone());
        }
        collect(graph, next, path, min_nodes, paths);
        path.pop();
    }
}

/// Kahn topological sort; `None` when the graph contains a cycle
fn topological_order(graph: &RatioGraph) -> Option<Vec<&String>> {
    let mut in_degree: BTreeMap<&String, usize> = graph.nodes().map(|n| (n, 0)).collect();
    for (_, to, _) in graph.edges() {
        *in_degree.entry(to).or_insert(0) += 1;
    }

    let mut queue: VecDeque<&String> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(node, _)| *node)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for (next, _) in graph.successors(node) {
            if let Some(degree) = in_degree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    (order.len() == graph.node_count()).then_some(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> RatioGraph {
        let mut graph = RatioGraph::new();
        graph.add_edge("a", "b", 1.0);
        graph.add_edge("b", "c", 1.0);
        graph.add_edge("c", "d", 1.0);
        graph.add_edge("x", "b", 1.0);
        graph
    }

    #[test]
    fn test_longest_path_follows_chain() {
        assert_eq!(longest_path(&chain()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_longest_path_empty_for_cyclic_graph() {
        let mut graph = chain();
        graph.add_edge("d", "a", 1.0);
        assert!(longest_path(&graph).is_empty());
    }

    #[test]
    fn test_longest_path_empty_graph() {
        assert!(longest_path(&RatioGraph::new()).is_empty());
    }

    #[test]
    fn test_all_simple_paths_min_length() {
        let paths = all_simple_paths(&chain(), 3);

        // longest first
        assert_eq!(paths[0], vec!["a", "b", "c", "d"]);
        assert!(paths.contains(&vec![
            "x".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string()
        ]));
        // sub-chains count as their own paths
        assert!(paths.contains(&vec![
            "b".to_string(),
            "c".to_string(),
            "d".to_string()
        ]));
        assert!(paths.iter().all(|p| p.len() >= 3));
    }

    #[test]
    fn test_all_simple_paths_ignores_short_routes() {
        let mut graph = RatioGraph::new();
        graph.add_edge("a", "b", 1.0);
        assert!(all_simple_paths(&graph, 3).is_empty());
    }
}
