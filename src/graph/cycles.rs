//! Elementary cycle detection over the entity graph
//!
//! Enumerates every elementary cycle with an ordered depth-first search:
//! each cycle is explored only from its lexicographically smallest node, so
//! every cycle is reported exactly once and the output order is stable.

use serde::Serialize;

use super::RatioGraph;

/// One edge of a reported cycle, with its aggregated weight
#[derive(Debug, Clone, Serialize)]
pub struct CycleEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// A detected cycle with per-edge weights
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Cycle nodes in traversal order; the edge from the last node back to
    /// the first closes the cycle
    pub nodes: Vec<String>,

    /// Edges in traversal order, including the closing edge
    pub edges: Vec<CycleEdge>,
}

impl CycleReport {
    /// Human-readable a -> b -> c -> a path string
    pub fn path_string(&self) -> String {
        let mut path = self.nodes.join(" -> ");
        if let Some(first) = self.nodes.first() {
            path.push_str(" -> ");
            path.push_str(first);
        }
        path
    }
}

/// Find all elementary cycles in the graph
///
/// Each cycle is returned as its node list starting at the smallest node,
/// without repeating the start node at the end.
pub fn simple_cycles(graph: &RatioGraph) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();

    for start in graph.nodes() {
        let mut path = vec![start.clone()];
        let mut on_path = vec![start.clone()];
        search(graph, start, start, &mut path, &mut on_path, &mut cycles);
    }

    cycles
}

fn search(
    graph: &RatioGraph,
    start: &str,
    current: &str,
    path: &mut Vec<String>,
    on_path: &mut Vec<String>,
    cycles: &mut Vec<Vec<String>>,
) {
    for (next, _) in graph.successors(current) {
        if next == start {
            cycles.push(path.clone());
            continue;
        }

        // only descend into nodes greater than the start, so each cycle is
        // rooted at its smallest node
        if next.as_str() <= start || on_path.iter().any(|n| n == next) {
            continue;
        }

        path.push(next.clone());
        on_path.push(next.clone());
        search(graph, start, next, path, on_path, cycles);
        path.pop();
        on_path.pop();
    }
}

/// Attach edge weights to detected cycles
pub fn report_cycles(graph: &RatioGraph, cycles: &[Vec<String>]) -> Vec<CycleReport> {
    cycles
        .iter()
        .map(|nodes| {
            let edges = nodes
                .iter()
                .enumerate()
                .map(|(i, from)| {
                    let to = &nodes[(i + 1) % nodes.len()];
                    CycleEdge {
                        from: from.clone(),
                        to: to.clone(),
                        weight: graph.weight(from, to).unwrap_or_default(),
                    }
                })
                .collect();

            CycleReport {
                nodes: nodes.clone(),
                edges,
            }
        })
        .collect()
}
