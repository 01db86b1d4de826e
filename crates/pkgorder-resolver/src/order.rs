use std::collections::{BTreeMap, BTreeSet};

use crate::graph::DependencyGraph;
use crate::types::{DependencyEdge, SortOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SortAttempt {
    Ordered(Vec<String>),
    /// Names along a dependency cycle: each entry depends on the next, and
    /// the last depends on the first.
    Cycle(Vec<String>),
}

pub fn sort_breaking_cycles(mut graph: DependencyGraph) -> SortOutcome {
    let mut removed_edges = Vec::new();
    let mut attempts = 0_usize;

    loop {
        attempts += 1;
        match topo_order(&graph) {
            SortAttempt::Ordered(install_order) => {
                log::info!(
                    "ordered {} packages in {} attempt(s), removed {} edge(s)",
                    install_order.len(),
                    attempts,
                    removed_edges.len()
                );
                return SortOutcome {
                    install_order,
                    removed_edges,
                    attempts,
                    graph,
                };
            }
            SortAttempt::Cycle(cycle) => {
                let edge = closing_edge(&cycle);
                log::debug!(
                    "cycle detected: {}; removing {} -> {}",
                    cycle.join(" -> "),
                    edge.dependent,
                    edge.dependency
                );
                let removed = graph.remove_edge(&edge);
                debug_assert!(removed, "cycle edge must exist in graph");
                removed_edges.push(edge);
            }
        }
    }
}

fn closing_edge(cycle: &[String]) -> DependencyEdge {
    let first = &cycle[0];
    let last = &cycle[cycle.len() - 1];
    DependencyEdge::new(last, first)
}

pub(crate) fn topo_order(graph: &DependencyGraph) -> SortAttempt {
    let deps = graph.adjacency();
    let mut reverse: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();

    for (name, dependency_set) in deps {
        reverse.entry(name.as_str()).or_default();
        in_degree.insert(name.as_str(), dependency_set.len());
        for dependency in dependency_set {
            reverse
                .entry(dependency.as_str())
                .or_default()
                .insert(name.as_str());
        }
    }

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter_map(|(name, degree)| (*degree == 0).then_some(*name))
        .collect();
    let mut ordered: Vec<String> = Vec::with_capacity(deps.len());
    let mut placed: BTreeSet<&str> = BTreeSet::new();

    while let Some(next) = ready.pop_first() {
        ordered.push(next.to_string());
        placed.insert(next);
        if let Some(children) = reverse.get(next) {
            for child in children {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        ready.insert(*child);
                    }
                }
            }
        }
    }

    if ordered.len() == deps.len() {
        return SortAttempt::Ordered(ordered);
    }

    SortAttempt::Cycle(find_cycle(deps, &placed))
}

/// Walks from the smallest unplaced node along its smallest unplaced
/// dependency until a node repeats.
///
/// After Kahn's algorithm stalls, every unplaced node still has at least one
/// unplaced dependency, so the walk never dead-ends and must revisit a node.
fn find_cycle(deps: &BTreeMap<String, BTreeSet<String>>, placed: &BTreeSet<&str>) -> Vec<String> {
    let mut path: Vec<&str> = Vec::new();
    let mut position: BTreeMap<&str, usize> = BTreeMap::new();

    let mut current = deps
        .keys()
        .map(String::as_str)
        .find(|name| !placed.contains(name));

    while let Some(node) = current {
        if let Some(&start) = position.get(node) {
            return path[start..].iter().map(|name| name.to_string()).collect();
        }
        position.insert(node, path.len());
        path.push(node);
        current = deps.get(node).and_then(|dependencies| {
            dependencies
                .iter()
                .map(String::as_str)
                .find(|dependency| !placed.contains(dependency))
        });
    }

    unreachable!("stalled topological sort must leave a cycle among unplaced nodes")
}
