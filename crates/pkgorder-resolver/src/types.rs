use serde::Serialize;

use crate::graph::DependencyGraph;

/// `dependent` depends on `dependency`, so `dependency` must come first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DependencyEdge {
    pub dependent: String,
    pub dependency: String,
}

impl DependencyEdge {
    pub fn new(dependent: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            dependent: dependent.into(),
            dependency: dependency.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortOutcome {
    pub install_order: Vec<String>,
    pub removed_edges: Vec<DependencyEdge>,
    pub attempts: usize,
    pub graph: DependencyGraph,
}

impl SortOutcome {
    pub fn removal_order(&self) -> Vec<String> {
        self.install_order.iter().rev().cloned().collect()
    }
}
