use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use pkgorder_core::{validate_unique_names, Package};
use serde::Serialize;

use crate::providers::provider_index;
use crate::types::DependencyEdge;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    deps: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dependencies<I, N, D, S>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for (name, dependencies) in adjacency {
            let name = name.into();
            graph.insert_node(name.clone());
            for dependency in dependencies {
                graph.insert_edge(&name, dependency.into());
            }
        }
        graph
    }

    pub fn insert_node(&mut self, name: impl Into<String>) {
        self.deps.entry(name.into()).or_default();
    }

    pub fn insert_edge(&mut self, dependent: &str, dependency: impl Into<String>) -> bool {
        let dependency = dependency.into();
        if dependent == dependency {
            return false;
        }
        self.deps.entry(dependency.clone()).or_default();
        self.deps
            .entry(dependent.to_string())
            .or_default()
            .insert(dependency)
    }

    pub(crate) fn remove_edge(&mut self, edge: &DependencyEdge) -> bool {
        self.deps
            .get_mut(&edge.dependent)
            .map(|dependencies| dependencies.remove(&edge.dependency))
            .unwrap_or(false)
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.deps.contains_key(name)
    }

    pub fn contains_edge(&self, dependent: &str, dependency: &str) -> bool {
        self.deps
            .get(dependent)
            .is_some_and(|dependencies| dependencies.contains(dependency))
    }

    pub fn node_count(&self) -> usize {
        self.deps.len()
    }

    pub fn edge_count(&self) -> usize {
        self.deps.values().map(BTreeSet::len).sum()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.deps.keys().map(String::as_str)
    }

    pub fn dependencies_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.deps.get(name)
    }

    pub fn dependents_of(&self, name: &str) -> BTreeSet<&str> {
        self.deps
            .iter()
            .filter(|(_, dependencies)| dependencies.contains(name))
            .map(|(dependent, _)| dependent.as_str())
            .collect()
    }

    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.deps
            .iter()
            .flat_map(|(dependent, dependencies)| {
                dependencies
                    .iter()
                    .map(move |dependency| DependencyEdge::new(dependent, dependency))
            })
            .collect()
    }

    pub(crate) fn adjacency(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.deps
    }
}

pub fn build_dependency_graph(packages: &[Package]) -> Result<DependencyGraph> {
    for package in packages {
        package.validate()?;
    }
    validate_unique_names(packages)?;

    let index = provider_index(packages);
    let mut graph = DependencyGraph::new();

    for package in packages {
        graph.insert_node(package.name.clone());
        for capability in &package.requires {
            let Some(providers) = index.get(capability.as_str()) else {
                continue;
            };
            for provider in providers {
                graph.insert_edge(&package.name, *provider);
            }
        }
    }

    log::debug!(
        "built dependency graph: {} packages, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
