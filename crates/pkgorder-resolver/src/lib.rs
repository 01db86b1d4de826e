mod graph;
mod order;
mod providers;
mod types;

pub use graph::{build_dependency_graph, DependencyGraph};
pub use order::sort_breaking_cycles;
pub use providers::unsatisfied_requirements;
pub use types::{DependencyEdge, SortOutcome};
