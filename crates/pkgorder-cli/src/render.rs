use std::collections::{BTreeMap, BTreeSet};

use anstyle::{AnsiColor, Effects, Style};
use anyhow::{Context, Result};
use pkgorder_core::PackageInventory;
use pkgorder_resolver::{DependencyEdge, DependencyGraph, SortOutcome};
use serde::Serialize;

use crate::OutputStyle;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OrderDirection {
    Install,
    Removal,
}

impl OrderDirection {
    fn title(self) -> &'static str {
        match self {
            Self::Install => "install order",
            Self::Removal => "removal order",
        }
    }
}

#[derive(Serialize)]
struct OrderReport<'a> {
    direction: OrderDirection,
    order: Vec<String>,
    removed_edges: &'a [DependencyEdge],
    attempts: usize,
}

pub(crate) fn ordered_names(outcome: &SortOutcome, direction: OrderDirection) -> Vec<String> {
    match direction {
        OrderDirection::Install => outcome.install_order.clone(),
        OrderDirection::Removal => outcome.removal_order(),
    }
}

pub(crate) fn display_labels(inventory: &PackageInventory) -> BTreeMap<String, String> {
    inventory
        .packages
        .iter()
        .map(|package| (package.name.clone(), package.display_name()))
        .collect()
}

pub(crate) fn format_order_lines(
    outcome: &SortOutcome,
    labels: &BTreeMap<String, String>,
    direction: OrderDirection,
    show_removed: bool,
    style: OutputStyle,
) -> Vec<String> {
    let names = ordered_names(outcome, direction);
    let mut lines = Vec::with_capacity(names.len() + outcome.removed_edges.len() + 2);

    match style {
        OutputStyle::Plain => {
            lines.extend(names);
            if show_removed {
                lines.extend(
                    outcome
                        .removed_edges
                        .iter()
                        .map(|edge| format!("removed: {}", format_edge(edge))),
                );
            }
        }
        OutputStyle::Rich => {
            lines.push(colorize(section_style(), &section_header(direction.title())));
            let width = names.len().to_string().len();
            lines.extend(
                names
                    .iter()
                    .enumerate()
                    .map(|(index, name)| {
                        let label = labels.get(name).unwrap_or(name);
                        format!("{:>width$}. {label}", index + 1)
                    }),
            );
            if show_removed {
                lines.push(colorize(section_style(), &section_header("removed edges")));
                if outcome.removed_edges.is_empty() {
                    lines.push("no dependency cycles found".to_string());
                }
                lines.extend(
                    outcome
                        .removed_edges
                        .iter()
                        .map(|edge| colorize(removed_edge_style(), &format_edge(edge))),
                );
            }
        }
    }

    lines
}

pub(crate) fn format_order_json(outcome: &SortOutcome, direction: OrderDirection) -> Result<String> {
    let report = OrderReport {
        direction,
        order: ordered_names(outcome, direction),
        removed_edges: &outcome.removed_edges,
        attempts: outcome.attempts,
    };
    serde_json::to_string_pretty(&report).context("failed serializing order report")
}

pub(crate) fn format_graph_lines(graph: &DependencyGraph, style: OutputStyle) -> Vec<String> {
    graph
        .names()
        .map(|name| {
            let dependencies = graph
                .dependencies_of(name)
                .map(|set| set.iter().map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let label = match style {
                OutputStyle::Plain => name.to_string(),
                OutputStyle::Rich => colorize(name_style(), name),
            };
            if dependencies.is_empty() {
                format!("{label}:")
            } else {
                format!("{label}: {dependencies}")
            }
        })
        .collect()
}

pub(crate) fn format_graph_json(graph: &DependencyGraph) -> Result<String> {
    serde_json::to_string_pretty(graph).context("failed serializing dependency graph")
}

pub(crate) fn format_unsatisfied_lines(
    unsatisfied: &BTreeMap<String, BTreeSet<String>>,
    style: OutputStyle,
) -> Vec<String> {
    let mut lines = Vec::new();
    if style == OutputStyle::Rich {
        lines.push(colorize(
            section_style(),
            &section_header("unsatisfied requirements"),
        ));
        if unsatisfied.is_empty() {
            lines.push("all requirements satisfied".to_string());
        }
    }

    for (name, capabilities) in unsatisfied {
        let capabilities = capabilities
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let label = match style {
            OutputStyle::Plain => name.clone(),
            OutputStyle::Rich => colorize(name_style(), name),
        };
        lines.push(format!("{label}: {capabilities}"));
    }

    lines
}

fn format_edge(edge: &DependencyEdge) -> String {
    format!("{} -> {}", edge.dependent, edge.dependency)
}

fn section_header(title: &str) -> String {
    format!("== {title} ==")
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn name_style() -> Style {
    Style::new().effects(Effects::BOLD)
}

fn removed_edge_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::Yellow.into()))
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
