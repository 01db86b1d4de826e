use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pkgorder_core::PackageInventory;
use pkgorder_resolver::{
    build_dependency_graph, sort_breaking_cycles, unsatisfied_requirements, DependencyGraph,
};

use crate::completion::write_completions_script;
use crate::render::{
    display_labels, format_graph_json, format_graph_lines, format_order_json, format_order_lines,
    format_unsatisfied_lines, OrderDirection,
};
use crate::{Commands, OutputFormat, OutputStyle};

pub(crate) fn run_cli(command: Commands, style: OutputStyle) -> Result<()> {
    match command {
        Commands::Order {
            inventory,
            removal,
            show_removed,
            format,
        } => {
            let path = inventory;
            let inventory = load_inventory(&path)?;
            let graph = build_graph(&inventory, &path)?;
            let outcome = sort_breaking_cycles(graph);
            let direction = if removal {
                OrderDirection::Removal
            } else {
                OrderDirection::Install
            };
            match format {
                OutputFormat::Plain => {
                    let labels = display_labels(&inventory);
                    for line in
                        format_order_lines(&outcome, &labels, direction, show_removed, style)
                    {
                        println!("{line}");
                    }
                }
                OutputFormat::Json => println!("{}", format_order_json(&outcome, direction)?),
            }
        }
        Commands::Graph { inventory, format } => {
            let graph = build_graph(&load_inventory(&inventory)?, &inventory)?;
            match format {
                OutputFormat::Plain => {
                    for line in format_graph_lines(&graph, style) {
                        println!("{line}");
                    }
                }
                OutputFormat::Json => println!("{}", format_graph_json(&graph)?),
            }
        }
        Commands::Unsatisfied { inventory } => {
            let inventory = load_inventory(&inventory)?;
            let unsatisfied = unsatisfied_requirements(&inventory.packages);
            for line in format_unsatisfied_lines(&unsatisfied, style) {
                println!("{line}");
            }
        }
        Commands::Completions { shell } => {
            let mut stdout = io::stdout().lock();
            write_completions_script(shell, &mut stdout)?;
            stdout.flush().context("failed flushing completion script")?;
        }
    }

    Ok(())
}

fn load_inventory(path: &Path) -> Result<PackageInventory> {
    let inventory = PackageInventory::load(path)?;
    log::debug!("loaded {} packages from {}", inventory.len(), path.display());
    Ok(inventory)
}

fn build_graph(inventory: &PackageInventory, path: &Path) -> Result<DependencyGraph> {
    build_dependency_graph(&inventory.packages)
        .with_context(|| format!("failed building dependency graph: {}", path.display()))
}
