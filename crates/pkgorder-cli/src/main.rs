use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

mod completion;
mod dispatch;
mod render;

use dispatch::run_cli;

#[derive(Parser, Debug)]
#[command(name = "pkgorder")]
#[command(
    about = "Compute a dependency-respecting install or removal order for installed packages",
    long_about = None
)]
struct Cli {
    /// When to use styled output.
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every package so that dependencies come before dependents.
    Order {
        inventory: PathBuf,
        /// Print dependents before their dependencies instead.
        #[arg(long)]
        removal: bool,
        /// List the edges dropped to break dependency cycles.
        #[arg(long)]
        show_removed: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Print the dependency graph built from the inventory.
    Graph {
        inventory: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Print requirements that no other package provides.
    Unsatisfied { inventory: PathBuf },
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Plain,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum OutputStyle {
    Plain,
    Rich,
}

fn resolve_output_style(choice: ColorChoice, stdout_is_tty: bool) -> OutputStyle {
    match choice {
        ColorChoice::Always => OutputStyle::Rich,
        ColorChoice::Never => OutputStyle::Plain,
        ColorChoice::Auto if stdout_is_tty => OutputStyle::Rich,
        ColorChoice::Auto => OutputStyle::Plain,
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("PKGORDER_LOG", "warn"))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let style = resolve_output_style(cli.color, std::io::stdout().is_terminal());
    run_cli(cli.command, style)
}
