//! ndkgraph CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use ndkgraph::util::diagnostic::emit;
use ndkgraph::GraphError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    let filter = if cli.verbose {
        EnvFilter::new("ndkgraph=debug")
    } else {
        EnvFilter::new("ndkgraph=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<GraphError>() {
            Some(graph_error) => emit(&graph_error.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let color = !cli.no_color;
    let ndk_root = cli.ndk_root;

    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args, ndk_root, color),
        Commands::Path(args) => commands::path::execute(args, ndk_root),
        Commands::Toolchain(args) => commands::toolchain::execute(args),
    }
}
