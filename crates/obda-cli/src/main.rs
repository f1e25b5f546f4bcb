//! obda CLI - translate SQL FROM clauses into relational expressions

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{catalog, from};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::From(args) => from::execute(args, &cli.global),
        cli::Commands::Catalog(args) => catalog::execute(args, &cli.global),
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug output with `--verbose`
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
