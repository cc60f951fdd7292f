mod cli;
mod data;
mod error;
mod link;
mod list;
mod outline;
mod progress;
mod ui;
mod validate;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate { file } => validate::execute(file, &cli.config, cli.verbose),
        Commands::List {
            file,
            filters,
            notes,
        } => list::execute(file, filters, notes, &cli.config),
        Commands::Outline { file, width } => {
            outline::execute(file, width, &cli.config, cli.verbose)
        }
        Commands::Link {
            file,
            filters,
            base,
        } => link::execute(file, filters, base, &cli.config),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
