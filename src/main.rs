//! sfmc-build - static bundler for Marketing Cloud assets
//!
//! Finds unit manifests (`cloudpage.json`, `email.json`, `sfmc-lib.json`),
//! concatenates the files they list into one deployable bundle per unit and
//! template, and keeps generated script documentation next to each unit.

use clap::Parser;

mod bundler;
mod cli;
mod commands;
mod docs;
mod error;
mod manifest;
mod path_utils;
mod project;
mod ui;

use cli::{Cli, Commands};
use commands::build::BuildSettings;
use manifest::UnitKind;

fn main() {
    let cli = Cli::parse();
    let settings = BuildSettings::from_cli(&cli);

    let result = match cli.command {
        Commands::All(args) => commands::build::run_all(&settings, args),
        Commands::Library(args) => commands::build::run_kind(&settings, UnitKind::Library, args),
        Commands::CloudPages(args) => {
            commands::build::run_kind(&settings, UnitKind::CloudPage, args)
        }
        Commands::Emails(args) => commands::build::run_kind(&settings, UnitKind::Email, args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
