//! CLI definitions using clap derive API
//!
//! Argument types live in submodules:
//! - build: unit name and template arguments of the build commands
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;

pub use build::{AllArgs, UnitArgs};
pub use completions::CompletionsArgs;

/// sfmc-build - bundler for Marketing Cloud pages, emails and script libraries
#[derive(Parser, Debug)]
#[command(
    name = "sfmc-build",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bundle cloud pages, emails and script libraries into deployable files",
    long_about = "sfmc-build finds cloudpage.json, email.json and sfmc-lib.json manifests below the \
                  project root, concatenates the sources they list into single bundle files, \
                  applies named templates and refreshes the generated script documentation.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  sfmc-build all                          \x1b[90m# Build every page and email\x1b[0m\n   \
                  sfmc-build cp landing                   \x1b[90m# Build one cloud page\x1b[0m\n   \
                  sfmc-build cp landing prod              \x1b[90m# Build it with the prod template\x1b[0m\n   \
                  sfmc-build e '*' '*'                    \x1b[90m# Every email, every template\x1b[0m\n   \
                  sfmc-build lib                          \x1b[90m# Build all script libraries\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project root to search for manifests (defaults to current directory)
    #[arg(long, short = 'r', global = true, env = "SFMC_BUILD_ROOT")]
    pub root: Option<PathBuf>,

    /// List included files and generated docs
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Only print failures
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Do not generate or remove script documentation
    #[arg(long, global = true)]
    pub no_docs: bool,

    /// Documentation renderer config (defaults to <root>/docs-conf.json)
    #[arg(long, global = true, env = "SFMC_BUILD_DOCS_CONFIG")]
    pub docs_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build all cloud pages and emails
    #[command(visible_alias = "a")]
    All(AllArgs),

    /// Build script libraries (sfmc-lib.json)
    #[command(visible_alias = "lib")]
    Library(UnitArgs),

    /// Build cloud pages (cloudpage.json)
    #[command(name = "cloudPages", visible_alias = "cp")]
    CloudPages(UnitArgs),

    /// Build emails (email.json)
    #[command(visible_alias = "e")]
    Emails(UnitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
