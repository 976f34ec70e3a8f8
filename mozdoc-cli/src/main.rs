//! mozdoc — per-branch documentation site builder.
//!
//! # Usage
//!
//! ```text
//! mozdoc build   [-o <dir>] [-C <dir>]
//! mozdoc serve   [-o <dir>] [-C <dir>]
//! mozdoc publish [-o <dir>] [-C <dir>] [-s]
//! mozdoc new     [<path>]          (alias: init)
//! ```
//!
//! `build` generates one static site per git branch under the output dir and
//! links them with a redirect page; `serve` previews the current branch with
//! live reload; `publish` deploys the build to gh-pages and registers it with
//! the central doc index.

mod commands;
mod pages;
mod registration;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::new::NewArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mozdoc",
    version,
    about = "Build one documentation site per git branch",
    long_about = None,
)]
struct Cli {
    /// Directory generated sites are written to.
    #[arg(short = 'o', long, global = true, default_value = "./build")]
    output: PathBuf,

    /// Documentation source directory.
    #[arg(short = 'C', long, global = true, default_value = "./")]
    chdir: PathBuf,

    /// Skip doc-index registration during publish.
    #[arg(short = 's', long, global = true)]
    skip_registration: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a static site for every branch into the output directory.
    Build,

    /// Preview the current branch with live reload.
    Serve,

    /// Build, push the output to gh-pages, and register with the doc index.
    Publish,

    /// Scaffold a new documentation source tree.
    #[command(alias = "init")]
    New(NewArgs),
}

/// Global options shared by every subcommand.
#[derive(Debug, Clone)]
pub(crate) struct Globals {
    pub output: PathBuf,
    pub chdir: PathBuf,
    pub skip_registration: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let globals = Globals {
        output: cli.output,
        chdir: cli.chdir,
        skip_registration: cli.skip_registration,
    };

    match cli.command {
        Commands::Build => commands::build::run(&globals),
        Commands::Serve => commands::serve::run(&globals),
        Commands::Publish => commands::publish::run(&globals),
        Commands::New(args) => args.run(&globals),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
