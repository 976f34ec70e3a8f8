//! `mozdoc publish` — build, push to gh-pages, register with the doc index.

use anyhow::{bail, Context, Result};
use colored::Colorize;

use mozdoc_core::config;

use crate::{pages, registration, Globals};

use super::Workspace;

pub fn run(globals: &Globals) -> Result<()> {
    let ws = Workspace::resolve(globals)?;
    let report = super::build::execute(&ws)?;
    if !report.all_succeeded() {
        bail!("refusing to publish: not every branch built cleanly");
    }

    let remote = ws
        .snapshot
        .origin_url
        .clone()
        .context("publish requires an `origin` remote")?;

    pages::deploy(&ws.output, &remote).context("gh-pages deployment failed")?;
    println!("  {} pushed {} to gh-pages", "✓".green(), ws.output.display());

    if globals.skip_registration {
        return Ok(());
    }

    // The site is already built and deployed; a registration failure is
    // reported but never fails the command.
    let merged = config::load_config(&ws.source_dir)?;
    match registration::register(&merged, &remote) {
        Ok(url) => println!("  {} registered with doc index at {url}", "✓".green()),
        Err(err) => {
            tracing::warn!(error = %err, "doc index registration failed");
            println!("  {} doc index registration failed (site is published)", "✗".red());
        }
    }
    Ok(())
}
