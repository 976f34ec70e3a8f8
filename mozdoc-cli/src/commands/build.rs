//! `mozdoc build` — one static site per branch, linked by a redirect page.

use std::sync::Arc;

use anyhow::{bail, Result};
use colored::Colorize;

use mozdoc_build::{build_all_blocking, BuildReport, GitBranchSource};
use mozdoc_sync::staging;

use crate::Globals;

use super::Workspace;

pub fn run(globals: &Globals) -> Result<()> {
    let ws = Workspace::resolve(globals)?;
    let report = execute(&ws)?;
    print_report(&ws, &report);

    if !report.all_succeeded() {
        let failed = report.outcomes.iter().filter(|o| !o.succeeded()).count();
        bail!("{failed} branch build(s) failed");
    }
    Ok(())
}

/// Run the branch build pipeline; shared with `publish`.
pub(crate) fn execute(ws: &Workspace) -> Result<BuildReport> {
    staging::clean_temp(&ws.repo_root)?;

    let source = GitBranchSource::new(&ws.repo_root);
    let report = build_all_blocking(
        &ws.snapshot,
        &ws.repo_root,
        &ws.docs_rel,
        &ws.output,
        ws.generator.skeleton(),
        &source,
        Arc::new(ws.generator.clone()),
    )?;
    Ok(report)
}

fn print_report(ws: &Workspace, report: &BuildReport) {
    println!(
        "Built {} branch(es) into {}",
        report.outcomes.len(),
        ws.output.display()
    );
    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!("  {} {}", "✓".green(), outcome.branch),
            Some(err) => println!("  {} {} — {err}", "✗".red(), outcome.branch),
        }
    }
    println!(
        "  {} index.html → {}/",
        "✓".green(),
        ws.snapshot.current_branch
    );
}
