//! `mozdoc serve` — live preview of the current branch.

use anyhow::Result;

use mozdoc_serve::{serve_blocking, ServeOptions};

use crate::Globals;

use super::Workspace;

pub fn run(globals: &Globals) -> Result<()> {
    let ws = Workspace::resolve(globals)?;

    println!(
        "Serving '{}' on http://localhost:8080 (ctrl-c to stop)",
        ws.snapshot.current_branch
    );
    serve_blocking(
        ServeOptions {
            repo_root: ws.repo_root.clone(),
            source_dir: ws.source_dir.clone(),
            output_dir: ws.output.clone(),
        },
        ws.snapshot,
        ws.generator,
    )?;
    Ok(())
}
