//! gh-pages deployment — thin glue over the git CLI.
//!
//! The built output tree becomes the gh-pages branch wholesale: a throwaway
//! repository is initialized inside the output dir, everything committed,
//! and force-pushed to the remote's `gh-pages` branch.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, ensure, Context, Result};

pub fn deploy(output: &Path, remote: &str) -> Result<()> {
    if !output.is_dir() {
        bail!("no build output at '{}'; run `mozdoc build` first", output.display());
    }

    git(output, &["init", "--quiet"])?;
    git(output, &["checkout", "-B", "gh-pages", "--quiet"])?;
    git(output, &["add", "-A"])?;
    git(
        output,
        &[
            "-c",
            "user.name=mozdoc",
            "-c",
            "user.email=mozdoc@localhost",
            "commit",
            "--quiet",
            "--allow-empty",
            "-m",
            "publish documentation",
        ],
    )?;
    git(output, &["push", "--force", remote, "gh-pages"])?;
    Ok(())
}

fn git(cwd: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .status()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;
    ensure!(status.success(), "git {} exited with {status}", args.join(" "));
    Ok(())
}
