//! `mozdoc new [<path>]` — scaffold a documentation source tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mozdoc_core::types::ResourceRoot;

use crate::Globals;

const STARTER_CONFIG: &str = r#"{
  "locals": {
    "title": "Documentation"
  }
}
"#;

const STARTER_DOCUMENT: &str = "# Documentation\n\n\
Write your pages as markdown files in `documents/`; drop images, css, js,\n\
and prototypes into their own directories. Run `mozdoc serve` to preview\n\
and `mozdoc build` to generate a site for every branch.\n";

/// Arguments for `mozdoc new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Directory to scaffold (defaults to the source dir from `-C`).
    pub path: Option<PathBuf>,
}

impl NewArgs {
    pub fn run(self, globals: &Globals) -> Result<()> {
        let dest = self.path.unwrap_or_else(|| globals.chdir.clone());

        for root in ResourceRoot::ALL {
            let dir = dest.join(root.as_str());
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("cannot create '{}'", dir.display()))?;
        }
        write_if_absent(&dest.join("config.json"), STARTER_CONFIG)?;
        write_if_absent(&dest.join("documents").join("index.md"), STARTER_DOCUMENT)?;

        println!("✓ Scaffolded documentation source at {}", dest.display());
        println!("  Next: `mozdoc serve -C {}`", dest.display());
        Ok(())
    }
}

/// Never clobber files the author already has.
fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::write(path, content).with_context(|| format!("cannot write '{}'", path.display()))
}
