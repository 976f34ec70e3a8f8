//! The redirect artifact at `<output>/index.html`.

use std::path::{Path, PathBuf};

use mozdoc_core::BranchName;

use crate::error::{io_err, BuildError};

/// Write a meta-refresh redirect to `<branch>/` at the output root.
///
/// Always targets the snapshot's current branch, independent of how many
/// branch builds ran or in which order they finished.
pub fn write_redirect(output_root: &Path, branch: &BranchName) -> Result<PathBuf, BuildError> {
    std::fs::create_dir_all(output_root).map_err(|e| io_err(output_root, e))?;
    let path = output_root.join("index.html");
    let html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url=./{branch}/\">\n\
         </head>\n\
         <body>\n\
         <a href=\"./{branch}/\">{branch} documentation</a>\n\
         </body>\n\
         </html>\n"
    );
    std::fs::write(&path, html).map_err(|e| io_err(&path, e))?;
    Ok(path)
}
