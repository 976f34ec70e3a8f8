//! Site build invocation for a single branch.
//!
//! Each step is repeatable: staging creation, skeleton materialization,
//! resource sync, and config merge can all run over the leftovers of an
//! earlier attempt.

use std::path::{Path, PathBuf};

use mozdoc_core::{config, BranchName, RepoSnapshot};
use mozdoc_sync::{resource, staging};

use crate::error::BuildError;
use crate::generator::SiteGenerator;

/// One branch build: consumed by a single generator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    pub branch: BranchName,
    /// Docs source directory for this branch (working tree or clone).
    pub source_dir: PathBuf,
    /// Ephemeral staging tree combining skeleton and synced resources.
    pub staging_dir: PathBuf,
    /// `<output>/<branch>` — where the generated site lands.
    pub output_dir: PathBuf,
}

/// Populate a staging tree: skeleton, author resources, merged config.
///
/// Shared between branch builds (`serving = false`) and the serve session
/// (`serving = true`).
pub fn stage(
    source_dir: &Path,
    staging_dir: &Path,
    skeleton: &Path,
    snapshot: &RepoSnapshot,
    serving: bool,
) -> Result<(), BuildError> {
    staging::prepare(staging_dir, skeleton)?;
    resource::sync_all(source_dir, staging_dir)?;

    let mut merged = config::load_config(source_dir)?;
    config::inject_locals(&mut merged, snapshot, serving)?;
    config::write_config(staging_dir, &merged)?;
    Ok(())
}

/// Run one branch build end to end.
///
/// Filesystem staging happens off the async executor; the generator error
/// (if any) is returned to the caller, never thrown.
pub async fn build_branch(
    task: &BuildTask,
    snapshot: &RepoSnapshot,
    skeleton: &Path,
    generator: &dyn SiteGenerator,
) -> Result<(), BuildError> {
    let source_dir = task.source_dir.clone();
    let staging_dir = task.staging_dir.clone();
    let skeleton = skeleton.to_path_buf();
    let snapshot = snapshot.clone();
    tokio::task::spawn_blocking(move || {
        stage(&source_dir, &staging_dir, &skeleton, &snapshot, false)
    })
    .await
    .map_err(|e| BuildError::Join(e.to_string()))??;

    generator.build(&task.staging_dir, &task.output_dir).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use mozdoc_core::BranchName;

    use crate::generator::mock::RecordingGenerator;

    use super::*;

    fn snapshot() -> RepoSnapshot {
        RepoSnapshot {
            current_branch: BranchName::from("main"),
            branches: vec![BranchName::from("main")],
            origin_url: Some("https://github.com/acme/widgets.git".into()),
        }
    }

    fn make_skeleton(root: &Path) -> PathBuf {
        let skeleton = root.join("skeleton");
        std::fs::create_dir_all(skeleton.join("templates")).unwrap();
        std::fs::write(skeleton.join("templates").join("layout.jade"), "layout").unwrap();
        skeleton
    }

    #[tokio::test]
    async fn build_branch_stages_then_invokes_the_generator() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("doc_source");
        std::fs::create_dir_all(source.join("documents")).unwrap();
        std::fs::write(source.join("documents").join("index.md"), "# hi").unwrap();
        let skeleton = make_skeleton(root.path());

        let task = BuildTask {
            branch: BranchName::from("main"),
            source_dir: source.clone(),
            staging_dir: root.path().join("tmp").join("wintersmith"),
            output_dir: root.path().join("build").join("main"),
        };
        let generator = RecordingGenerator::new();

        build_branch(&task, &snapshot(), &skeleton, &generator)
            .await
            .expect("build");

        // Staging carries skeleton, resources, and the merged config.
        assert!(task.staging_dir.join("templates/layout.jade").exists());
        assert!(task.staging_dir.join("contents/index.md").exists());
        let config_text =
            std::fs::read_to_string(task.staging_dir.join("config.json")).unwrap();
        assert!(config_text.contains("\"currentBranch\": \"main\""));
        assert!(config_text.contains("\"serving\": false"));

        assert_eq!(
            generator.calls(),
            vec![(task.staging_dir.clone(), task.output_dir.clone())]
        );
    }

    #[tokio::test]
    async fn generator_failure_is_returned_not_thrown() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("doc_source");
        std::fs::create_dir_all(&source).unwrap();
        let skeleton = make_skeleton(root.path());

        let task = BuildTask {
            branch: BranchName::from("main"),
            source_dir: source,
            staging_dir: root.path().join("tmp").join("wintersmith"),
            output_dir: root.path().join("build").join("main"),
        };
        let generator = RecordingGenerator::new();
        generator.fail_for("main");

        let result = build_branch(&task, &snapshot(), &skeleton, &generator).await;
        assert!(matches!(result, Err(BuildError::Generator(_))));
    }
}
