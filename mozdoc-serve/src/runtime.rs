//! The serve session runtime.
//!
//! Stages the current branch with the `serving` flag set, spawns the
//! generator's preview server as a child process, and runs a watcher loop
//! until ctrl-c (or the preview server exiting). Each watch event is handled
//! independently, in delivery order; there is no debouncing — an edit should
//! be visible on the next reload.

use std::path::PathBuf;

use notify::{recommended_watcher, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use mozdoc_build::builder;
use mozdoc_build::Wintersmith;
use mozdoc_core::RepoSnapshot;
use mozdoc_sync::{resource, staging};

use crate::error::{io_err, ServeError};
use crate::events::{classify, resource_rel};

/// Where the session reads from and serves to.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Repository worktree root; the staging tree lives beneath it.
    pub repo_root: PathBuf,
    /// Documentation source directory (the watched tree).
    pub source_dir: PathBuf,
    /// Directory the preview server writes/serves generated output from.
    pub output_dir: PathBuf,
}

/// Run a serve session on a fresh multi-thread runtime, blocking until
/// shutdown.
pub fn serve_blocking(
    opts: ServeOptions,
    snapshot: RepoSnapshot,
    generator: Wintersmith,
) -> Result<(), ServeError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(opts, snapshot, generator))
}

/// The serve session: stage, preview, watch.
pub async fn run(
    opts: ServeOptions,
    snapshot: RepoSnapshot,
    generator: Wintersmith,
) -> Result<(), ServeError> {
    let staging_dir = staging::staging_dir(&opts.repo_root);

    // Initial bulk sync with serving locals, off the async executor.
    {
        let source = opts.source_dir.clone();
        let staging_dir = staging_dir.clone();
        let skeleton = generator.skeleton().to_path_buf();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || {
            builder::stage(&source, &staging_dir, &skeleton, &snapshot, true)
        })
        .await
        .map_err(|e| ServeError::Join(e.to_string()))??;
    }

    let mut preview = generator.preview(&staging_dir, &opts.output_dir)?;
    tracing::info!(output = %opts.output_dir.display(), "preview server started");

    let (shutdown_tx, _) = broadcast::channel::<()>(16);

    let watcher_handle = {
        let shutdown = shutdown_tx.clone();
        let source_dir = opts.source_dir.clone();
        tokio::spawn(async move {
            let result = watcher_task(source_dir, staging_dir, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => tracing::info!("received ctrl-c, stopping serve session"),
                Err(err) => tracing::warn!(error = %err, "ctrl-c handler failed"),
            }
        }
        status = preview.wait() => {
            match status {
                Ok(status) => tracing::warn!(%status, "preview server exited"),
                Err(err) => tracing::warn!(error = %err, "preview server wait failed"),
            }
        }
    }

    let _ = shutdown_tx.send(());
    let _ = preview.kill().await;

    match watcher_handle.await {
        Ok(result) => result,
        Err(err) => Err(ServeError::Join(err.to_string())),
    }
}

/// Watch the doc source tree and apply one sync operation per change event.
async fn watcher_task(
    source_dir: PathBuf,
    staging_dir: PathBuf,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), ServeError> {
    // Canonicalize so watcher-reported real paths survive the prefix check.
    let source_dir = std::fs::canonicalize(&source_dir).unwrap_or(source_dir);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut _watcher: RecommendedWatcher = recommended_watcher(move |event| {
        let _ = event_tx.send(event);
    })?;
    _watcher.watch(&source_dir, RecursiveMode::Recursive)?;
    tracing::info!(path = %source_dir.display(), "watching documentation source");

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watcher event error");
                        continue;
                    }
                };

                for path in &event.paths {
                    let Some(rel) = resource_rel(&source_dir, path) else {
                        continue;
                    };
                    let Some(op) = classify(&event.kind, path.is_dir()) else {
                        continue;
                    };
                    match resource::apply(&source_dir, &staging_dir, &rel, op) {
                        Ok(()) => {
                            tracing::info!(rel = %rel.display(), ?op, "resource synced");
                        }
                        Err(err) => {
                            // The file may be gone again already; keep serving.
                            tracing::warn!(rel = %rel.display(), error = %err, "resource sync failed");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;
    use tokio::sync::broadcast;

    use super::*;

    #[tokio::test]
    async fn watcher_applies_an_edit_to_the_staging_tree() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("doc_source");
        let staging = root.path().join("tmp").join("wintersmith");
        std::fs::create_dir_all(source.join("documents")).unwrap();
        std::fs::create_dir_all(staging.join("contents")).unwrap();

        let (shutdown_tx, _) = broadcast::channel::<()>(1);
        let handle = tokio::spawn(watcher_task(
            source.clone(),
            staging.clone(),
            shutdown_tx.subscribe(),
        ));

        // Give the watcher a moment to register, then write.
        tokio::time::sleep(Duration::from_millis(300)).await;
        std::fs::write(source.join("documents").join("live.md"), "# live").unwrap();

        let dest = staging.join("contents").join("live.md");
        let mut appeared = false;
        for _ in 0..50 {
            if dest.exists() {
                appeared = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let _ = shutdown_tx.send(());
        handle.await.expect("join").expect("watcher task");
        assert!(appeared, "edit was not synced into staging");
    }

    #[tokio::test]
    async fn watcher_shuts_down_on_broadcast() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("doc_source");
        std::fs::create_dir_all(&source).unwrap();

        let (shutdown_tx, _) = broadcast::channel::<()>(1);
        let handle = tokio::spawn(watcher_task(
            source,
            root.path().join("staging"),
            shutdown_tx.subscribe(),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = shutdown_tx.send(());
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("watcher must stop promptly")
            .expect("join")
            .expect("watcher task");
    }
}
