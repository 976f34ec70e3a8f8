//! Doc-index registration — one JSON POST, non-fatal on failure.

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use mozdoc_core::config;

/// POST `{config, github_remote}` to the registry endpoint.
///
/// Returns the endpoint URL on acknowledgement so the caller can report it.
pub fn register(merged_config: &Map<String, Value>, remote: &str) -> Result<String> {
    let url = config::registry_url(merged_config);
    let payload = json!({
        "config": Value::Object(merged_config.clone()),
        "github_remote": remote,
    });

    let response = ureq::post(&url)
        .send_json(payload)
        .with_context(|| format!("registration POST to {url} failed"))?;
    tracing::debug!(status = response.status(), url = %url, "doc index acknowledged");
    Ok(url)
}
