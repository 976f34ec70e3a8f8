//! Author config — `config.json` at the doc source root.
//!
//! The file is merged over generator defaults; computed locals (branch list,
//! current branch, derived GitHub URLs, serving flag) are injected before the
//! merged config is written into the staging tree for the generator.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::{io_err, ConfigError};
use crate::types::RepoSnapshot;

/// File name consumed from the doc source root and written into staging.
pub const CONFIG_FILE: &str = "config.json";

/// Default endpoint for doc-index registration; override with the
/// `registry` key in `config.json`.
pub const DEFAULT_REGISTRY_URL: &str = "https://mozdoc-registry.herokuapp.com/register";

/// Generator defaults applied beneath the author's config.
fn defaults() -> Map<String, Value> {
    let Value::Object(map) = json!({
        "locals": {
            "title": "Documentation"
        },
        "contents": "./contents",
        "templates": "./templates"
    }) else {
        unreachable!("defaults literal is an object");
    };
    map
}

/// Load `<source_dir>/config.json` merged over the generator defaults.
///
/// A missing file yields the defaults alone; a file that does not parse is
/// an error carrying the path.
pub fn load_config(source_dir: &Path) -> Result<Map<String, Value>, ConfigError> {
    let path = source_dir.join(CONFIG_FILE);
    let mut merged = defaults();

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(merged),
        Err(e) => return Err(io_err(&path, e)),
    };
    let user: Map<String, Value> =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

    for (key, value) in user {
        if key == "locals" {
            // Author locals layer over default locals, key by key.
            let target = locals_mut(&mut merged);
            if let Value::Object(entries) = value {
                for (k, v) in entries {
                    target.insert(k, v);
                }
            }
        } else {
            merged.insert(key, value);
        }
    }
    Ok(merged)
}

/// Inject computed locals into a merged config.
///
/// URLs derive from the origin remote; a repository with no origin gets
/// null URLs, not an error. A malformed origin URL is refused.
pub fn inject_locals(
    config: &mut Map<String, Value>,
    snapshot: &RepoSnapshot,
    serving: bool,
) -> Result<(), ConfigError> {
    let (pages, commits, repo) = match &snapshot.origin_url {
        Some(remote) => (
            Value::String(crate::urls::pages_url(remote)?),
            Value::String(crate::urls::commits_url(
                remote,
                snapshot.current_branch.as_str(),
            )?),
            Value::String(crate::urls::repo_url(remote)?),
        ),
        None => (Value::Null, Value::Null, Value::Null),
    };

    let locals = locals_mut(config);
    locals.insert("branches".into(), json!(snapshot.branch_names()));
    locals.insert(
        "currentBranch".into(),
        json!(snapshot.current_branch.as_str()),
    );
    locals.insert("pagesUrl".into(), pages);
    locals.insert("commitsUrl".into(), commits);
    locals.insert("repoUrl".into(), repo);
    locals.insert("serving".into(), json!(serving));
    Ok(())
}

/// Registration endpoint: the `registry` key, or the built-in default.
pub fn registry_url(config: &Map<String, Value>) -> String {
    config
        .get("registry")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_REGISTRY_URL)
        .to_owned()
}

/// Write the merged config into the staging tree for the generator.
pub fn write_config(staging_dir: &Path, config: &Map<String, Value>) -> Result<(), ConfigError> {
    let path = staging_dir.join(CONFIG_FILE);
    let text = serde_json::to_string_pretty(&Value::Object(config.clone()))?;
    std::fs::write(&path, text).map_err(|e| io_err(&path, e))
}

/// Path of the author's config file, for registration payloads.
pub fn config_path(source_dir: &Path) -> PathBuf {
    source_dir.join(CONFIG_FILE)
}

fn locals_mut(config: &mut Map<String, Value>) -> &mut Map<String, Value> {
    let entry = config
        .entry("locals".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    entry.as_object_mut().expect("locals forced to object")
}
