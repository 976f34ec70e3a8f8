//! GitHub URL derivation — pure string functions over a remote URL.
//!
//! Remotes of the form `…/<user>/<repo>(.git)?` (https or scp-style ssh)
//! resolve to pages / commits / repository URLs. Anything shorter is a
//! [`UrlError::Malformed`]; a broken URL is never produced silently.

use crate::error::UrlError;

/// Split a remote URL into `(user, repo)`.
///
/// Takes the last two `/`-separated segments; strips a `login@host:` ssh
/// prefix from the user segment and a trailing `.git` from the repo segment.
pub fn split_remote(remote: &str) -> Result<(String, String), UrlError> {
    let malformed = || UrlError::Malformed {
        remote: remote.to_owned(),
    };

    let mut segments = remote
        .trim_end_matches('/')
        .split('/')
        .filter(|s| !s.is_empty());
    let repo = segments.next_back().ok_or_else(malformed)?;
    let user = segments.next_back().ok_or_else(malformed)?;

    // scp-style remotes keep the host glued to the user: git@github.com:acme
    let user = user.rsplit(':').next().ok_or_else(malformed)?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if user.is_empty() || repo.is_empty() {
        return Err(malformed());
    }
    Ok((user.to_owned(), repo.to_owned()))
}

/// `http://<user>.github.io/<repo>`
pub fn pages_url(remote: &str) -> Result<String, UrlError> {
    let (user, repo) = split_remote(remote)?;
    Ok(format!("http://{user}.github.io/{repo}"))
}

/// `https://github.com/<user>/<repo>/commits/<branch>`
pub fn commits_url(remote: &str, branch: &str) -> Result<String, UrlError> {
    let (user, repo) = split_remote(remote)?;
    Ok(format!("https://github.com/{user}/{repo}/commits/{branch}"))
}

/// `https://github.com/<user>/<repo>`
pub fn repo_url(remote: &str) -> Result<String, UrlError> {
    let (user, repo) = split_remote(remote)?;
    Ok(format!("https://github.com/{user}/{repo}"))
}
