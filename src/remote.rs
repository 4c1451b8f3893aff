//! Hosting repository identification from settings and remotes.

use crate::config::Settings;
use crate::git::RepoQuery;
use regex::Regex;
use tracing::debug;

/// Remotes consulted by name before falling back to listed order.
pub const PREFERRED_REMOTES: [&str; 2] = ["upstream", "origin"];

/// Organization and repository parsed from a hosting URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub host: String,
    pub org: String,
    pub repo: String,
}

impl RepoSlug {
    /// Canonical `https://<host>/<org>/<repo>` form.
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.org, self.repo)
    }
}

/// Configured remote and its normalization result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    name: String,
    raw_url: String,
    hosting_url: Option<String>,
}

impl RemoteDescriptor {
    /// Remote name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL as configured.
    pub fn raw_url(&self) -> &str {
        &self.raw_url
    }

    /// Canonical hosting URL, `None` when the remote is not on the host.
    pub fn hosting_url(&self) -> Option<&str> {
        self.hosting_url.as_deref()
    }
}

/// Pattern for `<host>[:/]<org>/<repo>[.git][/]` at the end of a URL.
fn slug_pattern(host: &str) -> Regex {
    let pattern = format!(
        r"{}[:/]([^/:\s]+)/([^/\s]+?)(?:\.git)?/?$",
        regex::escape(host)
    );
    Regex::new(&pattern).expect("escaped host forms a valid regex")
}

/// Extracts organization and repository from a hosting URL.
///
/// Accepts every shape [`normalize_remote_url`] accepts, including already
/// normalized URLs.
pub fn parse_repo_slug(url: &str, host: &str) -> Option<RepoSlug> {
    let url = url.trim();
    if !url.contains(host) {
        return None;
    }

    let captures = slug_pattern(host).captures(url)?;
    Some(RepoSlug {
        host: host.to_string(),
        org: captures.get(1)?.as_str().to_string(),
        repo: captures.get(2)?.as_str().to_string(),
    })
}

/// Reduces a remote URL to `https://<host>/<org>/<repo>`.
///
/// Recognized raw forms:
/// - `https://<host>/<org>/<repo>` with optional `.git` or trailing slash
/// - `git@<host>:<org>/<repo>.git`
/// - `ssh://git@<host>/<org>/<repo>.git`
///
/// # Returns
///
/// `None` when the URL does not mention the host or lacks an `<org>/<repo>`
/// suffix. Normalizing a normalized URL returns it unchanged.
pub fn normalize_remote_url(raw: &str, host: &str) -> Option<String> {
    parse_repo_slug(raw, host).map(|slug| slug.web_url())
}

/// Normalized URL of a named remote, if it lives on the host.
///
/// Query failures are logged and treated as a missing remote.
fn hosted_remote<R: RepoQuery + ?Sized>(repo: &R, name: &str, host: &str) -> Option<String> {
    let raw = match repo.remote_url(name) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            debug!(remote = name, error = %format!("{:#}", e), "remote lookup failed");
            return None;
        }
    };

    let normalized = normalize_remote_url(&raw, host);
    if normalized.is_none() {
        debug!(remote = name, url = %raw, host, "remote is not on hosting service");
    }
    normalized
}

/// Determines the hosting repository base URL.
///
/// Priority, first match wins:
/// 1. `settings.repository_url`, returned verbatim
/// 2. remote `upstream`
/// 3. remote `origin`
/// 4. every remote in configured order
///
/// Remote URLs at steps 2 to 4 must normalize against `settings.host`.
///
/// # Returns
///
/// `None` when no step produces a URL.
pub fn resolve_repository_url<R: RepoQuery + ?Sized>(
    repo: &R,
    settings: &Settings,
) -> Option<String> {
    if let Some(url) = settings.repository_url.as_deref() {
        debug!(url, "using configured repository URL");
        return Some(url.to_string());
    }

    for name in PREFERRED_REMOTES {
        if let Some(url) = hosted_remote(repo, name, &settings.host) {
            debug!(remote = name, %url, "selected preferred remote");
            return Some(url);
        }
    }

    let names = repo.remote_names().unwrap_or_else(|e| {
        debug!(error = %format!("{:#}", e), "listing remotes failed");
        Vec::new()
    });

    for name in &names {
        if let Some(url) = hosted_remote(repo, name, &settings.host) {
            debug!(remote = %name, %url, "selected first hosted remote");
            return Some(url);
        }
    }

    None
}

/// Lists all remotes with their normalization status.
///
/// # Errors
///
/// Returns error if remotes cannot be enumerated.
pub fn describe_remotes<R: RepoQuery + ?Sized>(
    repo: &R,
    host: &str,
) -> anyhow::Result<Vec<RemoteDescriptor>> {
    let mut remotes = Vec::new();
    for name in repo.remote_names()? {
        let Some(raw_url) = repo.remote_url(&name)? else {
            continue;
        };
        let hosting_url = normalize_remote_url(&raw_url, host);
        remotes.push(RemoteDescriptor {
            name,
            raw_url,
            hosting_url,
        });
    }
    Ok(remotes)
}
