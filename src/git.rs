//! Git repository queries.

use crate::path::absolutize;
use anyhow::{Context, Result, bail};
use gix::bstr::ByteSlice;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use tracing::debug;

/// Configuration section holding openremote settings.
pub const SETTINGS_SECTION: &str = "openremote";

/// Read only version control queries scoped to one work tree.
///
/// Expected absences (detached HEAD, missing remote, unattributed line)
/// are `Ok(None)`; `Err` is reserved for failures of the query itself.
pub trait RepoQuery {
    /// Work tree root.
    fn root(&self) -> &Path;

    /// Short name of the checked out branch, `None` when detached.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Full hexadecimal identifier of the HEAD commit.
    fn head_commit_id(&self) -> Result<String>;

    /// Raw configured URL of a named remote.
    fn remote_url(&self, name: &str) -> Result<Option<String>>;

    /// Remote names in the order they are configured.
    fn remote_names(&self) -> Result<Vec<String>>;

    /// Commit that last touched a 1-based line of a root relative file.
    fn blame_line(&self, relative_path: &str, line: u32) -> Result<Option<String>>;

    /// Full message of a commit.
    fn commit_message(&self, commit_id: &str) -> Result<String>;

    /// Value of `openremote.<key>` from git configuration.
    fn setting(&self, key: &str) -> Result<Option<String>>;
}

/// Git work tree opened with gix.
pub struct GitRepository {
    repo: gix::Repository,
    root: PathBuf,
}

/// Finds the repository containing a file.
///
/// Relative paths are taken against the current directory. Discovery starts
/// at the file's parent directory, or at the path itself when it is a
/// directory, and walks upwards.
///
/// # Returns
///
/// `None` when the path is not inside a git work tree, including bare
/// repositories and paths whose discovery fails.
pub fn locate(file_path: impl AsRef<Path>) -> Option<GitRepository> {
    let file_path = absolutize(file_path.as_ref());
    let start = if file_path.is_dir() {
        file_path.canonicalize().unwrap_or(file_path)
    } else {
        match file_path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => file_path,
        }
    };

    let repo = match gix::discover(&start) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(start = %start.display(), error = %e, "repository discovery failed");
            return None;
        }
    };

    let Some(work_dir) = repo.work_dir() else {
        debug!(git_dir = %repo.git_dir().display(), "repository has no work tree");
        return None;
    };
    let root = work_dir
        .canonicalize()
        .unwrap_or_else(|_| work_dir.to_path_buf());

    debug!(root = %root.display(), "located repository");
    Some(GitRepository { repo, root })
}

/// Sections named `name` across all loaded configuration files, in load order.
macro_rules! sections {
    ($snapshot:expr, $name:expr) => {
        $snapshot
            .plumbing()
            .sections_by_name($name)
            .into_iter()
            .flatten()
    };
}

impl RepoQuery for GitRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> Result<Option<String>> {
        // Named even when unborn; `None` only for a detached HEAD.
        let head_name = self.repo.head_name().context("Failed to read HEAD reference")?;

        Ok(head_name
            .and_then(|name| name.shorten().to_str().ok().map(|s| s.to_string()))
            .filter(|name| !name.is_empty()))
    }

    fn head_commit_id(&self) -> Result<String> {
        let head = self.repo.head_commit().context("Failed to read HEAD commit")?;
        Ok(head.id.to_hex().to_string())
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let snapshot = self.repo.config_snapshot();
        let url = sections!(snapshot, "remote")
            .filter(|section| {
                section
                    .header()
                    .subsection_name()
                    .is_some_and(|sub| sub.to_str_lossy() == name)
            })
            .find_map(|section| section.value("url"))
            .map(|url| url.to_str_lossy().trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(url)
    }

    fn remote_names(&self) -> Result<Vec<String>> {
        let snapshot = self.repo.config_snapshot();
        let mut names: Vec<String> = Vec::new();

        for section in sections!(snapshot, "remote") {
            let Some(sub) = section.header().subsection_name() else {
                continue;
            };
            let name = sub.to_str_lossy().into_owned();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        Ok(names)
    }

    fn blame_line(&self, relative_path: &str, line: u32) -> Result<Option<String>> {
        let range = format!("{line},{line}");
        let output = Command::new("git")
            .args(["blame", "--porcelain", "-L", &range, "--", relative_path])
            .current_dir(&self.root)
            .output()
            .context("Failed to run git blame")?;

        if !output.status.success() {
            debug!(
                path = relative_path,
                line,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git blame reported no attribution"
            );
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_porcelain_commit(&stdout))
    }

    fn commit_message(&self, commit_id: &str) -> Result<String> {
        let oid = gix::ObjectId::from_hex(commit_id.as_bytes())
            .with_context(|| format!("Invalid commit identifier: {}", commit_id))?;

        let commit = self
            .repo
            .find_object(oid)
            .with_context(|| format!("Failed to find commit {}", commit_id))?
            .try_into_commit()
            .map_err(|_| anyhow::anyhow!("Object {} is not a commit", commit_id))?;

        let message = commit
            .message_raw()
            .context("Failed to read commit message")?;

        Ok(message.to_str_lossy().to_string())
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        let snapshot = self.repo.config_snapshot();

        // Later sections come from more specific scopes and win.
        let value = sections!(snapshot, SETTINGS_SECTION)
            .filter(|section| section.header().subsection_name().is_none())
            .filter_map(|section| section.value(key))
            .last()
            .map(|value| value.to_str_lossy().trim().to_string());

        Ok(value)
    }
}

static PORCELAIN_COMMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]{40})\b").expect("valid regex"));

/// Extracts the attributed commit from `git blame --porcelain` output.
///
/// The commit is the leading 40 hex token of the first line. The all zero
/// identifier git uses for uncommitted lines counts as no attribution.
pub fn parse_porcelain_commit(output: &str) -> Option<String> {
    let first = output.lines().next()?;
    let commit = PORCELAIN_COMMIT.captures(first)?.get(1)?.as_str();

    if commit.bytes().all(|b| b == b'0') {
        return None;
    }

    Some(commit.to_string())
}

/// Parses a git style boolean.
///
/// An empty value is true, matching git's treatment of a bare key.
///
/// # Errors
///
/// Returns error if the value is not a recognized boolean spelling.
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => bail!("Invalid boolean value: {}", other),
    }
}
