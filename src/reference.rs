//! Reference selection for generated links.

use crate::error::ResolveError;
use crate::git::RepoQuery;
use std::fmt;
use tracing::debug;

/// Branch or commit a link is pinned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRef {
    Branch(String),
    Commit(String),
}

impl GitRef {
    /// Name as it appears in a URL.
    pub fn as_str(&self) -> &str {
        match self {
            GitRef::Branch(name) | GitRef::Commit(name) => name,
        }
    }
}

impl fmt::Display for GitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the reference used in links.
///
/// With `use_commit_hash` the full HEAD commit is used. Otherwise the
/// current branch is preferred; a detached HEAD, an empty branch name, or a
/// failing branch lookup falls back to the commit.
///
/// # Errors
///
/// Returns [`ResolveError::ReferenceUnresolvable`] when the commit
/// identifier is needed and cannot be read.
pub fn resolve_ref<R: RepoQuery + ?Sized>(
    repo: &R,
    use_commit_hash: bool,
) -> Result<GitRef, ResolveError> {
    if !use_commit_hash {
        match repo.current_branch() {
            Ok(Some(branch)) if !branch.is_empty() => return Ok(GitRef::Branch(branch)),
            Ok(_) => debug!("HEAD is detached, falling back to commit"),
            Err(e) => debug!(error = %format!("{:#}", e), "branch lookup failed, falling back to commit"),
        }
    }

    repo.head_commit_id()
        .map(GitRef::Commit)
        .map_err(ResolveError::ReferenceUnresolvable)
}
