//! Links from a git working copy to its hosting service.

mod change_request;
mod command;
mod config;
mod error;
mod git;
mod path;
mod reference;
mod remote;
mod url;

#[cfg(test)]
mod testing;

pub use change_request::{ChangeRequestMatch, Matcher, extract_number};
pub use command::{
    EditorContext, Host, LinkKind, Notice, execute, resolve_link, resolve_pull_request, run,
};
pub use config::{Action, Config, DEFAULT_HOST, Settings};
pub use error::ResolveError;
pub use git::{GitRepository, RepoQuery, SETTINGS_SECTION, locate, parse_porcelain_commit};
pub use path::relative_path;
pub use reference::{GitRef, resolve_ref};
pub use remote::{
    PREFERRED_REMOTES, RemoteDescriptor, RepoSlug, describe_remotes, normalize_remote_url,
    parse_repo_slug, resolve_repository_url,
};
pub use url::{file_url, pull_request_url, tree_url};
