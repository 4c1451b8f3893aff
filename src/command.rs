//! Command pipelines from editor state to an opened link.

use crate::change_request;
use crate::config::{Action, Config, Settings};
use crate::error::ResolveError;
use crate::git::{self, RepoQuery};
use crate::path::relative_path;
use crate::reference::resolve_ref;
use crate::remote::{describe_remotes, parse_repo_slug, resolve_repository_url};
use crate::url::{file_url, pull_request_url, tree_url};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info, info_span};

/// Editor state a command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContext {
    /// Active file (or directory for repository links).
    pub file_path: PathBuf,
    /// 1-based cursor line.
    pub line: Option<u32>,
}

/// Kind of link a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// File at the current reference, without a line anchor.
    File,
    /// File at the current reference, anchored to the cursor line.
    Line,
    /// Repository root at the current reference.
    Repository,
    /// Pull request that last touched the cursor line.
    PullRequest,
}

/// Message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Surface the pipeline reports through.
pub trait Host {
    /// Opens a URL in an external viewer.
    ///
    /// # Errors
    ///
    /// Returns error if the viewer cannot be launched.
    fn open_url(&self, url: &str) -> Result<()>;

    /// Shows a transient notification.
    fn notify(&self, notice: Notice);
}

/// Resolves the link for a command against an opened repository.
///
/// Steps run strictly in sequence and the first failure aborts the command.
///
/// # Errors
///
/// Returns the [`ResolveError`] naming the step that failed.
pub fn resolve_link<R: RepoQuery + ?Sized>(
    repo: &R,
    settings: &Settings,
    context: &EditorContext,
    kind: LinkKind,
) -> Result<String, ResolveError> {
    match kind {
        LinkKind::File => resolve_file(repo, settings, context, None),
        LinkKind::Line => {
            let line = context.line.ok_or(ResolveError::MissingLine)?;
            resolve_file(repo, settings, context, Some(line))
        }
        LinkKind::Repository => {
            let repo_url = repository_url(repo, settings)?;
            let git_ref = resolve_ref(repo, settings.use_commit_hash)?;
            Ok(tree_url(&repo_url, &git_ref))
        }
        LinkKind::PullRequest => resolve_pull_request(repo, settings, context),
    }
}

fn repository_url<R: RepoQuery + ?Sized>(
    repo: &R,
    settings: &Settings,
) -> Result<String, ResolveError> {
    resolve_repository_url(repo, settings).ok_or(ResolveError::RepositoryUrlUnresolvable)
}

fn root_relative<R: RepoQuery + ?Sized>(
    repo: &R,
    context: &EditorContext,
) -> Result<String, ResolveError> {
    relative_path(repo.root(), &context.file_path)
        .map_err(ResolveError::query("compute path relative to repository root"))
}

fn resolve_file<R: RepoQuery + ?Sized>(
    repo: &R,
    settings: &Settings,
    context: &EditorContext,
    line: Option<u32>,
) -> Result<String, ResolveError> {
    let repo_url = repository_url(repo, settings)?;
    let git_ref = resolve_ref(repo, settings.use_commit_hash)?;
    let relative = root_relative(repo, context)?;
    debug!(%repo_url, %git_ref, %relative, ?line, "building file link");

    Ok(file_url(&repo_url, &git_ref, &relative, line))
}

/// Resolves the pull request that introduced the cursor line.
///
/// Blames the line, reads the attributed commit's message, extracts a pull
/// request number and builds `https://<host>/<org>/<repo>/pull/<number>`.
///
/// # Errors
///
/// Returns error if the line is missing or unattributed, the message holds
/// no number, or the repository URL has no `<org>/<repo>` suffix.
pub fn resolve_pull_request<R: RepoQuery + ?Sized>(
    repo: &R,
    settings: &Settings,
    context: &EditorContext,
) -> Result<String, ResolveError> {
    let line = context.line.ok_or(ResolveError::MissingLine)?;
    let repo_url = repository_url(repo, settings)?;
    let relative = root_relative(repo, context)?;

    let commit = repo
        .blame_line(&relative, line)
        .map_err(ResolveError::query("blame line"))?
        .ok_or(ResolveError::AttributionUnresolvable { line })?;
    debug!(%relative, line, %commit, "line attributed");

    let message = repo
        .commit_message(&commit)
        .map_err(ResolveError::query("read commit message"))?;

    let found = change_request::extract_number(&message)
        .ok_or_else(|| ResolveError::ChangeRequestNotFound {
            commit: commit.clone(),
        })?;
    debug!(number = found.number, matcher = ?found.matcher, "pull request number found");

    let slug = parse_repo_slug(&repo_url, &settings.host).ok_or_else(|| {
        ResolveError::MalformedRepositoryUrl {
            url: repo_url.clone(),
        }
    })?;

    Ok(pull_request_url(&slug, found.number))
}

/// Resolves a link and opens it.
///
/// Any failure becomes exactly one [`Notice::Error`].
///
/// # Returns
///
/// `true` when the link was opened.
pub fn run<R: RepoQuery + ?Sized>(
    repo: &R,
    settings: &Settings,
    context: &EditorContext,
    kind: LinkKind,
    host: &dyn Host,
) -> bool {
    let url = match resolve_link(repo, settings, context, kind) {
        Ok(url) => url,
        Err(e) => {
            host.notify(Notice::Error(e.to_string()));
            return false;
        }
    };

    match host.open_url(&url) {
        Ok(()) => {
            info!(%url, "opened link");
            true
        }
        Err(e) => {
            host.notify(Notice::Error(format!("failed to open {}: {:#}", url, e)));
            false
        }
    }
}

/// Executes a parsed command line.
///
/// Locates the repository, resolves settings, then runs the link pipeline
/// or lists remotes.
///
/// # Returns
///
/// `true` on success. Failures have already been reported through `host`.
pub fn execute(config: &Config, host: &dyn Host) -> bool {
    let context = EditorContext {
        file_path: config.action.path().to_path_buf(),
        line: config.action.line(),
    };
    let _span = info_span!("command", path = %context.file_path.display()).entered();

    let Some(repo) = git::locate(&context.file_path) else {
        let err = ResolveError::NotTracked {
            path: context.file_path.clone(),
        };
        host.notify(Notice::Error(err.to_string()));
        return false;
    };
    let settings = Settings::resolve(config, &repo);
    debug!(?settings, root = %repo.root().display(), "resolved settings");

    let kind = match &config.action {
        Action::File { line: None, .. } => LinkKind::File,
        Action::File { line: Some(_), .. } | Action::Line { .. } => LinkKind::Line,
        Action::Repo { .. } => LinkKind::Repository,
        Action::Pr { .. } => LinkKind::PullRequest,
        Action::Remotes { .. } => return list_remotes(&repo, &settings, host),
    };

    run(&repo, &settings, &context, kind, host)
}

fn list_remotes<R: RepoQuery + ?Sized>(repo: &R, settings: &Settings, host: &dyn Host) -> bool {
    let remotes = match describe_remotes(repo, &settings.host) {
        Ok(remotes) => remotes,
        Err(e) => {
            host.notify(Notice::Error(format!("failed to list remotes: {:#}", e)));
            return false;
        }
    };

    if remotes.is_empty() {
        host.notify(Notice::Info("no remotes configured".to_string()));
    }
    for remote in &remotes {
        let status = remote.hosting_url().unwrap_or("(not on hosting service)");
        host.notify(Notice::Info(format!(
            "{}\t{}\t{}",
            remote.name(),
            remote.raw_url(),
            status
        )));
    }

    match resolve_repository_url(repo, settings) {
        Some(url) => host.notify(Notice::Info(format!("selected\t{}", url))),
        None => host.notify(Notice::Info("selected\t(none)".to_string())),
    }
    true
}
