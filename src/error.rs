//! Failure taxonomy for link resolution.

use std::path::PathBuf;

/// Reasons a command could not produce a link.
///
/// Every variant renders as a single user facing sentence naming the step
/// that failed. `Query` wraps unexpected version control failures; the other
/// variants are expected "not found" outcomes.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// File's directory is not inside a git work tree.
    #[error("file is not in a git repository: {}", path.display())]
    NotTracked {
        /// Path handed to the command.
        path: PathBuf,
    },

    /// Neither branch nor commit could be read from HEAD.
    #[error("could not resolve reference: {0:#}")]
    ReferenceUnresolvable(#[source] anyhow::Error),

    /// No configured URL and no remote on the hosting service.
    #[error("could not determine repository URL; set openremote.repositoryUrl or add a remote")]
    RepositoryUrlUnresolvable,

    /// Blame returned no commit for the requested line.
    #[error("could not determine commit for line {line}")]
    AttributionUnresolvable {
        /// 1-based line number.
        line: u32,
    },

    /// Commit message carries no recognizable pull request number.
    #[error("could not find pull request number in commit message of {commit}")]
    ChangeRequestNotFound {
        /// Commit whose message was searched.
        commit: String,
    },

    /// Repository URL lacks the `<org>/<repo>` suffix.
    #[error("invalid repository URL format: {url}")]
    MalformedRepositoryUrl {
        /// The URL that failed to parse.
        url: String,
    },

    /// A command needs a cursor line but none was supplied.
    #[error("a line number is required for this command")]
    MissingLine,

    /// Unexpected version control failure.
    #[error("failed to {step}: {source:#}")]
    Query {
        /// Pipeline step that issued the query.
        step: &'static str,
        /// Underlying failure.
        #[source]
        source: anyhow::Error,
    },
}

impl ResolveError {
    /// Wraps a query failure with the pipeline step that issued it.
    pub fn query(step: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Query { step, source }
    }
}
