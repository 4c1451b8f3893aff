//! Command line configuration and link settings.

use crate::git::{RepoQuery, parse_bool};
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Hosting service assumed when none is configured.
pub const DEFAULT_HOST: &str = "github.com";

/// Command line configuration for openremote.
#[derive(Debug, Clone, Parser)]
#[command(name = "openremote", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub action: Action,

    /// Repository base URL, bypassing remote detection
    #[arg(long, global = true, value_name = "URL")]
    pub repository_url: Option<String>,

    /// Pin links to the HEAD commit instead of the current branch
    #[arg(long, global = true)]
    pub use_commit_hash: bool,

    /// Hosting service host name (default: github.com)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Print the URL instead of opening it
    #[arg(long, global = true)]
    pub no_open: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Link to open.
#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Open a file at the current reference
    File {
        /// File in a git work tree
        path: PathBuf,

        /// Anchor the link to a 1-based line
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        line: Option<u32>,
    },

    /// Open a file at the current reference, anchored to a line
    Line {
        /// File in a git work tree
        path: PathBuf,

        /// 1-based line number
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
    },

    /// Open the repository root at the current reference
    Repo {
        /// Any path inside the work tree
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Open the pull request that last touched a line
    Pr {
        /// File in a git work tree
        path: PathBuf,

        /// 1-based line number
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
    },

    /// List remotes and the hosting URL each resolves to
    Remotes {
        /// Any path inside the work tree
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

impl Action {
    /// Path the action operates on.
    pub fn path(&self) -> &Path {
        match self {
            Action::File { path, .. }
            | Action::Line { path, .. }
            | Action::Repo { path }
            | Action::Pr { path, .. }
            | Action::Remotes { path } => path,
        }
    }

    /// Cursor line supplied with the action.
    pub fn line(&self) -> Option<u32> {
        match self {
            Action::File { line, .. } => *line,
            Action::Line { line, .. } | Action::Pr { line, .. } => Some(*line),
            Action::Repo { .. } | Action::Remotes { .. } => None,
        }
    }
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the target path does not exist.
    pub fn validate(&self) -> Result<()> {
        let path = self.action.path();
        if !path.exists() {
            bail!("Path does not exist: {}", path.display());
        }

        Ok(())
    }
}

/// Settings snapshot consumed by the resolution pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicit repository URL, returned verbatim when set.
    pub repository_url: Option<String>,
    /// Use the HEAD commit instead of the branch name.
    pub use_commit_hash: bool,
    /// Host marker remotes must contain.
    pub host: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repository_url: None,
            use_commit_hash: false,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Settings {
    /// Resolves settings from command line flags and git configuration.
    ///
    /// Flags win over `openremote.*` git configuration keys. Unreadable or
    /// malformed configuration values are logged and ignored.
    pub fn resolve<R: RepoQuery + ?Sized>(config: &Config, repo: &R) -> Self {
        let read = |key: &str| -> Option<String> {
            match repo.setting(key) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %format!("{:#}", e), "failed to read setting");
                    None
                }
            }
        };
        let non_empty = |value: &String| !value.trim().is_empty();

        let repository_url = config
            .repository_url
            .clone()
            .filter(non_empty)
            .or_else(|| read("repositoryUrl").filter(non_empty));

        // A key without a value is true, as in git itself.
        let use_commit_hash = config.use_commit_hash
            || read("useCommitHash")
                .and_then(|value| match parse_bool(&value) {
                    Ok(flag) => Some(flag),
                    Err(e) => {
                        warn!(key = "useCommitHash", error = %e, "ignoring setting");
                        None
                    }
                })
                .unwrap_or(false);

        let host = config
            .host
            .clone()
            .filter(non_empty)
            .or_else(|| read("host").filter(non_empty))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Self {
            repository_url,
            use_commit_hash,
            host,
        }
    }
}
