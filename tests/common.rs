//! Shared test utilities for integration tests.
//!
//! Provides helper functions for creating temporary git repositories and
//! performing common git operations used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Runs a git command in the repository and returns trimmed stdout.
///
/// # Errors
///
/// Returns error if git cannot be spawned or exits unsuccessfully
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Creates temporary git repository with test configuration.
///
/// Sets up a clean git repository on branch `main` with user name and email
/// configured.
///
/// # Returns
///
/// Temporary directory containing initialized git repository
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    git(path, &["init"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;

    Ok(dir)
}

/// Commits staged changes and returns commit hash.
///
/// # Errors
///
/// Returns error if commit fails or hash cannot be retrieved
pub fn git_commit(repo_path: &Path, message: &str) -> Result<String> {
    git(repo_path, &["commit", "-m", message])?;
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Stages files in repository.
///
/// # Errors
///
/// Returns error if git add fails
pub fn git_add(repo_path: &Path, files: &[&str]) -> Result<()> {
    let mut args = vec!["add"];
    args.extend_from_slice(files);
    git(repo_path, &args)?;
    Ok(())
}

/// Adds a named remote.
///
/// # Errors
///
/// Returns error if git remote add fails
pub fn git_remote(repo_path: &Path, name: &str, url: &str) -> Result<()> {
    git(repo_path, &["remote", "add", name, url])?;
    Ok(())
}

/// Writes file to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(repo_path: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = repo_path.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Creates a repository with one committed file and returns its hash.
///
/// # Errors
///
/// Returns error if any git operation fails
pub fn repo_with_commit(path: &str, content: &str, message: &str) -> Result<(TempDir, String)> {
    let dir = create_test_repo()?;
    write_file(dir.path(), path, content)?;
    git_add(dir.path(), &["."])?;
    let hash = git_commit(dir.path(), message)?;
    Ok((dir, hash))
}
