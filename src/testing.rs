//! In-memory repository for unit tests.

use crate::git::RepoQuery;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Scripted [`RepoQuery`] answering from fixed values.
#[derive(Debug, Clone)]
pub struct FakeRepo {
    root: PathBuf,
    branch: Option<String>,
    commit: Option<String>,
    remotes: Vec<(String, String)>,
    remotes_fail: bool,
    blame: HashMap<(String, u32), String>,
    messages: HashMap<String, String>,
    settings: HashMap<String, String>,
    settings_fail: bool,
}

impl Default for FakeRepo {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/work/repo"),
            branch: None,
            commit: None,
            remotes: Vec::new(),
            remotes_fail: false,
            blame: HashMap::new(),
            messages: HashMap::new(),
            settings: HashMap::new(),
            settings_fail: false,
        }
    }
}

impl FakeRepo {
    pub fn on_branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    pub fn at_commit(mut self, commit: &str) -> Self {
        self.commit = Some(commit.to_string());
        self
    }

    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.push((name.to_string(), url.to_string()));
        self
    }

    /// Makes every remote query fail.
    pub fn failing_remotes(mut self) -> Self {
        self.remotes_fail = true;
        self
    }

    pub fn with_blame(mut self, path: &str, line: u32, commit: &str) -> Self {
        self.blame
            .insert((path.to_string(), line), commit.to_string());
        self
    }

    pub fn with_message(mut self, commit: &str, message: &str) -> Self {
        self.messages
            .insert(commit.to_string(), message.to_string());
        self
    }

    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key.to_string(), value.to_string());
        self
    }

    /// Makes every setting query fail.
    pub fn failing_settings(mut self) -> Self {
        self.settings_fail = true;
        self
    }
}

impl RepoQuery for FakeRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn head_commit_id(&self) -> Result<String> {
        self.commit
            .clone()
            .ok_or_else(|| anyhow!("HEAD has no commits"))
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>> {
        if self.remotes_fail {
            return Err(anyhow!("git config unreadable"));
        }
        Ok(self
            .remotes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.clone()))
    }

    fn remote_names(&self) -> Result<Vec<String>> {
        if self.remotes_fail {
            return Err(anyhow!("git config unreadable"));
        }
        Ok(self.remotes.iter().map(|(n, _)| n.clone()).collect())
    }

    fn blame_line(&self, relative_path: &str, line: u32) -> Result<Option<String>> {
        Ok(self.blame.get(&(relative_path.to_string(), line)).cloned())
    }

    fn commit_message(&self, commit_id: &str) -> Result<String> {
        self.messages
            .get(commit_id)
            .cloned()
            .ok_or_else(|| anyhow!("Failed to find commit {}", commit_id))
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        if self.settings_fail {
            return Err(anyhow!("git config unreadable"));
        }
        Ok(self.settings.get(key).cloned())
    }
}
