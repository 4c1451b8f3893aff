//! Hosting service link construction.
//!
//! Paths are inserted as is. Characters that need percent encoding
//! (spaces, `#`, `%`) are not escaped.

use crate::reference::GitRef;
use crate::remote::RepoSlug;

/// Link to a file, optionally anchored to a 1-based line.
///
/// # Examples
///
/// ```
/// use openremote::{GitRef, file_url};
///
/// let git_ref = GitRef::Branch("main".to_string());
/// let url = file_url("https://github.com/acme/widgets", &git_ref, "src/index.ts", Some(42));
/// assert_eq!(url, "https://github.com/acme/widgets/blob/main/src/index.ts#L42");
/// ```
pub fn file_url(repo_url: &str, git_ref: &GitRef, relative_path: &str, line: Option<u32>) -> String {
    let mut url = format!("{}/blob/{}/{}", repo_url, git_ref, relative_path);
    if let Some(line) = line {
        url.push_str(&format!("#L{}", line));
    }
    url
}

/// Link to the repository root at a reference.
pub fn tree_url(repo_url: &str, git_ref: &GitRef) -> String {
    format!("{}/tree/{}", repo_url, git_ref)
}

/// Link to a pull request.
pub fn pull_request_url(slug: &RepoSlug, number: u64) -> String {
    format!("{}/pull/{}", slug.web_url(), number)
}
