//! Pull request number extraction from commit messages.

use regex::Regex;
use std::sync::LazyLock;

/// Commit message patterns, in precedence order.
///
/// `BareReference` matches any `#N` and can pick up unrelated issue
/// numbers, so it is only consulted after the specific patterns fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// `Merge pull request #N from ...`, written by merge commits.
    MergePullRequest,
    /// A closing keyword such as `fixes #N` or `refs #N`.
    ClosingKeyword,
    /// Any `#N`, including squash merge titles like `Add thing (#N)`.
    BareReference,
}

impl Matcher {
    /// All matchers in the order they are tried.
    pub const PRECEDENCE: [Matcher; 3] = [
        Matcher::MergePullRequest,
        Matcher::ClosingKeyword,
        Matcher::BareReference,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            Matcher::MergePullRequest => &MERGE_PULL_REQUEST,
            Matcher::ClosingKeyword => &CLOSING_KEYWORD,
            Matcher::BareReference => &BARE_REFERENCE,
        }
    }

    /// First number captured by this matcher alone.
    ///
    /// Occurrences whose digits overflow `u64` are skipped.
    pub fn find(self, message: &str) -> Option<u64> {
        self.regex()
            .captures_iter(message)
            .find_map(|captures| captures.get(1)?.as_str().parse().ok())
    }
}

static MERGE_PULL_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)merge pull request #(\d+)").expect("valid regex"));

static CLOSING_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fixes|fix|closes|close|resolves|resolve|refs|ref)\s*#(\d+)")
        .expect("valid regex")
});

static BARE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("valid regex"));

/// Pull request number and the matcher that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRequestMatch {
    pub number: u64,
    pub matcher: Matcher,
}

/// Extracts a pull request number from a commit message.
///
/// Matchers run in [`Matcher::PRECEDENCE`] order and the first hit wins.
pub fn extract_number(message: &str) -> Option<ChangeRequestMatch> {
    Matcher::PRECEDENCE.into_iter().find_map(|matcher| {
        matcher
            .find(message)
            .map(|number| ChangeRequestMatch { number, matcher })
    })
}
