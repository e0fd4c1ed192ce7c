use std::fmt::Display;

use regex::Regex;
use tracing::{debug, instrument};

/// `owner/repo`, optionally written as `github.com/owner/repo`.
///
/// Any slash-separated pair of words matches, so file paths like `src/main.rs`
/// come back as references too. Lookups for those just end up in the invalid
/// list.
const REFERENCE_PATTERN: &str = r"(?:github\.com/|^)?([\w\d_\-.]+)/([\w\d_\-.]+)";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoReference {
    owner: String,
    name: String,
}

impl RepoReference {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every reference in `text`, left to right. Repeats are kept.
    #[instrument(skip_all)]
    pub fn extract(text: &str) -> Vec<Self> {
        let regex = Regex::new(REFERENCE_PATTERN).expect("hard-coded regex should be valid");

        let references: Vec<Self> = regex
            .captures_iter(text)
            .map(|captures| {
                let (_, [owner, name]) = captures.extract();
                Self::new(owner, name)
            })
            .collect();

        debug!(count = references.len(), "extracted repo references");

        references
    }
}

impl Display for RepoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
