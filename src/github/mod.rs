mod client;
pub use client::GithubClient;

mod error;
pub use error::GithubError;

mod models;
pub use models::{OwnerSummary, RepositorySummary};

mod reference;
pub use reference::RepoReference;

/// Repository and user lookups.
///
/// Each call is a single request that either returns the record or fails.
/// A missing record is reported as [`GithubError::NotFound`].
pub trait RepoProvider {
    async fn repository(&self, reference: &RepoReference)
        -> Result<RepositorySummary, GithubError>;

    async fn user(&self, login: &str) -> Result<OwnerSummary, GithubError>;
}

/// Handle stored in the bot data, empty when the config has no `[github]` table.
#[derive(Debug, Clone)]
pub enum Github<P = GithubClient> {
    Configured(P),
    Unconfigured,
}

impl<P> Github<P> {
    pub fn provider(&self) -> Option<&P> {
        match self {
            Self::Configured(provider) => Some(provider),
            Self::Unconfigured => None,
        }
    }
}
