//! The parts of the GitHub REST responses the bot actually reads.

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: reqwest::Url,
    pub owner: RepositoryOwner,

    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub forks_count: u64,
    pub open_issues: u64,

    pub language: Option<String>,
    pub fork: bool,
}

impl RepositorySummary {
    pub fn owner_login(&self) -> &str {
        &self.owner.login
    }
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: u64,
    pub login: String,

    /// api url of the user, which is what the report links to
    pub url: reqwest::Url,

    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,

    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
}
