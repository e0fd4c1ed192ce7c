use std::fmt::{self, Display};

use crate::{
    github::{GithubError, OwnerSummary, RepoProvider, RepositorySummary},
    utils::arguments::Arguments,
};

const BIO_LENGTH: usize = 50;

/// Which sections of a repo report get rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayFlags {
    general: bool,
    owner: bool,
}

impl DisplayFlags {
    pub const NAMES: &'static [&'static str] = &["general", "owner", "all"];

    /// `all` turns on every section, whatever the other two say.
    pub const fn new(general: bool, owner: bool, all: bool) -> Self {
        if all {
            Self {
                general: true,
                owner: true,
            }
        } else {
            Self { general, owner }
        }
    }

    pub fn from_arguments(arguments: &Arguments) -> Self {
        if arguments.is_empty() {
            return Self::default();
        }

        Self::new(
            arguments.get("general").unwrap_or(true),
            arguments.get("owner").unwrap_or(false),
            arguments.get("all").unwrap_or(false),
        )
    }

    pub const fn general(&self) -> bool {
        self.general
    }

    pub const fn owner(&self) -> bool {
        self.owner
    }
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self::new(true, false, false)
    }
}

/// Renders a report, looking up the owner first if the flags ask for it.
pub async fn build(
    provider: &impl RepoProvider,
    repository: &RepositorySummary,
    flags: DisplayFlags,
) -> Result<String, GithubError> {
    let owner = if flags.owner() {
        Some(provider.user(repository.owner_login()).await?)
    } else {
        None
    };

    Ok(Report::new(repository, flags.general(), owner.as_ref()).to_string())
}

#[derive(Copy, Clone, Debug)]
pub struct Report<'r> {
    repository: &'r RepositorySummary,
    general: bool,
    owner: Option<&'r OwnerSummary>,
}

impl<'r> Report<'r> {
    pub fn new(
        repository: &'r RepositorySummary,
        general: bool,
        owner: Option<&'r OwnerSummary>,
    ) -> Self {
        Self {
            repository,
            general,
            owner,
        }
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repo = self.repository;

        writeln!(f, "**[{}]({})** ", repo.name, repo.html_url)?;

        if self.general {
            writeln!(f, "  **general** ")?;
            writeln!(f, "    id: {} ", repo.id)?;
            writeln!(f, "    full name: {} ", repo.full_name)?;
            writeln!(f, "    stars: {} ", repo.stargazers_count)?;
            writeln!(f, "    watchers: {} ", repo.watchers_count)?;
            writeln!(f, "    forks: {} ", repo.forks_count)?;
            writeln!(f, "    language: {} ", OrNone(repo.language.as_deref()))?;
            writeln!(f, "    is fork: {} ", Bool(repo.fork))?;
            writeln!(f, "    issues: {} ", repo.open_issues)?;
        }

        if let Some(owner) = self.owner {
            let bio = truncate_bio(owner.bio.as_deref().unwrap_or("None"));

            writeln!(f, "  **owner** ")?;
            writeln!(f, "    id: {} ", owner.id)?;
            writeln!(f, "    login: [{}]({}) ", owner.login, owner.url)?;
            writeln!(f, "    name: {} ", OrNone(owner.name.as_deref()))?;
            writeln!(f, "    bio: {bio} ")?;
            writeln!(f, "    company: {} ", OrNone(owner.company.as_deref()))?;
            writeln!(f, "    email: {} ", OrNone(owner.email.as_deref()))?;
            writeln!(f, "    followers: {} ", owner.followers)?;
            writeln!(f, "    following: {} ", owner.following)?;
            writeln!(f, "    repos: {} ", owner.public_repos)?;
        }

        Ok(())
    }
}

/// First 50 characters, plus `...` if anything got cut.
pub fn truncate_bio(bio: &str) -> String {
    let mut chars = bio.chars();
    let mut truncated: String = chars.by_ref().take(BIO_LENGTH).collect();

    if chars.next().is_some() {
        truncated.push_str("...");
    }

    truncated
}

struct OrNone<'a>(Option<&'a str>);

impl Display for OrNone<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.unwrap_or("None"))
    }
}

struct Bool(bool);

impl Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "True" } else { "False" })
    }
}
