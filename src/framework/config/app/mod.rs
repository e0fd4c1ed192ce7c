use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use rand::seq::IteratorRandom;
use serde::Deserialize;
use tracing::warn;

mod bot;
pub use bot::BotConfig;

const DOCKER_SECRETS_DIR: &str = "/etc/repobot/secrets";

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    secrets_dir: Option<PathBuf>,

    pub bot: BotConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    pub github: Option<GithubConfig>,
}

impl AppConfig {
    pub(super) fn load(path: &Path) -> Result<Self, Error> {
        ::config::Config::builder()
            .add_source(::config::File::new(
                &path.to_string_lossy(),
                ::config::FileFormat::Toml,
            ))
            .add_source(
                ::config::Environment::with_prefix("REPOBOT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)
    }

    /// `REPOBOT_SECRETS_DIR`, then `secrets_dir` from the file, then the docker default.
    #[tracing::instrument(skip_all)]
    pub fn secrets_dir(&self) -> Option<Cow<'_, Path>> {
        tracing::trace!("looking for secrets directory...");

        if let Ok(env) = std::env::var("REPOBOT_SECRETS_DIR") {
            tracing::trace!(
                var = "REPOBOT_SECRETS_DIR",
                value = env,
                "using value from environment"
            );

            Some(PathBuf::from(env).into())
        } else if let Some(ref config) = self.secrets_dir {
            tracing::trace!(value = ?config, "using value from config");

            if cfg!(feature = "docker") && config != Path::new(DOCKER_SECRETS_DIR) {
                warn!("running in docker, but not using the expected secrets directory");
            }

            Some(config.into())
        } else if cfg!(feature = "docker") {
            tracing::trace!(value = DOCKER_SECRETS_DIR, "using docker default value");

            Some(Path::new(DOCKER_SECRETS_DIR).into())
        } else {
            warn!("no secrets directory specified, secrets will only be read from the environment");
            None
        }
    }
}

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error("file read error: {0}")]
    #[event(level = ERROR)]
    Read(::config::ConfigError),

    #[error("parsing error: {0}")]
    #[event(level = ERROR)]
    Parse(::config::ConfigError),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LogsConfig {
    #[serde(default)]
    flavor_texts: Vec<String>,
}

impl LogsConfig {
    pub fn flavor_text(&self) -> Option<&str> {
        let flavor_text = self
            .flavor_texts
            .iter()
            .choose(&mut rand::thread_rng())
            .map(String::as_str);

        if flavor_text.is_none() {
            warn!("no flavor texts provided in config :(");
        }

        flavor_text
    }
}

/// The `[github]` table. Its presence is what turns the `gh` command on.
#[derive(Deserialize, Debug, Clone)]
pub struct GithubConfig {
    #[serde(default = "GithubConfig::default_api_url")]
    api_url: url::Url,
    #[serde(default = "GithubConfig::default_user_agent")]
    user_agent: String,
}

impl GithubConfig {
    fn default_api_url() -> url::Url {
        url::Url::parse(crate::github::GithubClient::DEFAULT_API_URL)
            .expect("hard-coded url should be valid")
    }

    fn default_user_agent() -> String {
        crate::github::GithubClient::DEFAULT_USER_AGENT.to_owned()
    }

    pub fn api_url(&self) -> &url::Url {
        &self.api_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::AppConfig;

    fn parse(toml: &str) -> AppConfig {
        ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()
            .and_then(::config::Config::try_deserialize)
            .expect("test config should parse")
    }

    #[test]
    fn minimal() {
        let config = parse(
            r#"
            [bot]
            prefix = "."
            "#,
        );

        assert_eq!(config.bot.prefix(), ".");
        assert!(config.github.is_none());
        assert!(config.logs.flavor_text().is_none());
    }

    #[test]
    fn github_defaults() {
        let config = parse(
            r#"
            [bot]
            prefix = "."

            [github]
            "#,
        );

        let github = config.github.expect("github table should be present");
        assert_eq!(github.api_url().as_str(), "https://api.github.com/");
        assert_eq!(github.user_agent(), "repobot");
    }

    #[test]
    fn full() {
        let config = parse(
            r#"
            secrets_dir = "./secrets"

            [bot]
            prefix = "!"
            testing_server = 123
            activity = "watching repos"
            status_channel = 456
            notice_delay_secs = 5

            [logs]
            flavor_texts = ["hello"]

            [github]
            api_url = "https://github.example.com/api/v3"
            user_agent = "custom"
            "#,
        );

        assert_eq!(config.logs.flavor_text(), Some("hello"));
        assert_eq!(config.bot.notice_delay().as_secs(), 5);

        let github = config.github.expect("github table should be present");
        assert_eq!(
            github.api_url().as_str(),
            "https://github.example.com/api/v3"
        );
        assert_eq!(github.user_agent(), "custom");
    }
}
