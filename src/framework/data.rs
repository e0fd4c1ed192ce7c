use tracing::{info, warn};

use crate::{
    github::{Github, GithubClient},
    help::HelpRegistry,
};

use super::config::{Config, ConfigSetup};

pub mod error;
pub use error::Error as DataError;

pub type Result<T, E = DataError> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
pub struct PoiseData {
    config: Config,
    github: Github,
    help: HelpRegistry,
}

impl PoiseData {
    pub(crate) fn new(setup: ConfigSetup) -> Result<Self> {
        let github = match setup.github {
            Some(ref github) => {
                let client = GithubClient::new(
                    github.api_url().clone(),
                    github.user_agent(),
                    setup.github_token(),
                )?;
                info!(api = %client.api_url(), "github configured");
                Github::Configured(client)
            }
            None => {
                warn!("no [github] table in config, gh command will be disabled");
                Github::Unconfigured
            }
        };

        let help = crate::commands::help_registry();
        info!(commands = help.len(), "help registered");

        Ok(Self {
            config: setup.finish(),
            github,
            help,
        })
    }

    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) const fn github(&self) -> &Github {
        &self.github
    }

    pub(crate) const fn help(&self) -> &HelpRegistry {
        &self.help
    }
}
