mod app;
use std::{
    fmt,
    ops::Deref,
    path::{Path, PathBuf},
};

pub use app::AppConfig as Config;

use super::secrets::{self, EnvSecrets, Fallback, SecretFiles, Secrets};

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error("problem loading config file: {0}")]
    App(#[from] app::Error),

    #[error("problem loading secrets: {0}")]
    Secrets(#[from] secrets::MissingSecretError),
}

/// Everything read at startup, before the bot connects.
#[derive(Debug, Clone)]
pub struct ConfigSetup {
    pub app: Config,
    secrets: Secrets,
    path: PathBuf,
}

impl ConfigSetup {
    #[tracing::instrument(skip_all, name = "config")]
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let app = Config::load(path)?;
        tracing::info!(path = %path.display(), "config loaded");

        let secrets = match app.secrets_dir() {
            Some(dir) => Secrets::from_store(&Fallback(SecretFiles::new(&dir), EnvSecrets)).await?,
            None => Secrets::from_store(&EnvSecrets).await?,
        };

        Ok(Self {
            app,
            secrets,
            path: path.to_owned(),
        })
    }

    pub fn token(&self) -> &str {
        self.secrets.bot_token()
    }

    pub fn github_token(&self) -> Option<&str> {
        self.secrets.github_token()
    }

    pub fn finish(self) -> Config {
        self.app
    }
}

impl Deref for ConfigSetup {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.app
    }
}

/// Human-readable dump for `repobot config`, secrets redacted.
impl fmt::Display for ConfigSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "file: {}", self.path.display())?;
        writeln!(f, "{:#?}", self.app)?;
        write!(f, "{:?}", self.secrets)
    }
}
