use std::{fmt, path::Path};

use tracing::{debug, trace};

/// Credentials read at startup.
#[derive(Clone)]
pub struct Secrets {
    bot_token: String,
    github_token: Option<String>,
}

impl Secrets {
    #[tracing::instrument(skip_all, name = "secrets")]
    pub async fn from_store(store: &impl SecretStore) -> Result<Self, MissingSecretError> {
        let (bot_token, github_token) = tokio::join!(
            store.require(SecretKey::BotToken),
            store.get(SecretKey::GithubToken)
        );

        if github_token.is_none() {
            debug!("no github token, api requests will be unauthenticated");
        }

        Ok(Self {
            bot_token: bot_token?,
            github_token,
        })
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("bot_token", &"<redacted>")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SecretKey {
    BotToken,
    GithubToken,
}

impl SecretKey {
    /// Name of the file holding this secret.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::BotToken => "bot_token",
            Self::GithubToken => "github_token",
        }
    }

    pub const fn env_var(self) -> &'static str {
        match self {
            Self::BotToken => "REPOBOT_BOT_TOKEN",
            Self::GithubToken => "REPOBOT_GITHUB_TOKEN",
        }
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
#[error("missing secret: {secret} (set {} or add it to the secrets directory)", .secret.env_var())]
#[event(level = ERROR)]
pub struct MissingSecretError {
    #[field(print = Display)]
    secret: SecretKey,
}

pub trait SecretStore {
    async fn get(&self, secret: SecretKey) -> Option<String>;

    async fn require(&self, secret: SecretKey) -> Result<String, MissingSecretError> {
        self.get(secret)
            .await
            .ok_or(MissingSecretError { secret })
    }
}

/// One file per secret, named after the key.
pub struct SecretFiles<'path> {
    directory: &'path Path,
}

impl<'path> SecretFiles<'path> {
    pub fn new(directory: &'path Path) -> Self {
        Self { directory }
    }
}

impl SecretStore for SecretFiles<'_> {
    async fn get(&self, secret: SecretKey) -> Option<String> {
        let path = self.directory.join(secret.file_name());
        trace!(path = %path.display(), "reading secret file");

        tokio::fs::read_to_string(path)
            .await
            .ok()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
    }
}

pub struct EnvSecrets;

impl SecretStore for EnvSecrets {
    async fn get(&self, secret: SecretKey) -> Option<String> {
        std::env::var(secret.env_var())
            .ok()
            .filter(|s| !s.is_empty())
    }
}

/// Tries the first store, then the second.
pub struct Fallback<A, B>(pub A, pub B);

impl<A: SecretStore, B: SecretStore> SecretStore for Fallback<A, B> {
    async fn get(&self, secret: SecretKey) -> Option<String> {
        match self.0.get(secret).await {
            Some(value) => Some(value),
            None => self.1.get(secret).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::{Fallback, SecretFiles, SecretKey, SecretStore, Secrets};

    struct MapStore(HashMap<SecretKey, &'static str>);

    impl SecretStore for MapStore {
        async fn get(&self, secret: SecretKey) -> Option<String> {
            self.0.get(&secret).map(|s| (*s).to_owned())
        }
    }

    fn store(entries: &[(SecretKey, &'static str)]) -> MapStore {
        MapStore(entries.iter().copied().collect())
    }

    #[tokio::test]
    async fn github_token_is_optional() {
        let secrets = Secrets::from_store(&store(&[(SecretKey::BotToken, "bot")]))
            .await
            .expect("bot token is present");

        assert_eq!(secrets.bot_token(), "bot");
        assert_eq!(secrets.github_token(), None);
    }

    #[tokio::test]
    async fn bot_token_is_required() {
        let err = Secrets::from_store(&store(&[(SecretKey::GithubToken, "gh")]))
            .await
            .expect_err("bot token is missing");

        assert!(err.to_string().contains("REPOBOT_BOT_TOKEN"));
    }

    #[tokio::test]
    async fn fallback_prefers_first_store() {
        let first = store(&[(SecretKey::BotToken, "first")]);
        let second = store(&[
            (SecretKey::BotToken, "second"),
            (SecretKey::GithubToken, "gh"),
        ]);

        let secrets = Secrets::from_store(&Fallback(first, second))
            .await
            .expect("both secrets are present");

        assert_eq!(secrets.bot_token(), "first");
        assert_eq!(secrets.github_token(), Some("gh"));
    }

    #[tokio::test]
    async fn secret_files_are_trimmed() {
        let dir = std::env::temp_dir().join(format!("repobot-secrets-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir)
            .await
            .expect("temp dir should be writable");
        tokio::fs::write(dir.join("bot_token"), "token\n")
            .await
            .expect("temp dir should be writable");

        let value = SecretFiles::new(&dir).get(SecretKey::BotToken).await;
        let missing = SecretFiles::new(&dir).get(SecretKey::GithubToken).await;

        tokio::fs::remove_dir_all(&dir).await.ok();

        assert_eq!(value.as_deref(), Some("token"));
        assert_eq!(missing, None);
    }

    #[test]
    fn debug_redacts() {
        let secrets = Secrets {
            bot_token: "hunter2".to_owned(),
            github_token: Some("ghp_secret".to_owned()),
        };

        let debug = format!("{secrets:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("ghp_secret"));
    }
}
