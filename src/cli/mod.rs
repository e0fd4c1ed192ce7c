use std::path::PathBuf;

#[cfg(not(feature = "docker"))]
const DEFAULT_CONFIG: &str = "./repobot.toml";

#[cfg(feature = "docker")]
const DEFAULT_CONFIG: &str = "/repobot.toml";

#[derive(clap::Parser, Debug, Clone)]
#[command(version, about = "discord bot that looks up github repos")]
pub struct Cli {
    /// path to the TOML config file
    #[arg(long, env = "REPOBOT_TOML", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// tracing filter directives, used when RUST_LOG is unset
    #[arg(long)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn notify_on_start(&self) -> bool {
        if let Command::Start(start) = &self.command {
            start.notify
        } else {
            false
        }
    }
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// connect to discord and start handling commands
    Start(Start),

    /// print the loaded config with secrets redacted
    Config,
}

#[derive(clap::Args, Debug, Clone)]
pub struct Start {
    /// say "ready!" in the status channel once connected
    #[arg(long)]
    notify: bool,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn start_with_notify() {
        let cli = Cli::try_parse_from(["repobot", "--config", "bot.toml", "start", "--notify"])
            .expect("arguments should parse");

        assert_eq!(cli.config, Path::new("bot.toml"));
        assert!(cli.notify_on_start());
    }

    #[test]
    fn config_never_notifies() {
        let cli = Cli::try_parse_from(["repobot", "--log-filter", "repobot=debug", "config"])
            .expect("arguments should parse");

        assert!(matches!(cli.command, Command::Config));
        assert_eq!(cli.log_filter.as_deref(), Some("repobot=debug"));
        assert!(!cli.notify_on_start());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["repobot"]).is_err());
    }
}
