#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

mod cli;
use cli::{Cli, Command};

/// Functionality called from Discord.
mod commands;

mod errors;
pub use errors::Error;

mod framework;
pub use framework::data::PoiseData;

mod github;
mod help;
mod utils;

use clap::Parser;
use poise::serenity_prelude::{self as serenity, GatewayIntents};
use tracing::{debug, info};
use tracing_unwrap::ResultExt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

fn build_description() -> String {
    if built_info::DEBUG {
        let branch = built_info::GIT_HEAD_REF
            .map(|s| s.trim_start_matches("refs/heads/"))
            .unwrap_or("DETACHED");

        format!(
            "development branch {} (`{}`)",
            branch,
            built_info::GIT_COMMIT_HASH_SHORT.unwrap_or("unknown commit")
        )
    } else {
        format!("release {}", built_info::PKG_VERSION)
    }
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv().ok();
    let cli = Cli::parse();

    framework::logging::init_tracing(cli.log_filter.as_deref());
    info!("{}", build_description());

    if let Some(path) = dotenv {
        debug!(path = %path.display(), "loaded variables from .env");
    }

    let setup = framework::config::ConfigSetup::load(&cli.config)
        .await
        .expect_or_log("config should load");

    match cli.command {
        Command::Config => println!("{setup}"),
        Command::Start(..) => {
            if let Some(flavor_text) = setup.logs.flavor_text() {
                info!("{flavor_text}");
            }

            let token = setup.token().to_owned();
            let framework = framework::poise::build(setup, cli.notify_on_start());

            let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
            let mut client = serenity::Client::builder(token, intents)
                .framework(framework)
                .await
                .expect_or_log("client should be valid");

            client
                .start()
                .await
                .expect_or_log("client should not return error");
        }
    }
}
