use std::time::Duration;

use poise::serenity_prelude::{ActivityData, ChannelId, GuildId};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

#[derive(Deserialize, Debug, Clone)]
pub struct BotConfig {
    testing_server: Option<GuildId>,
    activity: Option<String>,
    prefix: String,
    status_channel: Option<ChannelId>,
    #[serde(default = "BotConfig::default_notice_delay")]
    notice_delay_secs: u64,
}

impl BotConfig {
    const fn default_notice_delay() -> u64 {
        3
    }

    pub fn testing_server(&self) -> Option<&GuildId> {
        if self.testing_server.is_none() {
            warn!("no testing server set in config, slash commands will only be registered globally");
        }

        self.testing_server.as_ref()
    }

    pub fn activity(&self) -> Option<ActivityData> {
        let Some(activity) = &self.activity else {
            warn!("no bot.activity provided in config, defaulting to none");
            return None;
        };

        if activity.is_empty() {
            warn!("bot.activity provided in config as empty string, defaulting to none");
            return None;
        }

        let Some(parsed_activity) = parse_activity(activity) else {
            error!("bot.activity in config could not be parsed, must start with `playing`, `listening to`, `watching` or `competing in`");
            warn!("disabling bot activity");
            return None;
        };

        debug!(
            "bot.activity parsed as {:?}: {}",
            parsed_activity.kind, parsed_activity.name
        );
        info!("successfully parsed bot activity from config");

        Some(parsed_activity)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn status_channel(&self) -> Option<ChannelId> {
        self.status_channel
    }

    /// How long transient notices stay up before they're deleted.
    pub fn notice_delay(&self) -> Duration {
        Duration::from_secs(self.notice_delay_secs)
    }
}

fn parse_activity(activity: &str) -> Option<ActivityData> {
    if let Some(name) = activity.strip_prefix("playing ") {
        Some(ActivityData::playing(name))
    } else if let Some(name) = activity.strip_prefix("listening to ") {
        Some(ActivityData::listening(name))
    } else if let Some(name) = activity.strip_prefix("watching ") {
        Some(ActivityData::watching(name))
    } else {
        activity
            .strip_prefix("competing in ")
            .map(ActivityData::competing)
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::ActivityType;
    use pretty_assertions::assert_eq;

    use super::parse_activity;

    macro_rules! activity_tests {
        ($($name:ident: $input:literal => $kind:ident, $text:literal);+ $(;)?) => {
            paste::paste! {
                $(
                    #[test]
                    fn [<activity_ $name>]() {
                        let activity = parse_activity($input).expect("activity should parse");
                        assert_eq!(activity.kind, ActivityType::$kind);
                        assert_eq!(activity.name, $text);
                    }
                )+
            }
        };
    }

    activity_tests! {
        playing: "playing with repos" => Playing, "with repos";
        listening: "listening to webhooks" => Listening, "webhooks";
        watching: "watching repos" => Watching, "repos";
        competing: "competing in a hackathon" => Competing, "a hackathon";
    }

    #[test]
    fn unknown_activity() {
        assert!(parse_activity("sleeping").is_none());
        assert!(parse_activity("watching").is_none());
    }
}
