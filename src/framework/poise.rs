use poise::PrefixFrameworkOptions;
use tracing::{info, trace};

use crate::{
    commands,
    errors::{self, CommandError, Error},
    utils::serenity::channel::ChannelIdExt,
};

use super::{config::ConfigSetup, data::PoiseData};

pub fn build(setup: ConfigSetup, notify: bool) -> poise::Framework<PoiseData, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::list(),
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(setup.bot.prefix().to_string()),
                ..Default::default()
            },
            on_error: errors::handle_framework_error,
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                let http = ctx.http.clone();
                let commands = framework.options().commands.as_ref();

                if let Some(guild_id) = setup.bot.testing_server() {
                    poise::builtins::register_in_guild(&http, commands, *guild_id)
                        .await
                        .map_err(CommandError::from)?;
                }

                poise::builtins::register_globally(&http, commands)
                    .await
                    .map_err(CommandError::from)?;

                ctx.set_activity(setup.bot.activity());

                info!(user = %ready.user.name, "connected");
                trace!("finished setup, accepting commands");

                if let Some(status_channel) = setup.bot.status_channel() {
                    if notify {
                        status_channel
                            .say_ext(&http, "ready!")
                            .await
                            .map_err(CommandError::from)?;
                    }
                }

                Ok(PoiseData::new(setup)?)
            })
        })
        .build()
}
