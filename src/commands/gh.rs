use std::{future::Future, time::Duration};

use poise::{serenity_prelude as serenity, CreateReply, ReplyHandle};
use tracing::{debug, instrument, warn};

use crate::{
    commands::LogCommands,
    errors::SendMessageError,
    help::HelpEntry,
    utils::{poise::CommandResult, Context},
};

mod core;
use self::core::{Responder, Response};

mod report;

pub fn help_entry() -> HelpEntry {
    HelpEntry::new(
        "gh",
        "Utilities",
        "Displays information related to a github repo.",
        "`{prefix}gh (repo)`\n\
         \n\
         Or, in response to a message containing a github repo\n\
         `{prefix}gh`\n\
         \n\
         Repos can be in the format `https://github.com/user/repo` or just `user/repo`.\n\
         \n\
         Options:\n\
         `.general`: Display general information related to the repo.\n\
         `.owner`: Display information about the repo owner.\n\
         `.all`: Display everything.",
    )
}

/// displays information related to a github repo
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    aliases("github"),
    category = "Utilities",
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn gh(
    ctx: Context<'_>,
    #[rest]
    #[description = "repos to look up, plus .general, .owner or .all"]
    text: Option<String>,
) -> crate::Result<()> {
    ctx.log_command().await;

    _gh(ctx, text.unwrap_or_default(), replied_to(ctx)).await?;

    Ok(())
}

/// the same lookup, run on any message from its context menu
#[instrument(skip_all)]
#[poise::command(context_menu_command = "GitHub repos", category = "Utilities")]
pub async fn gh_message(ctx: Context<'_>, message: serenity::Message) -> crate::Result<()> {
    ctx.log_command().await;

    _gh(ctx, String::new(), std::future::ready(Some(message.content))).await?;

    Ok(())
}

async fn _gh(
    ctx: Context<'_>,
    text: String,
    replied_to: impl Future<Output = Option<String>>,
) -> CommandResult {
    let mut status = StatusMessage::new(ctx);

    core::run(ctx.data().github(), &text, replied_to, &mut status).await
}

/// Content of the message a prefix invocation replied to.
///
/// A reply that can't be fetched (deleted, no access) counts as no reply.
async fn replied_to(ctx: Context<'_>) -> Option<String> {
    let poise::Context::Prefix(prefix) = ctx else {
        return None;
    };

    if let Some(message) = prefix.msg.referenced_message.as_deref() {
        return Some(message.content.clone());
    }

    // the gateway leaves `referenced_message` empty sometimes, even for replies
    let id = prefix.msg.message_reference.as_ref()?.message_id?;
    debug!(%id, "fetching replied-to message");

    match ctx.channel_id().message(ctx.serenity_context(), id).await {
        Ok(message) => Some(message.content),
        Err(err) => {
            warn!(%id, %err, "could not fetch replied-to message, ignoring it");
            None
        }
    }
}

/// One bot reply, edited in place for every response.
struct StatusMessage<'a> {
    ctx: Context<'a>,
    handle: Option<ReplyHandle<'a>>,
    notice_delay: Duration,
}

impl<'a> StatusMessage<'a> {
    fn new(ctx: Context<'a>) -> Self {
        Self {
            ctx,
            handle: None,
            notice_delay: ctx.data().config().bot.notice_delay(),
        }
    }
}

impl Responder for StatusMessage<'_> {
    async fn respond(&mut self, response: Response) -> Result<(), SendMessageError> {
        let builder = CreateReply::default().content(response.to_string());

        let handle = match self.handle.take() {
            Some(handle) => {
                handle.edit(self.ctx, builder).await?;
                handle
            }
            None => self.ctx.send(builder.reply(true)).await?,
        };

        if response.is_transient() {
            tokio::time::sleep(self.notice_delay).await;
            handle.delete(self.ctx).await?;
        } else {
            self.handle = Some(handle);
        }

        Ok(())
    }
}
