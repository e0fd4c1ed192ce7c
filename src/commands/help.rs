use tracing::instrument;

use crate::{
    help::HelpEntry,
    utils::{
        poise::{CommandResult, ContextExt},
        Context,
    },
};

pub fn help_entry() -> HelpEntry {
    HelpEntry::new(
        "help",
        "Meta",
        "Lists every command, or explains one of them.",
        "`{prefix}help`\n`{prefix}help (command)`",
    )
}

// displays command help text
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    category = "Meta",
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "specific command to display help for"] command: Option<String>,
) -> crate::Result<()> {
    _help(ctx, command).await?;
    Ok(())
}

async fn _help(ctx: Context<'_>, command: Option<String>) -> CommandResult {
    let data = ctx.data();
    let text = data
        .help()
        .render(command.as_deref(), data.config().bot.prefix());

    ctx.reply_ext(text).await?;

    Ok(())
}
