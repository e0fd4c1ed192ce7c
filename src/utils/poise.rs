use poise::CreateReply;

use crate::{errors::SendMessageError, framework::data::PoiseData};

pub type Context<'a> = poise::Context<'a, PoiseData, crate::errors::Error>;

pub type Error = crate::errors::CommandError;
pub type Command = poise::Command<PoiseData, crate::errors::Error>;
pub type CommandResult = Result<(), Error>;

pub trait ContextExt {
    async fn reply_ext(
        &self,
        text: impl Into<String>,
    ) -> Result<poise::ReplyHandle<'_>, SendMessageError>;
}

impl ContextExt for Context<'_> {
    async fn reply_ext(
        &self,
        text: impl Into<String>,
    ) -> Result<poise::ReplyHandle<'_>, SendMessageError> {
        let builder = CreateReply::default().reply(true).content(text);
        self.send(builder).await.map_err(SendMessageError::from)
    }
}
