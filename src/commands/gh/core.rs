use std::{fmt::Display, future::Future};

use thisslime::TracingError;
use tracing::{debug, instrument, warn};

use super::report::{self, DisplayFlags};
use crate::{
    errors::{CommandError, SendMessageError},
    github::{Github, GithubError, RepoProvider, RepoReference},
    utils::{arguments::parse_arguments, poise::CommandResult},
};

/// Everything the command can show the user, in the order it can show it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    NotConfigured,
    NothingToPaste,
    NoReposFound,
    Fetching(usize),
    Report(String),
}

impl Response {
    /// Deleted again after a short delay.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::NoReposFound)
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => f.write_str("Github information has not been set up"),
            Self::NothingToPaste => f.write_str("There's nothing to paste."),
            Self::NoReposFound => f.write_str("No GitHub repos found"),
            Self::Fetching(count) => write!(f, "Fetching information for {count} repo(s)..."),
            Self::Report(text) => f.write_str(text),
        }
    }
}

/// Where responses go. Each response replaces the previous one.
pub trait Responder {
    async fn respond(&mut self, response: Response) -> Result<(), SendMessageError>;
}

/// Runs one `gh` invocation.
///
/// `text` is whatever followed the command. `replied_to` resolves to the
/// content of the message it was replying to, and is only awaited when
/// `text` has nothing left after the flags.
#[instrument(skip_all)]
pub async fn run<P: RepoProvider>(
    github: &Github<P>,
    text: &str,
    replied_to: impl Future<Output = Option<String>>,
    responder: &mut impl Responder,
) -> CommandResult {
    let Some(provider) = github.provider() else {
        warn!("gh used without github configured");
        responder.respond(Response::NotConfigured).await?;
        return Ok(());
    };

    let (arguments, body) = parse_arguments(text, DisplayFlags::NAMES);
    let flags = DisplayFlags::from_arguments(&arguments);
    debug!(?flags);

    let body = if body.is_empty() {
        replied_to
            .await
            .map(|reply| reply.trim().to_owned())
            .unwrap_or_default()
    } else {
        body
    };

    if body.is_empty() {
        responder.respond(Response::NothingToPaste).await?;
        return Ok(());
    }

    let references = RepoReference::extract(&body);

    if references.is_empty() {
        responder.respond(Response::NoReposFound).await?;
        return Ok(());
    }

    responder
        .respond(Response::Fetching(references.len()))
        .await?;

    let report = fetch_reports(provider, &references, flags).await?;
    responder.respond(Response::Report(report)).await?;

    Ok(())
}

async fn fetch_reports(
    provider: &impl RepoProvider,
    references: &[RepoReference],
    flags: DisplayFlags,
) -> Result<String, CommandError> {
    let mut reports = Vec::with_capacity(references.len());
    let mut invalid = Vec::new();

    for reference in references {
        match provider.repository(reference).await {
            Ok(repository) => reports.push(report::build(provider, &repository, flags).await?),
            Err(GithubError::NotFound(err)) => {
                err.trace();
                warn!(%reference, path = err.path(), "repo not found, listing as invalid");
                invalid.push(reference.to_string());
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(compose(&reports, &invalid))
}

/// Reports separated by blank lines, then the invalid references.
///
/// The invalid references are run together with nothing between them.
// TODO: decide on a separator for invalid repos (newline or comma) and update the test
fn compose(reports: &[String], invalid: &[String]) -> String {
    let mut message = reports.join("\n\n");

    if !invalid.is_empty() {
        message.push_str("**Invalid repos:**");
        for reference in invalid {
            message.push_str(reference);
        }
    }

    message
}
