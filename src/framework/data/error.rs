use crate::github::GithubError;

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error("error setting up github client: {0}")]
    Github(#[from] GithubError),
}
