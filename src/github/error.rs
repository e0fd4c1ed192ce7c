use thisslime::TracingError;

#[derive(Debug, thiserror::Error, TracingError)]
#[span]
pub enum GithubError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("error from reqwest client: {0}")]
    #[event(level = ERROR)]
    Client(#[from] reqwest::Error),

    #[error("github token is not a valid header value")]
    #[event(level = ERROR)]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    BaseUrl(#[from] BaseUrlError),
}

impl GithubError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(NotFoundError { path: path.into() })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}

#[derive(Debug, thiserror::Error, TracingError)]
#[error("nothing found at {path}")]
#[event(level = WARN)]
pub struct NotFoundError {
    #[field(print = Display)]
    path: String,
}

impl NotFoundError {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, thiserror::Error, TracingError)]
#[error("github api returned {status} for {path}")]
#[event(level = ERROR)]
pub struct ApiError {
    #[field(print = Display)]
    pub(crate) status: reqwest::StatusCode,

    #[field(print = Display)]
    pub(crate) path: String,
}

impl ApiError {
    pub fn status(&self) -> reqwest::StatusCode {
        self.status
    }
}

#[derive(Debug, thiserror::Error, TracingError)]
#[error("{url} cannot be used as an api base url")]
#[event(level = ERROR)]
pub struct BaseUrlError {
    #[field(print = Display)]
    pub(crate) url: reqwest::Url,
}
