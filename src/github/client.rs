use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{
    error::{ApiError, BaseUrlError},
    GithubError, OwnerSummary, RepoProvider, RepoReference, RepositorySummary,
};

type Result<T, E = GithubError> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    api_url: reqwest::Url,
}

impl GithubClient {
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";
    pub const DEFAULT_USER_AGENT: &'static str = "repobot";

    const API_VERSION: &'static str = "2022-11-28";

    pub fn new(api_url: reqwest::Url, user_agent: &str, token: Option<&str>) -> Result<Self> {
        if api_url.cannot_be_a_base() {
            return Err(BaseUrlError { url: api_url }.into());
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(Self::API_VERSION),
        );

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        } else {
            tracing::warn!("no github token, using unauthenticated api access");
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &reqwest::Url {
        &self.api_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url> {
        // `.` and `..` would be normalized away and hit some other endpoint
        if segments.iter().any(|s| matches!(*s, "." | "..")) {
            return Err(GithubError::not_found(segments.join("/")));
        }

        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| BaseUrlError {
                url: self.api_url.clone(),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "querying github api");

        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(GithubError::not_found(segments.join("/"))),
            status if !status.is_success() => Err(ApiError {
                status,
                path: segments.join("/"),
            }
            .into()),
            _ => Ok(response.json().await?),
        }
    }
}

impl RepoProvider for GithubClient {
    #[instrument(skip_all, fields(%reference))]
    async fn repository(&self, reference: &RepoReference) -> Result<RepositorySummary> {
        self.get(&["repos", reference.owner(), reference.name()])
            .await
    }

    #[instrument(skip(self))]
    async fn user(&self, login: &str) -> Result<OwnerSummary> {
        self.get(&["users", login]).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Server;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{GithubClient, GithubError, RepoProvider, RepoReference};

    fn client(server: &Server, token: Option<&str>) -> GithubClient {
        GithubClient::new(
            server.url().parse().expect("mockito url should parse"),
            "repobot-tests",
            token,
        )
        .expect("client should build")
    }

    fn repository_json() -> serde_json::Value {
        json!({
            "id": 724712,
            "name": "rust",
            "full_name": "rust-lang/rust",
            "html_url": "https://github.com/rust-lang/rust",
            "owner": { "login": "rust-lang", "id": 5430905 },
            "stargazers_count": 90000,
            "watchers_count": 90000,
            "forks_count": 12000,
            "open_issues": 9000,
            "open_issues_count": 9000,
            "language": "Rust",
            "fork": false,
            "private": false
        })
    }

    #[tokio::test]
    async fn fetches_repository() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/rust-lang/rust")
            .match_header("accept", "application/vnd.github+json")
            .match_header("x-github-api-version", "2022-11-28")
            .match_header("user-agent", "repobot-tests")
            .with_header("content-type", "application/json")
            .with_body(repository_json().to_string())
            .create_async()
            .await;

        let repository = client(&server, None)
            .repository(&RepoReference::new("rust-lang", "rust"))
            .await
            .expect("repository should be found");

        mock.assert_async().await;
        assert_eq!(repository.full_name, "rust-lang/rust");
        assert_eq!(repository.language.as_deref(), Some("Rust"));
        assert_eq!(repository.owner_login(), "rust-lang");
    }

    #[tokio::test]
    async fn sends_token_as_bearer() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat")
            .match_header("authorization", "Bearer hunter2")
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": 583231,
                    "login": "octocat",
                    "url": "https://api.github.com/users/octocat",
                    "html_url": "https://github.com/octocat",
                    "name": "The Octocat",
                    "bio": null,
                    "company": "@github",
                    "email": null,
                    "followers": 20000,
                    "following": 9,
                    "public_repos": 8
                })
                .to_string(),
            )
            .create_async()
            .await;

        let user = client(&server, Some("hunter2"))
            .user("octocat")
            .await
            .expect("user should be found");

        mock.assert_async().await;
        assert_eq!(user.login, "octocat");
        assert_eq!(user.bio, None);
        assert_eq!(user.public_repos, 8);
        assert_eq!(user.url.as_str(), "https://api.github.com/users/octocat");
    }

    #[tokio::test]
    async fn missing_repository_is_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/nobody/nothing")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = client(&server, None)
            .repository(&RepoReference::new("nobody", "nothing"))
            .await
            .expect_err("repository should not be found");

        assert!(err.is_not_found(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn other_statuses_are_api_errors() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/rate/limited")
            .with_status(403)
            .create_async()
            .await;

        let err = client(&server, None)
            .repository(&RepoReference::new("rate", "limited"))
            .await
            .expect_err("request should fail");

        match err {
            GithubError::Api(err) => assert_eq!(err.status().as_u16(), 403),
            other => panic!("expected an api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dot_segments_never_leave_the_client() {
        let server = Server::new_async().await;

        let err = client(&server, None)
            .repository(&RepoReference::new("..", ".."))
            .await
            .expect_err("dot segments should be rejected");

        assert!(err.is_not_found());
    }

    #[test]
    fn keeps_base_path() {
        let client = GithubClient::new(
            "https://ghe.example.com/api/v3".parse().expect("valid url"),
            "repobot-tests",
            None,
        )
        .expect("client should build");

        assert_eq!(
            client
                .endpoint(&["repos", "foo", "bar"])
                .expect("endpoint should build")
                .as_str(),
            "https://ghe.example.com/api/v3/repos/foo/bar"
        );
    }
}
