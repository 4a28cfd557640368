//! GitHub issues over the REST API.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{IssueReference, NewIssue, Res},
};

use super::{GenericTrackerClient, TrackerClient};

// Extra methods on `TrackerClient` applied by the github implementation.

impl TrackerClient {
    /// Log in to GitHub with the configured account.
    pub async fn github(config: &Config) -> Res<Self> {
        let client = GithubTrackerClient::login(config).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// GitHub client using basic authentication (login plus password or token).
#[derive(Clone)]
pub struct GithubTrackerClient {
    http: reqwest::Client,
    api_base: String,
    username: String,
    password: String,
}

impl GithubTrackerClient {
    /// Build the client and verify the credentials against `GET /user`.
    #[instrument(name = "GithubTrackerClient::login", skip_all)]
    pub async fn login(config: &Config) -> Res<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to create github http client")?;

        let client = Self {
            http,
            api_base: config.github_api_base.trim_end_matches('/').to_string(),
            username: config.gh_username.clone(),
            password: config.gh_password.clone(),
        };

        #[derive(Deserialize)]
        struct Viewer {
            login: String,
        }

        let response = client
            .http
            .get(format!("{}/user", client.api_base))
            .basic_auth(&client.username, Some(&client.password))
            .send()
            .await
            .context("failed to reach github")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("GitHub rejected the login: HTTP {status}"));
        }

        let viewer: Viewer = response.json().await?;
        info!("Logged in to GitHub as {}", viewer.login);

        Ok(client)
    }
}

#[async_trait]
impl GenericTrackerClient for GithubTrackerClient {
    #[instrument(skip(self, issue), fields(title = %issue.title))]
    async fn create_issue(&self, owner: &str, repo: &str, issue: &NewIssue) -> Res<IssueReference> {
        let response = self
            .http
            .post(format!("{}/repos/{owner}/{repo}/issues", self.api_base))
            .basic_auth(&self.username, Some(&self.password))
            .json(issue)
            .send()
            .await
            .context("failed to create github issue")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("failed to create github issue: HTTP {status}: {detail}"));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::base::config::ConfigInner;

    fn server_config(server: &MockServer) -> Config {
        Config::from(ConfigInner {
            gh_username: "octocat".into(),
            gh_password: "ghp_token".into(),
            user_agent: "podcast-bot-tests".into(),
            github_api_base: server.base_url(),
            request_timeout_secs: 5,
            ..Default::default()
        })
    }

    fn mock_user(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET)
                .path("/user")
                .header("accept", "application/vnd.github+json")
                .header("x-github-api-version", "2022-11-28");
            then.status(200).json_body(json!({ "login": "octocat", "id": 1 }));
        })
    }

    fn issue() -> NewIssue {
        NewIssue {
            title: "alice on Episode 42".into(),
            body: "Submitted by: [alice](https://reddit.com/u/alice)".into(),
            labels: vec!["question".into()],
        }
    }

    #[test]
    fn issue_payload_shape() {
        let issue = NewIssue {
            title: "alice on Episode 42".into(),
            body: "Submitted by: ...".into(),
            labels: vec!["question".into()],
        };

        let payload = serde_json::to_value(&issue).unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "title": "alice on Episode 42",
                "body": "Submitted by: ...",
                "labels": ["question"],
            })
        );
    }

    #[test]
    fn created_issue_response_parses() {
        let response = r#"{"id": 1, "number": 7, "html_url": "https://github.com/sysadmin/podcast/issues/7", "state": "open"}"#;

        let issue: IssueReference = serde_json::from_str(response).unwrap();

        assert_eq!(issue.number, 7);
        assert_eq!(issue.html_url, "https://github.com/sysadmin/podcast/issues/7");
    }

    #[tokio::test]
    async fn login_checks_the_user_endpoint() {
        let server = MockServer::start();
        let user = mock_user(&server);

        GithubTrackerClient::login(&server_config(&server)).await.unwrap();

        user.assert_calls(1);
    }

    #[tokio::test]
    async fn rejected_login_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/user");
            then.status(401).json_body(json!({ "message": "Bad credentials" }));
        });

        let err = GithubTrackerClient::login(&server_config(&server)).await.err().unwrap();

        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn create_issue_posts_to_the_repository() {
        let server = MockServer::start();
        mock_user(&server);
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/sysadmin/podcast/issues")
                .body_includes("\"title\":\"alice on Episode 42\"")
                .body_includes("\"labels\":[\"question\"]");
            then.status(201).json_body(json!({
                "id": 1001,
                "number": 7,
                "html_url": "https://github.com/sysadmin/podcast/issues/7"
            }));
        });

        let client = GithubTrackerClient::login(&server_config(&server)).await.unwrap();
        let created = client.create_issue("sysadmin", "podcast", &issue()).await.unwrap();

        assert_eq!(created.number, 7);
        assert_eq!(created.html_url, "https://github.com/sysadmin/podcast/issues/7");
        create.assert_calls(1);
    }

    #[tokio::test]
    async fn create_issue_failure_carries_the_status() {
        let server = MockServer::start();
        mock_user(&server);
        server.mock(|when, then| {
            when.method(POST).path("/repos/sysadmin/podcast/issues");
            then.status(422).json_body(json!({ "message": "Validation Failed" }));
        });

        let client = GithubTrackerClient::login(&server_config(&server)).await.unwrap();
        let err = client.create_issue("sysadmin", "podcast", &issue()).await.unwrap_err();

        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("Validation Failed"));
    }
}
