//! Reddit inbox over the OAuth REST API.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::base::{
    config::Config,
    types::{InboxMessage, Res, Submission, Void},
};

use super::{GenericInboxClient, InboxClient};

/// Largest page the listing endpoints accept.
const PAGE_SIZE: &str = "100";

/// Fullname prefix of submissions ("links").
const SUBMISSION_PREFIX: &str = "t3_";

// Extra methods on `InboxClient` applied by the reddit implementation.

impl InboxClient {
    /// Log in to Reddit with the configured script app and account.
    pub async fn reddit(config: &Config) -> Res<Self> {
        let client = RedditInboxClient::login(config).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Wire types.

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: RawMessage,
}

/// Inbox item as the listing returns it.
///
/// Comment notifications carry `context` and `link_title`; private messages don't.
#[derive(Debug, Default, Deserialize)]
struct RawMessage {
    id: String,
    name: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    body: String,
    author: Option<String>,
    parent_id: Option<String>,
    #[serde(default)]
    context: String,
    link_title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentResponse {
    json: CommentResponseJson,
}

#[derive(Debug, Deserialize)]
struct CommentResponseJson {
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

// Specific implementations.

/// Reddit inbox client holding a bearer token for the run.
#[derive(Clone)]
pub struct RedditInboxClient {
    http: reqwest::Client,
    username: String,
    token: String,
    client_id: String,
    client_secret: String,
    web_base: String,
    api_base: String,
}

impl RedditInboxClient {
    /// Exchange the account credentials for a bearer token (password grant).
    #[instrument(name = "RedditInboxClient::login", skip_all)]
    pub async fn login(config: &Config) -> Res<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to create reddit http client")?;

        let web_base = config.reddit_web_base.trim_end_matches('/').to_string();
        let api_base = config.reddit_api_base.trim_end_matches('/').to_string();

        let response = http
            .post(format!("{web_base}/api/v1/access_token"))
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[("grant_type", "password"), ("username", config.username.as_str()), ("password", config.password.as_str())])
            .send()
            .await
            .context("failed to request reddit access token")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Reddit token request failed: HTTP {status}"));
        }

        let token = match response.json::<AccessTokenResponse>().await? {
            AccessTokenResponse { access_token: Some(token), .. } => token,
            AccessTokenResponse { error: Some(error), .. } => return Err(anyhow!("Reddit rejected the login: {error}")),
            _ => return Err(anyhow!("Reddit token response carried no access token.")),
        };

        info!("Logged in to Reddit as {}", config.username);

        Ok(Self {
            http,
            username: config.username.clone(),
            token,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            web_base,
            api_base,
        })
    }

    /// POST a form to the OAuth API and fail on a non-success status.
    async fn post_form(&self, what: &str, path: &str, form: &[(&str, &str)]) -> Res<reqwest::Response> {
        let response = self
            .http
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(&self.token)
            .form(form)
            .send()
            .await
            .with_context(|| format!("failed to {what}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("failed to {what}: HTTP {status}"));
        }

        Ok(response)
    }
}

#[async_trait]
impl GenericInboxClient for RedditInboxClient {
    fn username(&self) -> &str {
        &self.username
    }

    #[instrument(skip(self))]
    async fn unread(&self) -> Res<Vec<InboxMessage>> {
        let mut messages = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(format!("{}/message/unread", self.api_base))
                .bearer_auth(&self.token)
                .query(&[("limit", PAGE_SIZE), ("raw_json", "1")]);

            if let Some(after) = after.as_deref() {
                request = request.query(&[("after", after)]);
            }

            let response = request.send().await.context("failed to list unread messages")?;

            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!("failed to list unread messages: HTTP {status}"));
            }

            let listing: Listing = response.json().await?;
            debug!("Fetched {} unread messages", listing.data.children.len());

            messages.extend(listing.data.children.into_iter().map(|thing| to_inbox_message(thing.data, &self.web_base)));

            match listing.data.after {
                Some(next) => after = Some(next),
                None => break,
            }
        }

        // The listing is newest first.
        messages.reverse();

        Ok(messages)
    }

    #[instrument(skip(self, message, text), fields(id = %message.id))]
    async fn reply(&self, message: &InboxMessage, text: &str) -> Void {
        let response = self
            .post_form("post reply", "/api/comment", &[("api_type", "json"), ("thing_id", message.fullname.as_str()), ("text", text)])
            .await?;

        let response: CommentResponse = response.json().await?;
        if !response.json.errors.is_empty() {
            return Err(anyhow!("Reddit refused the reply: {}", serde_json::Value::from(response.json.errors)));
        }

        Ok(())
    }

    #[instrument(skip(self, message), fields(id = %message.id))]
    async fn mark_as_read(&self, message: &InboxMessage) -> Void {
        self.post_form("mark message as read", "/api/read_message", &[("id", message.fullname.as_str())]).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Void {
        let response = self
            .http
            .post(format!("{}/api/v1/revoke_token", self.web_base))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("token", self.token.as_str()), ("token_type_hint", "access_token")])
            .send()
            .await
            .context("failed to revoke reddit token")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("failed to revoke reddit token: HTTP {status}"));
        }

        info!("Logged out of Reddit");

        Ok(())
    }
}

// Helpers.

fn to_inbox_message(raw: RawMessage, web_base: &str) -> InboxMessage {
    let (permalink, submission_permalink) = permalinks(web_base, &raw.context);
    let is_root = raw.parent_id.as_deref().is_some_and(|parent| parent.starts_with(SUBMISSION_PREFIX));

    InboxMessage {
        id: raw.id,
        fullname: raw.name,
        subject: raw.subject,
        body: raw.body,
        author: raw.author.unwrap_or_else(|| "[deleted]".to_string()),
        is_root,
        submission: Submission {
            title: raw.link_title.unwrap_or_default(),
            permalink: submission_permalink,
        },
        permalink,
    }
}

/// Derive the comment and submission permalinks from a listing `context` path
/// (`/r/<sub>/comments/<post>/<slug>/<comment>/?context=3`).
fn permalinks(web_base: &str, context: &str) -> (String, String) {
    let path = context.split('?').next().unwrap_or_default().trim_end_matches('/');
    if path.is_empty() {
        return (String::new(), String::new());
    }

    let comment = format!("{web_base}{path}/");
    let submission = match path.rsplit_once('/') {
        Some((parent, _)) => format!("{web_base}{parent}/"),
        None => comment.clone(),
    };

    (comment, submission)
}
