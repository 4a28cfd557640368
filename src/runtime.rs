//! Runtime context and the unread-message loop.

use tracing::{debug, error, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{BotError, InboxMessage, Res, RunSummary},
    },
    interaction::{issue, mention, notify},
    service::{inbox::InboxClient, tracker::TrackerClient},
};

/// Runtime service context for one run.
///
/// Holds the configuration and both authenticated sessions; constructed once
/// at startup and passed to everything that needs it.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The messaging provider session.
    pub inbox: InboxClient,
    /// The issue tracker session.
    pub tracker: TrackerClient,
}

impl Runtime {
    /// Log in to both providers.
    ///
    /// If the tracker login fails the inbox session is revoked before returning.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        let inbox = InboxClient::reddit(&config).await.map_err(BotError::Authentication)?;

        let tracker = match TrackerClient::github(&config).await {
            Ok(tracker) => tracker,
            Err(err) => {
                if let Err(logout) = inbox.logout().await {
                    warn!("Failed to log out after login failure: {:#}", logout);
                }
                return Err(BotError::Authentication(err).into());
            }
        };

        info!("Logins successful");

        Ok(Self { config, inbox, tracker })
    }

    /// Drain the unread set, then log out whatever the outcome.
    pub async fn start(&self) -> Res<RunSummary> {
        let result = self.check_messages().await;

        if let Err(err) = self.inbox.logout().await {
            warn!("Failed to log out: {:#}", err);
        }

        result
    }

    /// Process every unread mention.
    ///
    /// Non-mentions are left unread. Each mention is marked read exactly once
    /// after its attempt, whether or not the attempt succeeded.
    #[instrument(skip_all)]
    pub async fn check_messages(&self) -> Res<RunSummary> {
        let messages = self.inbox.unread().await.map_err(BotError::InboxUnavailable)?;

        let mut summary = RunSummary {
            seen: messages.len(),
            ..Default::default()
        };

        for message in &messages {
            if !message.is_mention() {
                debug!("Skipping message {} with subject `{}`", message.id, message.subject);
                continue;
            }

            summary.mentions += 1;

            match self.act_on_mention(message).await {
                Ok(replied) => {
                    summary.filed += 1;
                    if replied {
                        summary.replied += 1;
                    }
                }
                Err(err) => {
                    summary.failed += 1;
                    error!("Error while handling message {}: {}", message.id, err);
                }
            }

            if let Err(cause) = self.inbox.mark_as_read(message).await {
                let err = BotError::MarkRead { id: message.id.clone(), cause };
                error!("{}", err);
            }
        }

        info!(
            seen = summary.seen,
            mentions = summary.mentions,
            filed = summary.filed,
            replied = summary.replied,
            failed = summary.failed,
            "Unread processed"
        );

        Ok(summary)
    }

    /// Parse, file and acknowledge one mention; returns whether a reply was posted.
    #[instrument(skip_all, fields(id = %message.id))]
    pub async fn act_on_mention(&self, message: &InboxMessage) -> Result<bool, BotError> {
        info!("Acting on mention from {}", message.author);

        let parsed = mention::parse(message, self.inbox.username())?;
        let created = issue::compose_and_submit(&parsed, &message.author, &self.config, &self.tracker).await?;
        let replied = notify::notify(message, &created.html_url, &self.config, &self.inbox).await?;

        Ok(replied)
    }
}
