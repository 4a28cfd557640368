//! Acknowledgement replies.

use tracing::{debug, info, instrument};

use crate::{
    base::{
        config::Config,
        templates,
        types::{BotError, InboxMessage},
    },
    service::inbox::InboxClient,
};

/// Reply beneath `message` with `text` plus the configured footer.
///
/// Does nothing unless `reply` is enabled; returns whether a reply was posted.
#[instrument(skip_all, fields(id = %message.id))]
pub async fn notify(message: &InboxMessage, text: &str, config: &Config, inbox: &InboxClient) -> Result<bool, BotError> {
    if !config.reply {
        debug!("Replies disabled, not commenting on {}", message.id);
        return Ok(false);
    }

    let body = templates::reply_text(text, &config.reply_postfix);

    inbox.reply(message, &body).await.map_err(|cause| BotError::Notification {
        id: message.id.clone(),
        cause,
    })?;

    info!("Commented on {}:\n{}", message.id, body);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::{
        base::{
            config::ConfigInner,
            types::{Res, Void},
        },
        service::inbox::GenericInboxClient,
    };

    #[derive(Default)]
    struct RecordingInbox {
        replies: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl GenericInboxClient for RecordingInbox {
        fn username(&self) -> &str {
            "podcastbot"
        }

        async fn unread(&self) -> Res<Vec<InboxMessage>> {
            Ok(Vec::new())
        }

        async fn reply(&self, message: &InboxMessage, text: &str) -> Void {
            self.replies.lock().unwrap().push((message.id.clone(), text.to_string()));
            Ok(())
        }

        async fn mark_as_read(&self, _message: &InboxMessage) -> Void {
            Ok(())
        }

        async fn logout(&self) -> Void {
            Ok(())
        }
    }

    fn message() -> InboxMessage {
        InboxMessage { id: "def".into(), ..Default::default() }
    }

    #[tokio::test]
    async fn disabled_reply_is_a_no_op() {
        let recorder = Arc::new(RecordingInbox::default());
        let inbox = InboxClient::new(recorder.clone());
        let config = Config::from(ConfigInner { reply: false, ..Default::default() });

        let posted = notify(&message(), "https://github.com/o/r/issues/1", &config, &inbox).await.unwrap();

        assert!(!posted);
        assert!(recorder.replies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn enabled_reply_appends_postfix() {
        let recorder = Arc::new(RecordingInbox::default());
        let inbox = InboxClient::new(recorder.clone());
        let config = Config::from(ConfigInner {
            reply: true,
            reply_postfix: "^(beep boop)".into(),
            ..Default::default()
        });

        let posted = notify(&message(), "https://github.com/o/r/issues/1", &config, &inbox).await.unwrap();

        assert!(posted);
        assert_eq!(
            recorder.replies.lock().unwrap().as_slice(),
            &[("def".to_string(), "https://github.com/o/r/issues/1  \n^(beep boop)".to_string())]
        );
    }
}
