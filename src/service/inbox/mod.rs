pub mod reddit;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{InboxMessage, Res, Void};

// Traits.

/// Generic "inbox" trait that messaging providers must implement.
///
/// An implementation holds an authenticated session for the lifetime of the
/// run and is torn down with [`GenericInboxClient::logout`].
#[async_trait]
pub trait GenericInboxClient: Send + Sync + 'static {
    /// The account name the session is authenticated as.
    fn username(&self) -> &str;

    /// List every unread message, oldest first.
    async fn unread(&self) -> Res<Vec<InboxMessage>>;

    /// Post `text` as a reply directly beneath `message`.
    async fn reply(&self, message: &InboxMessage, text: &str) -> Void;

    /// Flag `message` as read.
    async fn mark_as_read(&self, message: &InboxMessage) -> Void;

    /// Revoke the session.
    async fn logout(&self) -> Void;
}

// Structs.

/// Inbox client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct InboxClient {
    inner: Arc<dyn GenericInboxClient>,
}

impl Deref for InboxClient {
    type Target = dyn GenericInboxClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl InboxClient {
    pub fn new(inner: Arc<dyn GenericInboxClient>) -> Self {
        Self { inner }
    }
}
