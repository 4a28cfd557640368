pub mod github;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{IssueReference, NewIssue, Res};

// Traits.

/// Generic issue tracker trait that clients must implement.
#[async_trait]
pub trait GenericTrackerClient: Send + Sync + 'static {
    /// Create one issue in `owner/repo`.
    ///
    /// There is no deduplication: two calls with the same input create two issues.
    async fn create_issue(&self, owner: &str, repo: &str, issue: &NewIssue) -> Res<IssueReference>;
}

// Structs.

/// Issue tracker client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct TrackerClient {
    inner: Arc<dyn GenericTrackerClient>,
}

impl Deref for TrackerClient {
    type Target = dyn GenericTrackerClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl TrackerClient {
    pub fn new(inner: Arc<dyn GenericTrackerClient>) -> Self {
        Self { inner }
    }
}
