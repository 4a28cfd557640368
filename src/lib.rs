//! Library root for `podcast-bot`.
//!
//! Podcast-bot watches a Reddit account's inbox for username mentions and
//! turns each one into a GitHub issue:
//! - Extract the note that follows the mention and tag questions
//! - File an issue crediting the commenter with a link back to the discussion
//! - Optionally reply on Reddit with the issue link
//!
//! Both remote services sit behind traits so the loop can be driven by any
//! implementation; Reddit and GitHub are the ones shipped.

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{
    config::Config,
    types::{Res, RunSummary},
};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Logs in to both providers, drains the unread inbox once, and logs out.
/// Setup failures are returned; per-message failures only show up in the
/// summary and the log.
pub async fn start(config: Config) -> Res<RunSummary> {
    info!("Starting podcast-bot ...");

    // Log in.
    let runtime = runtime::Runtime::new(config).await?;

    // Drain the inbox.
    runtime.start().await
}
