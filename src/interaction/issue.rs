//! Issue composition and submission.

use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        templates,
        types::{BotError, IssueReference, NewIssue, ParsedMention},
    },
    service::tracker::TrackerClient,
};

/// Build the issue for a parsed mention credited to `submitter`.
pub fn compose(mention: &ParsedMention, submitter: &str, profile_domain: &str) -> NewIssue {
    NewIssue {
        title: mention.title.clone(),
        body: templates::issue_body(profile_domain, submitter, &mention.context, &mention.note),
        labels: mention.labels.clone(),
    }
}

/// Compose the issue and file it in the configured repository.
#[instrument(skip_all, fields(title = %mention.title))]
pub async fn compose_and_submit(mention: &ParsedMention, submitter: &str, config: &Config, tracker: &TrackerClient) -> Result<IssueReference, BotError> {
    let issue = compose(mention, submitter, &config.profile_domain);

    let created = tracker
        .create_issue(&config.repo_owner, &config.repository, &issue)
        .await
        .map_err(BotError::TrackerUnavailable)?;

    info!("Filed issue #{} at {}", created.number, created.html_url);

    Ok(created)
}
