//! Fixed text the bot produces.

/// Default User-Agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "podcast/github bot v1.0";

/// Query suffix asking the provider to render three levels of parent context.
pub const CONTEXT_SUFFIX: &str = "?context=3";

/// Render the issue body.
///
/// The three-line layout is consumed by people triaging the repository and
/// must stay byte-for-byte stable.
pub fn issue_body(profile_domain: &str, submitter: &str, context: &str, note: &str) -> String {
    format!("Submitted by: [{submitter}](https://{profile_domain}/u/{submitter})\nContext: {context}\nNote: {note}")
}

/// Join the reply text and the configured footer with a markdown hard break.
pub fn reply_text(text: &str, postfix: &str) -> String {
    format!("{text}  \n{postfix}")
}
