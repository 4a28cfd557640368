//! Mention parsing.

use regex::Regex;

use crate::base::{
    templates::CONTEXT_SUFFIX,
    types::{BotError, InboxMessage, ParsedMention},
};

/// Label attached to notes that ask something.
pub const QUESTION_LABEL: &str = "question";

/// The literal token that addresses `username` in comment text.
pub fn mention_token(username: &str) -> String {
    format!("/u/{username}")
}

/// Extract the rest of the line following `token` and a single space.
///
/// Returns `None` when the body does not contain `token <note>`, or when the
/// note is blank.
pub fn extract_note(body: &str, token: &str) -> Option<String> {
    let pattern = Regex::new(&format!("{} (.+)", regex::escape(token))).ok()?;
    let captures = pattern.captures(body)?;
    let note = captures[1].trim_end_matches('\r');

    if note.trim().is_empty() {
        return None;
    }

    Some(note.to_string())
}

/// Labels for a note: `question` iff it contains a `?`.
pub fn classify(note: &str) -> Vec<String> {
    if note.contains('?') { vec![QUESTION_LABEL.to_string()] } else { Vec::new() }
}

/// Parse a mention of `username` into issue material.
///
/// Root comments point at the submission itself; replies deeper in a thread
/// name their author and link to the comment with surrounding context.
pub fn parse(message: &InboxMessage, username: &str) -> Result<ParsedMention, BotError> {
    let token = mention_token(username);

    let note = extract_note(&message.body, &token).ok_or_else(|| BotError::MalformedMention {
        id: message.id.clone(),
        token: token.clone(),
    })?;

    let labels = classify(&note);

    let (title, context) = if message.is_root {
        (message.submission.title.clone(), message.submission.permalink.clone())
    } else {
        (
            format!("{} on {}", message.author, message.submission.title),
            format!("{}{CONTEXT_SUFFIX}", message.permalink),
        )
    };

    Ok(ParsedMention { note, labels, title, context })
}
