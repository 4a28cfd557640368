//! Per-message handling for the bot.
//!
//! This module turns one mention notification into tracker and inbox actions:
//! - Parsing the note, labels, title and context out of a mention
//! - Composing and filing the issue
//! - Replying with the issue link when enabled

pub mod issue;
pub mod mention;
pub mod notify;
