//! Service integrations for external APIs and clients.
//!
//! This module contains the remote collaborators used by the bot:
//! - Inbox services (e.g., Reddit)
//! - Issue tracker services (e.g., GitHub)
//!
//! Each service module defines both a generic trait and a concrete implementation,
//! allowing for extensibility and easy testing.

pub mod inbox;
pub mod tracker;
