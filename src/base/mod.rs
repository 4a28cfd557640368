//! Core components, types, and utilities for the bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Fixed text templates for issues and replies.
//! - Common types, error kinds and result handling.

pub mod config;
pub mod templates;
pub mod types;
