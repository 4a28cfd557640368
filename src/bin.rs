//! Binary entry point for `podcast-bot`.
//!
//! This module provides the command-line interface: it sets up logging,
//! loads the configuration, and runs one pass over the unread inbox.

use clap::Parser;
use podcast_bot::prelude::*;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file used unless `--stdout` is given.
const LOG_FILE: &str = "bot.log";

/// Podcast-bot: files GitHub issues for Reddit username mentions.
///
/// Configuration comes from `podcastbot.conf` (YAML) in the working
/// directory, with `PODCASTBOT_*` environment variables taking precedence.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Log informational messages, not only errors.
    #[arg(short, long)]
    verbose: bool,
    /// Print log output to stdout instead of `bot.log`.
    #[arg(long)]
    stdout: bool,
}

/// Main entry point for the podcast-bot binary.
///
/// Exits non-zero only when configuration or login fails, or the inbox
/// cannot be listed; failures on individual messages are logged.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = if args.verbose { tracing::Level::INFO } else { tracing::Level::ERROR };
    let level_filter = LevelFilter::from_level(level);

    // Prepare the log layer.

    let (writer, _guard) = if args.stdout {
        tracing_appender::non_blocking(std::io::stdout())
    } else {
        tracing_appender::non_blocking(tracing_appender::rolling::never(".", LOG_FILE))
    };

    let log = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(args.stdout)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry().with(level_filter).with(log).init();

    let result = run().await;

    if let Err(err) = &result {
        error!("{:#}", err);
    }

    result
}

async fn run() -> Void {
    let config = Config::load(None).map_err(BotError::Configuration)?;

    let summary = podcast_bot::start(config).await?;

    if summary.failed > 0 {
        warn!("{} of {} mentions failed", summary.failed, summary.mentions);
    }

    Ok(())
}
