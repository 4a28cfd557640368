pub use crate::base::{
    config::Config,
    types::{BotError, Res, RunSummary, Void},
};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
