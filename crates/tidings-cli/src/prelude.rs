use super::*;

pub use cli::*;
pub use config::*;
pub use logging::*;
pub use newsapi::*;
pub use serve::*;

pub(crate) mod internal {
    pub use std::path::PathBuf;
    pub use std::sync::Arc;

    pub use anyhow::{Result, bail};
    pub use chrono::Utc;
    pub use clap::Parser;
    pub use serde::{Deserialize, Serialize};
    pub use tidings_news::prelude::{self as news};
    pub use tokio::sync::Mutex;
    pub use tokio::task::JoinSet;
    pub use tokio_util::sync::CancellationToken;
}
