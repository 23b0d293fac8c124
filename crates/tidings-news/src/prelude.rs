use super::*;

pub use async_trait::async_trait as provider_trait;

pub use aggregator::*;
pub use article::*;
pub use cache::*;
pub use key::*;
pub use provider::*;
pub use refresher::*;

pub(crate) mod internal {
    pub use std::sync::Arc;

    pub use chrono::{DateTime, Duration, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use tokio::sync::Mutex;
}
