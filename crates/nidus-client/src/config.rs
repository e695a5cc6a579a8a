//! Environment configuration.
//!
//! Two connection parameters select the remote store. When either is
//! absent the client degrades to demo mode — an unauthenticated
//! in-memory store seeded with a demo workspace — instead of failing
//! hard.

use std::time::Duration;

use nidus_db::DbConfig;
use tracing::warn;

use crate::cache::DEFAULT_STALE_AFTER;
use crate::upload::UploadPolicy;

/// Environment variable naming the SurrealDB WebSocket URL.
pub const ENV_DB_URL: &str = "NIDUS_DB_URL";
/// Environment variable carrying the anonymous API key.
pub const ENV_DB_KEY: &str = "NIDUS_DB_KEY";

/// Which store the client talks to.
#[derive(Debug, Clone)]
pub enum StoreTarget {
    Remote(DbConfig),
    Demo,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub target: StoreTarget,
    pub stale_after: Duration,
    pub upload: UploadPolicy,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let url = std::env::var(ENV_DB_URL).ok().filter(|v| !v.is_empty());
        let key = std::env::var(ENV_DB_KEY).ok().filter(|v| !v.is_empty());

        let target = match (url, key) {
            (Some(url), Some(key)) => StoreTarget::Remote(DbConfig {
                url,
                namespace: "nidus".into(),
                database: "main".into(),
                username: "anon".into(),
                password: key,
            }),
            _ => {
                warn!(
                    "{ENV_DB_URL}/{ENV_DB_KEY} not set; falling back to demo mode"
                );
                StoreTarget::Demo
            }
        };

        Self {
            target,
            stale_after: DEFAULT_STALE_AFTER,
            upload: UploadPolicy::default(),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self.target, StoreTarget::Demo)
    }
}
