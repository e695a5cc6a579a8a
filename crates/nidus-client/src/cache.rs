//! Query cache and fetch policy.
//!
//! Realizes the data-fetching defaults the dashboards rely on: list
//! results are cached per (entity type, organization id) and considered
//! fresh for a stale window; stale or missing entries are refetched with
//! exactly one retry; mutations invalidate the matching entry. There is
//! no lock hierarchy — concurrent stores and invalidations are
//! last-write-wins, consistent with read-after-write dashboard
//! expectations rather than a high-consistency system.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use nidus_core::error::NidusResult;
use uuid::Uuid;

/// How long a cached list serves reads without touching the store.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(300);

/// Failed reads are retried this many times before the error surfaces.
pub const FETCH_RETRIES: u32 = 1;

struct Entry<T> {
    rows: Vec<T>,
    fetched_at: Instant,
}

/// Cached list results for one entity type, keyed by organization id.
pub struct QueryCache<T> {
    entries: Mutex<HashMap<Uuid, Entry<T>>>,
    stale_after: Duration,
}

impl<T: Clone> QueryCache<T> {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_after,
        }
    }

    /// Returns the cached rows if the entry exists and is still fresh.
    pub fn fresh(&self, organization_id: Uuid) -> Option<Vec<T>> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&organization_id)
            .filter(|entry| entry.fetched_at.elapsed() < self.stale_after)
            .map(|entry| entry.rows.clone())
    }

    pub fn store(&self, organization_id: Uuid, rows: Vec<T>) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            organization_id,
            Entry {
                rows,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, organization_id: Uuid) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(&organization_id);
    }
}

impl<T: Clone> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER)
    }
}

/// Run a read with the standard single-retry policy.
///
/// Mutations are never retried; a failed create/update surfaces to the
/// caller with the payload intact for correction and resubmission.
pub(crate) async fn fetch_with_retry<T, F, Fut>(mut op: F) -> NidusResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = NidusResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < FETCH_RETRIES => {
                attempt += 1;
                tracing::warn!(error = %err, attempt, "read failed, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}
