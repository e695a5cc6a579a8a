//! Profile resolution and dashboard routing for signed-in sessions.
//!
//! The profile for an authenticated user id is fetched once per session
//! and memoized; routing is then a pure function of that outcome. The
//! caller holds [`RouteState::Loading`] while `route` is in flight.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use nidus_core::dashboard::{self, RouteState};
use nidus_core::error::NidusError;
use nidus_core::models::profile::{Profile, UpdateProfile};
use nidus_core::repository::Repository;
use tracing::warn;
use uuid::Uuid;

use crate::cache::fetch_with_retry;

/// Session-scoped profile resolver.
pub struct Sessions<S> {
    store: S,
    resolved: Mutex<HashMap<Uuid, Profile>>,
}

impl<S> Sessions<S>
where
    S: Repository<Profile>,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the dashboard route for an authenticated user id.
    ///
    /// The first successful resolution stamps `last_login`; bookkeeping
    /// failures are logged, never surfaced. A missing profile row routes
    /// to `NoProfile`; any other fetch failure is terminal for this
    /// render pass and surfaces as `Error`.
    pub async fn route(&self, user_id: Uuid) -> RouteState {
        if let Some(profile) = self.cached(user_id) {
            return dashboard::route(Some(&profile));
        }

        let fetched =
            fetch_with_retry(|| <S as Repository<Profile>>::get(&self.store, user_id)).await;

        match fetched {
            Ok(profile) => {
                let profile = self.stamp_last_login(profile).await;
                self.remember(profile.clone());
                dashboard::route(Some(&profile))
            }
            Err(NidusError::NotFound { .. }) => RouteState::NoProfile,
            Err(err) => RouteState::Error(err.to_string()),
        }
    }

    /// Drop the memoized profile, e.g. on sign-out.
    pub fn forget(&self, user_id: Uuid) {
        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user_id);
    }

    fn cached(&self, user_id: Uuid) -> Option<Profile> {
        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .cloned()
    }

    fn remember(&self, profile: Profile) {
        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.id, profile);
    }

    async fn stamp_last_login(&self, profile: Profile) -> Profile {
        let update = UpdateProfile {
            last_login: Some(Utc::now()),
            ..Default::default()
        };
        match <S as Repository<Profile>>::update(&self.store, profile.id, update).await {
            Ok(stamped) => stamped,
            Err(err) => {
                warn!(error = %err, user_id = %profile.id, "failed to stamp last_login");
                profile
            }
        }
    }
}
