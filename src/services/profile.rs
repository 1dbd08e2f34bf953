// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile: backend settings plus the device-local cache.
//!
//! The backend only stores the daily calorie target and timezone. Body
//! measurements, goal and activity level stay in the local cache and are
//! used to compute the target pushed on save.

use crate::error::{ApiError, Result};
use crate::models::{BackendProfile, Profile, ProfileUpdate, WireProfile};
use crate::services::calories::effective_daily_target;
use crate::services::gateway::{ApiRequest, SessionGateway};
use crate::store::ProfileCache;

const PROFILE_PATH: &str = "/user/profile";

#[derive(Clone)]
pub struct ProfileClient {
    gateway: SessionGateway,
    cache: ProfileCache,
}

impl ProfileClient {
    pub fn new(gateway: SessionGateway, cache: ProfileCache) -> Self {
        Self { gateway, cache }
    }

    /// Backend-held profile fields.
    pub async fn fetch(&self) -> Result<BackendProfile> {
        let request = ApiRequest::get(PROFILE_PATH);
        let profile: WireProfile = self.gateway.fetch(&request, "load profile").await?;
        Ok(BackendProfile::from(profile))
    }

    /// Update the backend-held fields; absent fields are left untouched.
    pub async fn update(&self, mut update: ProfileUpdate) -> Result<BackendProfile> {
        update.timezone = update
            .timezone
            .map(|tz| tz.trim().to_string())
            .filter(|tz| !tz.is_empty());
        if update.daily_calorie_target == Some(0) {
            return Err(ApiError::Validation(
                "Daily calorie target must be greater than zero".into(),
            ));
        }
        if update.is_empty() {
            return Err(ApiError::Validation("Nothing to update".into()));
        }

        let request = ApiRequest::put(PROFILE_PATH).json(&update)?;
        let profile: WireProfile = self.gateway.fetch(&request, "update profile").await?;
        Ok(BackendProfile::from(profile))
    }

    /// Locally cached profile, without touching the network.
    pub fn cached(&self) -> Option<Profile> {
        self.cache.get()
    }

    /// Drop the local copy (on logout).
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Push the computed calorie target and cache the merged profile.
    pub async fn save(&self, mut profile: Profile) -> Result<Profile> {
        let target = effective_daily_target(&profile);
        let update = ProfileUpdate {
            daily_calorie_target: Some(target),
            timezone: profile.timezone.clone(),
        };

        let remote = self.update(update).await?;
        profile.daily_calorie_target = Some(target);
        profile.merge_backend(&remote);
        self.cache.set(&profile)?;

        tracing::info!(daily_calorie_target = target, "Profile saved");
        Ok(profile)
    }

    /// Refresh the cached profile from the backend.
    ///
    /// Falls back to the cached copy when the backend cannot be reached.
    pub async fn load(&self) -> Result<Profile> {
        match self.fetch().await {
            Ok(remote) => {
                let mut profile = self.cache.get().unwrap_or_default();
                profile.merge_backend(&remote);
                if let Err(e) = self.cache.set(&profile) {
                    tracing::warn!(error = %e, "Failed to update cached profile");
                }
                Ok(profile)
            }
            Err(e) if e.is_unreachable() => match self.cache.get() {
                Some(profile) => {
                    tracing::warn!(error = %e, "Backend unreachable, using cached profile");
                    Ok(profile)
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }
}
