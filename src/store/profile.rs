// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local profile cache.

use super::{keys, KeyValueStore};
use crate::error::{ApiError, Result};
use crate::models::Profile;
use std::sync::Arc;

/// Device-local copy of the user's profile.
#[derive(Clone)]
pub struct ProfileCache {
    backend: Arc<dyn KeyValueStore>,
}

impl ProfileCache {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Cached profile; malformed entries read as absent.
    pub fn get(&self) -> Option<Profile> {
        let raw = match self.backend.get(keys::PROFILE) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cached profile");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!(error = %e, "Failed to parse cached profile, ignoring it"))
            .ok()
    }

    pub fn set(&self, profile: &Profile) -> Result<()> {
        let raw = serde_json::to_string(profile)
            .map_err(|e| ApiError::Storage(format!("failed to encode profile: {}", e)))?;
        self.backend.set(keys::PROFILE, &raw)
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(keys::PROFILE) {
            tracing::warn!(error = %e, "Failed to clear cached profile");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;
    use crate::store::MemoryStore;

    #[test]
    fn test_profile_cache_round_trip() {
        let backend = Arc::new(MemoryStore::new());
        let cache = ProfileCache::new(backend.clone());
        assert_eq!(cache.get(), None);

        let profile = Profile {
            age: Some(28),
            goal: Goal::Gain,
            ..Default::default()
        };
        cache.set(&profile).unwrap();
        assert_eq!(cache.get(), Some(profile));

        backend.set(keys::PROFILE, "[1,2]").unwrap();
        assert_eq!(cache.get(), None);

        cache.clear();
        assert!(backend.is_empty());
    }
}
