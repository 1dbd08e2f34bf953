// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local persistence for the session and the profile cache.
//!
//! A small key-value abstraction with a file-backed implementation for the
//! CLI and an in-memory one for tests and embedding.

pub mod file;
pub mod memory;
pub mod profile;
pub mod session;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use profile::ProfileCache;
pub use session::SessionStore;

use crate::error::Result;

/// Storage key names as constants.
pub mod keys {
    pub const SESSION: &str = "calai_session";
    pub const PROFILE: &str = "calai_profile";
}

/// Minimal string key-value store.
///
/// Implementations must be cheap to call from async code; values are small
/// JSON documents.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
