//! In-memory relational store.
//!
//! [`InMemoryStore`] keeps every table behind a single lock and reproduces the
//! constraints of the `PostgreSQL` schema: generated identifiers, unique email
//! and membership pairs, restricted owner deletion, cascading project and
//! membership deletion, and nulling of task assignees.

mod projects;
mod state;
mod tasks;
mod users;

use state::StoreState;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory store implementing every repository port.
///
/// Clones share the same underlying tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, std::io::Error> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, std::io::Error> {
        self.state.write().map_err(poisoned)
    }
}

fn poisoned<T>(err: PoisonError<T>) -> std::io::Error {
    std::io::Error::other(err.to_string())
}
