//! In-process storage adapter.
//!
//! Implements every repository port over plain vectors guarded by a
//! `std::sync::RwLock`. Row ownership, soft deletion, the per-angler unique
//! rod name and keyset pagination behave as the hosted storage does, so the
//! server can run locally without Supabase and integration tests can drive
//! the full router.

mod catches;
mod rods;
mod trips;
mod weather;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::RepositoryError;
use crate::domain::{Catch, Rod, Trip, WeatherSnapshot};

#[derive(Default)]
struct Tables {
    rods: Vec<Rod>,
    trips: Vec<Trip>,
    catches: Vec<Catch>,
    snapshots: Vec<WeatherSnapshot>,
}

/// Shared in-memory tables.
///
/// Cloning is cheap; clones share the same tables.
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::query("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::query("memory store lock poisoned"))
    }
}

fn search_matches(search: Option<&str>, matches: impl FnOnce(&str) -> bool) -> bool {
    search.is_none_or(matches)
}

#[cfg(test)]
mod tests;
