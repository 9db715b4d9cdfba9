//! Application state shared across handlers.

use std::sync::Arc;

use levy_core::RateTable;
use levy_db::Database;

use crate::services::UserService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The rate table is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    rates: RateTable,
}

impl AppState {
    /// Create state with the built-in rate table.
    pub fn new(db: Database) -> Self {
        Self::with_rates(db, RateTable::default())
    }

    /// Create state with a custom rate table.
    pub fn with_rates(db: Database, rates: RateTable) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, rates }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn rates(&self) -> &RateTable {
        &self.inner.rates
    }

    /// User registry over the shared pool.
    pub fn users(&self) -> UserService {
        UserService::new(self.inner.db.clone())
    }
}
