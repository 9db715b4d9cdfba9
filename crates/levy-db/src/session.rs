//! # Scoped Sessions
//!
//! A [`Session`] is one pooled connection running one transaction. Every
//! unit of work opens its own, so nothing is shared between requests.
//!
//! ## Lifecycle
//! ```text
//! db.session()        ──►  BEGIN
//! db.write_session()  ──►  BEGIN IMMEDIATE (takes the write lock now)
//!      │
//!      ├── session.users().insert(..)     ← all run on the same connection
//!      ├── session.users().get_by_id(..)
//!      │
//!      ├── session.commit()    ──► COMMIT, connection back to pool
//!      ├── session.rollback()  ──► ROLLBACK, connection back to pool
//!      └── dropped             ──► ROLLBACK, connection back to pool
//! ```
//!
//! Dropping a session is always safe: early returns via `?` and panics both
//! leave the database untouched.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::user::UserRepository;

/// One connection plus an open transaction.
#[derive(Debug)]
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    pub(crate) async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool.begin().await.map_err(begin_error)?;
        debug!("Session opened");
        Ok(Session { tx })
    }

    /// Takes the write lock up front so the first write can't hit
    /// `SQLITE_BUSY` on a lock upgrade. Waits out other writers for the
    /// connection's busy timeout.
    pub(crate) async fn begin_immediate(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(begin_error)?;
        debug!("Write session opened");
        Ok(Session { tx })
    }

    /// User queries bound to this session's transaction.
    pub fn users(&mut self) -> UserRepository<'_> {
        UserRepository::new(&mut *self.tx)
    }

    /// Commits everything done through this session.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Session committed");
        Ok(())
    }

    /// Discards everything done through this session.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Session rolled back");
        Ok(())
    }
}

fn begin_error(err: sqlx::Error) -> DbError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => DbError::from(err),
        other => DbError::TransactionFailed(other.to_string()),
    }
}
