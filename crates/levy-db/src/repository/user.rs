//! # User Repository
//!
//! Database operations for registered users.
//!
//! Uniqueness of username and email is enforced by the schema. Callers
//! check first for a friendly error, and a racing insert still surfaces as
//! `DbError::UniqueViolation`.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use levy_core::User;

const USER_COLUMNS: &str = "id, username, email, hashed_password, created_at, updated_at";

/// Fields needed to insert a user. The id is assigned by SQLite.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Creates a `NewUser` stamped with the current time.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Self {
        NewUser {
            username: username.into(),
            email: email.into(),
            hashed_password: hashed_password.into(),
            created_at: Utc::now(),
        }
    }
}

/// User queries running on a session's connection.
///
/// Obtained from [`Session::users`](crate::Session::users); it cannot
/// outlive the session.
#[derive(Debug)]
pub struct UserRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> UserRepository<'a> {
    pub(crate) fn new(conn: &'a mut SqliteConnection) -> Self {
        UserRepository { conn }
    }

    /// Gets a user by id.
    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(user)
    }

    /// Gets a user by exact email.
    pub async fn get_by_email(&mut self, email: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(user)
    }

    /// Gets a user by exact username.
    pub async fn get_by_username(&mut self, username: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(user)
    }

    /// Inserts a user and returns the stored row.
    ///
    /// `updated_at` starts equal to `created_at`.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` with `field` set to `users.username` or
    /// `users.email` if either is taken.
    pub async fn insert(&mut self, new_user: &NewUser) -> DbResult<User> {
        debug!(username = %new_user.username, "Inserting user");

        let sql = format!(
            "INSERT INTO users (username, email, hashed_password, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.hashed_password)
            .bind(new_user.created_at)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(DbError::from)?;

        debug!(user_id = user.id, "User inserted");
        Ok(user)
    }

    /// Lists users ordered by id, skipping `skip` rows and returning at
    /// most `limit`.
    pub async fn list(&mut self, skip: u32, limit: u32) -> DbResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC LIMIT ?1 OFFSET ?2");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&mut *self.conn)
            .await?;

        debug!(count = users.len(), skip, limit, "Listed users");
        Ok(users)
    }

    /// Counts all users.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn alice() -> NewUser {
        NewUser::new("alice", "alice@example.com", "$argon2id$hash")
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let mut session = db.session().await.unwrap();

        let user = session.users().insert(&alice()).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.created_at, user.updated_at);

        let by_id = session.users().get_by_id(user.id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&user));

        let by_email = session.users().get_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));

        let by_name = session.users().get_by_username("alice").await.unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(user.id));

        session.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let db = test_db().await;
        let mut session = db.session().await.unwrap();

        assert!(session.users().get_by_id(42).await.unwrap().is_none());
        assert!(session.users().get_by_email("x@y.z").await.unwrap().is_none());
        assert!(session.users().get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = test_db().await;
        let mut session = db.session().await.unwrap();
        session.users().insert(&alice()).await.unwrap();

        let dup = NewUser::new("alice2", "alice@example.com", "h");
        let err = session.users().insert(&dup).await.unwrap_err();
        assert_eq!(err.unique_field(), Some("users.email"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let db = test_db().await;
        let mut session = db.session().await.unwrap();
        session.users().insert(&alice()).await.unwrap();

        let dup = NewUser::new("alice", "other@example.com", "h");
        let err = session.users().insert(&dup).await.unwrap_err();
        assert_eq!(err.unique_field(), Some("users.username"));
    }

    #[tokio::test]
    async fn test_list_orders_by_id_and_pages() {
        let db = test_db().await;
        let mut session = db.session().await.unwrap();
        for i in 0..5 {
            let user = NewUser::new(format!("user{i}"), format!("user{i}@example.com"), "h");
            session.users().insert(&user).await.unwrap();
        }

        let all = session.users().list(0, 100).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let page = session.users().list(1, 2).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(session.users().list(10, 2).await.unwrap().is_empty());
        assert_eq!(session.users().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_dropped_session_rolls_back() {
        let db = test_db().await;

        {
            let mut session = db.session().await.unwrap();
            session.users().insert(&alice()).await.unwrap();
        }

        let mut session = db.session().await.unwrap();
        assert_eq!(session.users().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = test_db().await;

        let mut session = db.session().await.unwrap();
        session.users().insert(&alice()).await.unwrap();
        session.rollback().await.unwrap();

        let mut session = db.session().await.unwrap();
        assert!(session.users().get_by_email("alice@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_committed_session_persists() {
        let db = test_db().await;

        let mut session = db.session().await.unwrap();
        session.users().insert(&alice()).await.unwrap();
        session.commit().await.unwrap();

        let mut session = db.session().await.unwrap();
        assert_eq!(session.users().count().await.unwrap(), 1);
    }
}
