//! User registry operations.
//!
//! Each call opens its own [`Session`](levy_db::Session); only a fully
//! successful `create_user` commits.

use levy_core::{validation, User, DEFAULT_PAGE_LIMIT};
use levy_db::{Database, DbError, NewUser};
use tracing::{debug, info};

use crate::error::AppError;
use crate::services::password;

const EMAIL_TAKEN: &str = "Email already registered";
const USERNAME_TAKEN: &str = "Username already registered";

/// Registration input.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User registry backed by the database.
#[derive(Debug, Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        UserService { db }
    }

    /// Registers a user.
    ///
    /// Username and email are stored trimmed; uniqueness applies to the
    /// trimmed values. The password is hashed before the write session
    /// opens, so the database write lock is only held for the checks and
    /// the insert.
    ///
    /// ## Errors
    /// - `AppError::Validation` for a bad username, email or password
    /// - `AppError::Conflict` if the email (checked first) or username is taken
    pub async fn create_user(&self, input: CreateUser) -> Result<User, AppError> {
        let username = input.username.trim();
        let email = input.email.trim();
        validation::validate_username(username)?;
        validation::validate_email(email)?;
        validation::validate_password(&input.password)?;

        let plain = input.password;
        let hashed_password = tokio::task::spawn_blocking(move || password::hash_password(&plain))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))??;

        let mut session = self.db.write_session().await?;

        if session.users().get_by_email(email).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }
        if session.users().get_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let new_user = NewUser::new(username, email, hashed_password);
        let user = session
            .users()
            .insert(&new_user)
            .await
            .map_err(conflict_from_unique)?;

        session.commit().await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Lists users in registration order.
    ///
    /// `skip` defaults to 0 and `limit` to 100; a zero limit is rejected.
    pub async fn list_users(&self, skip: Option<u32>, limit: Option<u32>) -> Result<Vec<User>, AppError> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        validation::validate_page_limit(limit)?;

        let mut session = self.db.session().await?;
        let users = session.users().list(skip, limit).await?;

        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Fetches one user.
    ///
    /// ## Errors
    /// `AppError::NotFound` ("User not found") if no such id.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        let mut session = self.db.session().await?;
        session
            .users()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

/// Maps a UNIQUE index failure (lost registration race) to the same
/// conflict the pre-checks report.
fn conflict_from_unique(err: DbError) -> AppError {
    match err.unique_field() {
        Some(field) if field.ends_with("email") => AppError::Conflict(EMAIL_TAKEN.to_string()),
        Some(field) if field.ends_with("username") => AppError::Conflict(USERNAME_TAKEN.to_string()),
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levy_db::DbConfig;

    async fn service() -> UserService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        UserService::new(db)
    }

    fn input(username: &str, email: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let users = service().await;
        let user = users.create_user(input("alice", "alice@example.com")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_ne!(user.hashed_password, "hunter2");
        assert!(password::verify_password("hunter2", &user.hashed_password));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let users = service().await;
        users.create_user(input("alice", "alice@example.com")).await.unwrap();

        let err = users.create_user(input("bob", "alice@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == EMAIL_TAKEN));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let users = service().await;
        users.create_user(input("alice", "alice@example.com")).await.unwrap();

        let err = users.create_user(input("alice", "other@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == USERNAME_TAKEN));
    }

    #[tokio::test]
    async fn test_email_checked_before_username() {
        let users = service().await;
        users.create_user(input("alice", "alice@example.com")).await.unwrap();

        let err = users.create_user(input("alice", "alice@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == EMAIL_TAKEN));
    }

    #[tokio::test]
    async fn test_invalid_input_writes_nothing() {
        let users = service().await;

        let err = users.create_user(input("", "alice@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = users.create_user(input("alice", "nope")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(users.list_users(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_trimmed() {
        let users = service().await;

        let padded = format!("{} ", "a".repeat(50));
        let user = users
            .create_user(input(&padded, "  alice@example.com "))
            .await
            .unwrap();
        assert_eq!(user.username, "a".repeat(50));
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_padded_duplicates_are_conflicts() {
        let users = service().await;
        users.create_user(input("alice", "alice@example.com")).await.unwrap();

        let err = users.create_user(input("bob", "alice@example.com ")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == EMAIL_TAKEN));

        let err = users.create_user(input(" alice", "other@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == USERNAME_TAKEN));

        assert_eq!(users.list_users(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_users_paging() {
        let users = service().await;
        for name in ["a", "b", "c"] {
            users
                .create_user(input(name, &format!("{name}@example.com")))
                .await
                .unwrap();
        }

        let all = users.list_users(None, None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let page = users.list_users(Some(1), Some(1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].username, "b");

        let err = users.list_users(None, Some(0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_user() {
        let users = service().await;
        let created = users.create_user(input("alice", "alice@example.com")).await.unwrap();

        let found = users.get_user(created.id).await.unwrap();
        assert_eq!(found, created);

        let err = users.get_user(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found"));
    }

    #[test]
    fn test_conflict_from_unique() {
        let email = DbError::UniqueViolation {
            field: "users.email".to_string(),
        };
        assert!(matches!(conflict_from_unique(email), AppError::Conflict(ref m) if m == EMAIL_TAKEN));

        let username = DbError::UniqueViolation {
            field: "users.username".to_string(),
        };
        assert!(matches!(
            conflict_from_unique(username),
            AppError::Conflict(ref m) if m == USERNAME_TAKEN
        ));

        assert!(matches!(
            conflict_from_unique(DbError::PoolExhausted),
            AppError::Database(_)
        ));
    }
}
