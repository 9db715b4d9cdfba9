//! User registry routes.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use levy_core::User;

use crate::error::Result;
use crate::extract::{Json, Path, Query};
use crate::services::CreateUser;
use crate::state::AppState;

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Query of `GET /users`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// `POST /users`
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<axum::Json<UserView>> {
    let user = state
        .users()
        .create_user(CreateUser {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(axum::Json(user.into()))
}

/// `GET /users?skip=&limit=`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<axum::Json<Vec<UserView>>> {
    let users = state.users().list_users(params.skip, params.limit).await?;
    Ok(axum::Json(users.into_iter().map(UserView::from).collect()))
}

/// `GET /users/{user_id}`
pub async fn show(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<axum::Json<UserView>> {
    let user = state.users().get_user(user_id).await?;
    Ok(axum::Json(user.into()))
}
