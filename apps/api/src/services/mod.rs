//! Service layer between HTTP handlers and storage.

pub mod password;
pub mod users;

pub use users::{CreateUser, UserService};
