//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Pattern                                  │
//! │                                                                         │
//! │  Service Layer (apps/api)                                              │
//! │       │                                                                 │
//! │       │ session.users().get_by_email("a@example.com")                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Repository (THIS MODULE)                                       │   │
//! │  │  • Borrows the session's connection                             │   │
//! │  │  • Maps rows to levy-core types                                 │   │
//! │  │  • Maps sqlx errors to DbError                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (inside the session's transaction)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod user;
