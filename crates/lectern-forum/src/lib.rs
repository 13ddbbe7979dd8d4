//! # lectern-forum
//!
//! Business rules of the Lectern forum on top of `lectern-db`:
//! login resolution, account provisioning, transactional thread and reply
//! authoring, keyword search, engagement statistics and seeded demo data.
//!
//! Reads borrow a `&Connection`; multi-statement writes borrow
//! `&mut Connection` and run in a single transaction that rolls back on any
//! error.

pub mod auth;
pub mod authoring;
pub mod browse;
pub mod credentials;
pub mod search;
pub mod seed;
pub mod stats;
pub mod structure;

use lectern_db::DbError;
use lectern_types::identity::Role;
use lectern_types::IdParseError;

/// Errors surfaced to the session shell.
#[derive(Debug, thiserror::Error)]
pub enum ForumError {
    /// Unknown email, post, thread, folder or course membership.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("password incorrect")]
    AuthenticationFailed,

    #[error("account is not registered as {expected}")]
    RoleMismatch {
        expected: Role,
        actual: Option<Role>,
    },

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] DbError),

    #[error(transparent)]
    InvalidId(#[from] IdParseError),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl ForumError {
    /// Whether the shell should re-prompt instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ForumError::StorageUnavailable(_) | ForumError::PasswordHash(_)
        )
    }
}

impl From<DbError> for ForumError {
    fn from(e: DbError) -> Self {
        if e.is_constraint() {
            return ForumError::ConstraintViolation(e.to_string());
        }
        match e {
            DbError::NotFound(what) => ForumError::NotFound(what),
            other => ForumError::StorageUnavailable(other),
        }
    }
}

impl From<rusqlite::Error> for ForumError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::from(e).into()
    }
}

pub type Result<T> = std::result::Result<T, ForumError>;
