//! SQLite storage bootstrap and schema setup entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for YASL core.
//! - Ensure the `lists`/`items` schema exists before any data access.
//!
//! # Invariants
//! - Returned connections enforce foreign keys, so deleting a list cascades
//!   to its items inside SQLite itself.
//! - Core code must not read/write application data before schema setup succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub(crate) use open::bootstrap_connection;
pub use open::{open_db, open_db_in_memory};

/// File name of the store used by the demonstration entry point.
pub const DEFAULT_DB_FILE_NAME: &str = "yasl.db";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A thread panicked while holding the connection lock.
    ConnectionPoisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ConnectionPoisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ConnectionPoisoned => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
