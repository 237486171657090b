//! Core persistence layer for YASL shopping lists.
//! This crate owns the SQLite schema and every list/item data-access path.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Item, ItemId};
pub use model::list::{List, ListId};
pub use repo::shopping_repo::{
    RepoError, RepoResult, ShoppingRepository, SqliteShoppingRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
