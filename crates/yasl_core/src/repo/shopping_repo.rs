//! Shopping list repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide one operation per list/item use-case over `lists`/`items`.
//! - Own the connection lifetime and map rows into model values.
//! - Classify SQLite failures into `RepoError` kinds.
//!
//! # Invariants
//! - Referential integrity is enforced by SQLite foreign keys, not here.
//! - List deletion cascades to items inside the same statement.
//! - Reads are ordered by `id`, which follows insertion order.
//! - Log events carry ids and row counts only, never names or categories.

use crate::db::{bootstrap_connection, open_db, open_db_in_memory, DbError};
use crate::model::item::{Item, ItemId};
use crate::model::list::{List, ListId};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    list_id,
    name,
    category,
    checked
FROM items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure kinds surfaced by repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// The store could not be opened, initialized, locked or closed.
    StoreUnavailable(DbError),
    /// An insert or update referenced a list that does not exist.
    ReferentialIntegrity(rusqlite::Error),
    /// Any other statement failure.
    QueryFailure(rusqlite::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreUnavailable(err) => write!(f, "store unavailable: {err}"),
            Self::ReferentialIntegrity(err) => {
                write!(f, "item must reference an existing list: {err}")
            }
            Self::QueryFailure(err) => write!(f, "query failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreUnavailable(err) => Some(err),
            Self::ReferentialIntegrity(err) => Some(err),
            Self::QueryFailure(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::StoreUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if is_foreign_key_violation(&value) {
            Self::ReferentialIntegrity(value)
        } else {
            Self::QueryFailure(value)
        }
    }
}

/// Repository interface for shopping list and item operations.
pub trait ShoppingRepository {
    /// Creates a list and returns its store-assigned id.
    fn create_list(&self, name: &str) -> RepoResult<ListId>;
    /// Deletes a list together with all of its items.
    fn delete_list(&self, id: ListId) -> RepoResult<()>;
    /// Returns all lists in id order.
    fn get_lists(&self) -> RepoResult<Vec<List>>;
    /// Creates an unchecked item in `list_id` and returns its id.
    fn create_item(&self, list_id: ListId, name: &str, category: &str) -> RepoResult<ItemId>;
    /// Deletes one item.
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
    /// Returns the items of one list in id order.
    fn get_items(&self, list_id: ListId) -> RepoResult<Vec<Item>>;
    fn update_item_checked(&self, id: ItemId, checked: bool) -> RepoResult<()>;
    fn update_item_category(&self, id: ItemId, category: &str) -> RepoResult<()>;
    fn update_item_name(&self, id: ItemId, name: &str) -> RepoResult<()>;
    /// Deletes every checked item of one list.
    fn clear_checked_items(&self, list_id: ListId) -> RepoResult<()>;
    /// Reassigns an item to another list, keeping its id and fields.
    fn move_item_to_list(&self, item_id: ItemId, new_list_id: ListId) -> RepoResult<()>;
}

/// SQLite-backed shopping repository.
///
/// The connection sits behind a mutex so one handle can be shared across
/// threads. Separate handles on the same file share SQLite's page cache;
/// table-lock conflicts between them block on unlock notification instead
/// of failing with `SQLITE_LOCKED`. The
/// connection is released on drop, or explicitly through [`Self::close`].
pub struct SqliteShoppingRepository {
    conn: Mutex<Connection>,
}

impl SqliteShoppingRepository {
    /// Opens (creating when absent) the store at `path`.
    ///
    /// # Errors
    /// - `RepoError::StoreUnavailable` when the file cannot be opened or
    ///   the schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::wrap(conn))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::wrap(conn))
    }

    /// Takes ownership of a caller-opened connection and prepares it.
    ///
    /// Enables foreign keys and creates missing tables.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        bootstrap_connection(&conn)?;
        Ok(Self::wrap(conn))
    }

    /// Releases the connection, surfacing any close failure.
    pub fn close(self) -> RepoResult<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        conn.close()
            .map_err(|(_, err)| RepoError::StoreUnavailable(DbError::Sqlite(err)))?;
        debug!("event=db_close module=repo status=ok");
        Ok(())
    }

    fn wrap(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::StoreUnavailable(DbError::ConnectionPoisoned))
    }
}

impl ShoppingRepository for SqliteShoppingRepository {
    fn create_list(&self, name: &str) -> RepoResult<ListId> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO lists (name) VALUES (?1);", [name])?;
        let id = conn.last_insert_rowid();

        debug!("event=list_create module=repo status=ok list_id={id}");
        Ok(id)
    }

    fn delete_list(&self, id: ListId) -> RepoResult<()> {
        let changed = self
            .lock()?
            .execute("DELETE FROM lists WHERE id = ?1;", [id])?;

        debug!("event=list_delete module=repo status=ok list_id={id} changed={changed}");
        Ok(())
    }

    fn get_lists(&self) -> RepoResult<Vec<List>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM lists ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut lists = Vec::new();

        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(row)?);
        }

        Ok(lists)
    }

    fn create_item(&self, list_id: ListId, name: &str, category: &str) -> RepoResult<ItemId> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO items (list_id, name, category) VALUES (?1, ?2, ?3);",
            params![list_id, name, category],
        )?;
        let id = conn.last_insert_rowid();

        debug!("event=item_create module=repo status=ok list_id={list_id} item_id={id}");
        Ok(id)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .lock()?
            .execute("DELETE FROM items WHERE id = ?1;", [id])?;

        debug!("event=item_delete module=repo status=ok item_id={id} changed={changed}");
        Ok(())
    }

    fn get_items(&self, list_id: ListId) -> RepoResult<Vec<Item>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE list_id = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([list_id])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn update_item_checked(&self, id: ItemId, checked: bool) -> RepoResult<()> {
        let changed = self.lock()?.execute(
            "UPDATE items SET checked = ?1 WHERE id = ?2;",
            params![checked, id],
        )?;

        debug!("event=item_update_checked module=repo status=ok item_id={id} checked={checked} changed={changed}");
        Ok(())
    }

    fn update_item_category(&self, id: ItemId, category: &str) -> RepoResult<()> {
        let changed = self.lock()?.execute(
            "UPDATE items SET category = ?1 WHERE id = ?2;",
            params![category, id],
        )?;

        debug!("event=item_update_category module=repo status=ok item_id={id} changed={changed}");
        Ok(())
    }

    fn update_item_name(&self, id: ItemId, name: &str) -> RepoResult<()> {
        let changed = self.lock()?.execute(
            "UPDATE items SET name = ?1 WHERE id = ?2;",
            params![name, id],
        )?;

        debug!("event=item_update_name module=repo status=ok item_id={id} changed={changed}");
        Ok(())
    }

    fn clear_checked_items(&self, list_id: ListId) -> RepoResult<()> {
        let changed = self.lock()?.execute(
            "DELETE FROM items WHERE list_id = ?1 AND checked = 1;",
            [list_id],
        )?;

        debug!("event=items_clear_checked module=repo status=ok list_id={list_id} changed={changed}");
        Ok(())
    }

    fn move_item_to_list(&self, item_id: ItemId, new_list_id: ListId) -> RepoResult<()> {
        let changed = self.lock()?.execute(
            "UPDATE items SET list_id = ?1 WHERE id = ?2;",
            params![new_list_id, item_id],
        )?;

        debug!(
            "event=item_move module=repo status=ok item_id={item_id} list_id={new_list_id} changed={changed}"
        );
        Ok(())
    }
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<List> {
    Ok(List {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    // `category` is nullable in the schema; NULL reads back as empty.
    let category = row.get::<_, Option<String>>("category")?.unwrap_or_default();

    Ok(Item {
        id: row.get("id")?,
        list_id: row.get("list_id")?,
        name: row.get("name")?,
        category,
        checked: row.get("checked")?,
    })
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
