//! Schema definition and idempotent setup.
//!
//! # Invariants
//! - Every statement uses `IF NOT EXISTS`; running setup against an
//!   initialized store is a no-op.
//! - `AUTOINCREMENT` keeps row ids from being reused after deletes.

use crate::db::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables that must exist after [`ensure_schema`] returns.
pub const REQUIRED_TABLES: &[&str] = &["lists", "items"];

/// Creates the `lists` and `items` tables when they are missing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether `table_name` exists in the connected database.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, table_exists, REQUIRED_TABLES};
    use rusqlite::Connection;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        for table in REQUIRED_TABLES {
            assert!(table_exists(&conn, table).unwrap(), "missing table {table}");
        }
    }

    #[test]
    fn table_exists_reports_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!table_exists(&conn, "lists").unwrap());
    }
}
