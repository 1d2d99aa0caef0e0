//! SQLite-backed `KeyValueStore` over the `kv_records` table.

use super::{KeyValueStore, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Borrowing kv store; cheap to copy so every repository can hold one.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_records WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_records (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::db::open_db_in_memory;
    use crate::store::KeyValueStore;

    #[test]
    fn set_then_get_overwrites_previous_value() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);

        assert_eq!(store.get_raw("notes").unwrap(), None);
        store.set_raw("notes", "[]").unwrap();
        store.set_raw("notes", "[{\"id\":1}]").unwrap();
        assert_eq!(
            store.get_raw("notes").unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
    }
}
