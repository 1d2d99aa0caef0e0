//! SQLite-backed cache buckets (`cache_buckets`, `cache_entries`).

use super::{CacheResult, CacheStorage, Response};
use rusqlite::{params, Connection, OptionalExtension};

const UPSERT_ENTRY_SQL: &str = "INSERT INTO cache_entries (bucket, url, status, content_type, body)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT(bucket, url) DO UPDATE SET
        status = excluded.status,
        content_type = excluded.content_type,
        body = excluded.body,
        stored_at = (strftime('%s', 'now') * 1000);";

#[derive(Debug, Clone, Copy)]
pub struct SqliteCacheStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCacheStorage<'conn> {
    /// Wraps a migrated connection. Requires `foreign_keys=ON` so entries
    /// go away with their bucket.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CacheStorage for SqliteCacheStorage<'_> {
    fn open(&self, bucket: &str) -> CacheResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO cache_buckets (name) VALUES (?1);",
            [bucket],
        )?;
        Ok(())
    }

    fn keys(&self) -> CacheResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM cache_buckets ORDER BY rowid ASC;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn delete(&self, bucket: &str) -> CacheResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM cache_buckets WHERE name = ?1;", [bucket])?;
        Ok(changed > 0)
    }

    fn match_any(&self, url: &str) -> CacheResult<Option<Response>> {
        let response = self
            .conn
            .query_row(
                "SELECT e.status, e.content_type, e.body
                 FROM cache_entries e
                 JOIN cache_buckets b ON b.name = e.bucket
                 WHERE e.url = ?1
                 ORDER BY b.rowid ASC
                 LIMIT 1;",
                [url],
                |row| {
                    Ok(Response::new(
                        row.get::<_, u16>(0)?,
                        row.get(1)?,
                        row.get(2)?,
                    ))
                },
            )
            .optional()?;
        Ok(response)
    }

    fn put(&self, bucket: &str, url: &str, response: &Response) -> CacheResult<()> {
        self.open(bucket)?;
        self.conn.execute(
            UPSERT_ENTRY_SQL,
            params![
                bucket,
                url,
                response.status,
                response.content_type.as_deref(),
                response.body.as_slice(),
            ],
        )?;
        Ok(())
    }

    fn put_all(&self, bucket: &str, entries: &[(String, Response)]) -> CacheResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO cache_buckets (name) VALUES (?1);",
            [bucket],
        )?;
        {
            let mut stmt = tx.prepare(UPSERT_ENTRY_SQL)?;
            for (url, response) in entries {
                stmt.execute(params![
                    bucket,
                    url,
                    response.status,
                    response.content_type.as_deref(),
                    response.body.as_slice(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn entries(&self, bucket: &str) -> CacheResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url FROM cache_entries WHERE bucket = ?1 ORDER BY url ASC;")?;
        let urls = stmt
            .query_map([bucket], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(urls)
    }
}
