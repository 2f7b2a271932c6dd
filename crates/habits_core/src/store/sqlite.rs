//! SQLite-backed item store.
//!
//! # Responsibility
//! - Map item operations onto the `items` table created by migrations.
//! - Serialize attributes as one JSON object per row.
//!
//! # Invariants
//! - Prefix queries compare a sort-key substring, never `LIKE`, so `%` and
//!   `_` inside ids are matched literally.
//! - The connection lock is held for a single statement.

use super::{Attributes, Item, ItemKey, ItemStore, StoreError, StoreResult};
use crate::db::migrations::{current_user_version, latest_version};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Mutex, MutexGuard};

const ITEMS_TABLE: &str = "items";
const ITEMS_COLUMNS: [&str; 3] = ["partition_key", "sort_key", "attributes"];

/// Item store over one migrated SQLite connection.
pub struct SqliteItemStore {
    conn: Mutex<Connection>,
}

impl SqliteItemStore {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the `items` layout.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl ItemStore for SqliteItemStore {
    fn put_item(&self, item: &Item) -> StoreResult<()> {
        let attributes = serde_json::to_string(&item.attributes)?;
        debug!(
            "event=item_put module=store partition_key={} sort_key={}",
            item.key.partition_key, item.key.sort_key
        );

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO items (partition_key, sort_key, attributes)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (partition_key, sort_key)
             DO UPDATE SET attributes = excluded.attributes;",
            params![
                item.key.partition_key.as_str(),
                item.key.sort_key.as_str(),
                attributes
            ],
        )?;
        Ok(())
    }

    fn get_item(&self, key: &ItemKey) -> StoreResult<Option<Item>> {
        let conn = self.lock()?;
        let attributes: Option<String> = conn
            .query_row(
                "SELECT attributes
                 FROM items
                 WHERE partition_key = ?1 AND sort_key = ?2;",
                params![key.partition_key.as_str(), key.sort_key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        drop(conn);

        attributes
            .map(|raw| decode_item(key.clone(), &raw))
            .transpose()
    }

    fn delete_item(&self, key: &ItemKey) -> StoreResult<Option<Item>> {
        let conn = self.lock()?;
        let previous: Option<String> = conn
            .query_row(
                "DELETE FROM items
                 WHERE partition_key = ?1 AND sort_key = ?2
                 RETURNING attributes;",
                params![key.partition_key.as_str(), key.sort_key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        drop(conn);

        debug!(
            "event=item_delete module=store partition_key={} sort_key={} existed={}",
            key.partition_key,
            key.sort_key,
            previous.is_some()
        );
        previous
            .map(|raw| decode_item(key.clone(), &raw))
            .transpose()
    }

    fn query_prefix(&self, partition_key: &str, sort_key_prefix: &str) -> StoreResult<Vec<Item>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT partition_key, sort_key, attributes
             FROM items
             WHERE partition_key = ?1
               AND substr(sort_key, 1, length(?2)) = ?2
             ORDER BY sort_key ASC;",
        )?;

        let mut rows = stmt.query(params![partition_key, sort_key_prefix])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }
}

fn parse_item_row(row: &Row<'_>) -> StoreResult<Item> {
    let key = ItemKey {
        partition_key: row.get("partition_key")?,
        sort_key: row.get("sort_key")?,
    };
    let raw: String = row.get("attributes")?;
    decode_item(key, &raw)
}

fn decode_item(key: ItemKey, raw: &str) -> StoreResult<Item> {
    let attributes: Attributes = serde_json::from_str(raw)?;
    Ok(Item { key, attributes })
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, ITEMS_TABLE)? {
        return Err(StoreError::MissingRequiredTable(ITEMS_TABLE));
    }

    for column in ITEMS_COLUMNS {
        if !table_has_column(conn, ITEMS_TABLE, column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: ITEMS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
