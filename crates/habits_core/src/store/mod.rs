//! Single-table item store contracts.
//!
//! # Responsibility
//! - Define the point-access and prefix-query operations the repositories
//!   rely on, independent of the storage engine.
//! - Own the physical item shape: `(partition_key, sort_key) -> attributes`.
//!
//! # Invariants
//! - `(partition_key, sort_key)` identifies at most one item.
//! - Every operation is scoped to exactly one partition.
//! - `put_item` is an unconditional upsert.
//! - `delete_item` reports the previous item so callers can detect absence.

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteItemStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity attributes persisted next to an item key.
pub type Attributes = Map<String, Value>;

/// Composite item address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    /// Tenant id; isolates one caller's items from every other caller.
    pub partition_key: String,
    /// Type prefix concatenated with the entity id.
    pub sort_key: String,
}

impl ItemKey {
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.partition_key, self.sort_key)
    }
}

/// One stored item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub key: ItemKey,
    pub attributes: Attributes,
}

/// Failure talking to the underlying store.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Serialization(serde_json::Error),
    /// A previous holder of the connection panicked mid-operation.
    LockPoisoned,
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "item attributes are not valid JSON: {err}"),
            Self::LockPoisoned => write!(f, "item store connection lock is poisoned"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<crate::db::DbError> for StoreError {
    fn from(value: crate::db::DbError) -> Self {
        match value {
            crate::db::DbError::Sqlite(err) => Self::Sqlite(err),
            crate::db::DbError::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => Self::UninitializedConnection {
                expected_version: latest_supported,
                actual_version: db_version,
            },
        }
    }
}

/// Point-access and prefix-query key-value store.
///
/// Implementations must be shareable across request threads.
pub trait ItemStore: Send + Sync {
    /// Writes the item, replacing any item stored under the same key.
    fn put_item(&self, item: &Item) -> StoreResult<()>;
    /// Reads the item stored under `key`.
    fn get_item(&self, key: &ItemKey) -> StoreResult<Option<Item>>;
    /// Deletes the item under `key` and returns what was stored there.
    fn delete_item(&self, key: &ItemKey) -> StoreResult<Option<Item>>;
    /// Returns every item of `partition_key` whose sort key starts with
    /// `sort_key_prefix`.
    fn query_prefix(&self, partition_key: &str, sort_key_prefix: &str) -> StoreResult<Vec<Item>>;
}

impl<S: ItemStore + ?Sized> ItemStore for std::sync::Arc<S> {
    fn put_item(&self, item: &Item) -> StoreResult<()> {
        (**self).put_item(item)
    }

    fn get_item(&self, key: &ItemKey) -> StoreResult<Option<Item>> {
        (**self).get_item(key)
    }

    fn delete_item(&self, key: &ItemKey) -> StoreResult<Option<Item>> {
        (**self).delete_item(key)
    }

    fn query_prefix(&self, partition_key: &str, sort_key_prefix: &str) -> StoreResult<Vec<Item>> {
        (**self).query_prefix(partition_key, sort_key_prefix)
    }
}
