//! Repository layer over the single-table item store.
//!
//! # Responsibility
//! - Translate entity operations into item keys and item store calls.
//! - Keep key layout (`<type prefix><entity id>`) inside this module.
//!
//! # Invariants
//! - Every call is scoped to the tenant partition passed by the caller.
//! - Absence is reported as `RepoError::NotFound`, never as a default value.
//! - Store failures carry the operation name and item key.

use crate::model::EntityId;
use crate::store::{Item, ItemKey, ItemStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod habit_log_repo;
pub mod habit_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity kinds sharing the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Habit,
    HabitLog,
}

impl EntityKind {
    /// Sort-key prefix grouping this kind inside a partition.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Habit => "habit#",
            Self::HabitLog => "habit-log#",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Habit => "habit",
            Self::HabitLog => "habit log",
        }
    }

    /// Builds the full item key of one entity.
    pub fn item_key(self, tenant_id: &str, id: &str) -> ItemKey {
        ItemKey::new(tenant_id, format!("{}{id}", self.prefix()))
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Repository error for item-backed entity operations.
#[derive(Debug)]
pub enum RepoError {
    Store {
        operation: &'static str,
        key: ItemKey,
        source: StoreError,
    },
    NotFound {
        kind: EntityKind,
        id: EntityId,
    },
    InvalidData(String),
}

impl RepoError {
    fn store<'a>(
        operation: &'static str,
        key: &'a ItemKey,
    ) -> impl FnOnce(StoreError) -> Self + 'a {
        move |source| Self::Store {
            operation,
            key: key.clone(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store {
                operation,
                key,
                source,
            } => write!(f, "{operation} failed for item {key}: {source}"),
            Self::NotFound { kind, id } => write!(f, "could not find a {kind} with id `{id}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted item: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store { source, .. } => Some(source),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

/// Writes `entity` under `(tenant_id, kind prefix + id)`, replacing any
/// existing item.
fn put_entity<S, T>(
    store: &S,
    kind: EntityKind,
    operation: &'static str,
    tenant_id: &str,
    id: &str,
    entity: &T,
) -> RepoResult<()>
where
    S: ItemStore + ?Sized,
    T: Serialize,
{
    let key = kind.item_key(tenant_id, id);
    let item = encode_item(key, entity)?;
    store
        .put_item(&item)
        .map_err(RepoError::store(operation, &item.key))
}

fn list_entities<S, T>(store: &S, kind: EntityKind, tenant_id: &str) -> RepoResult<Vec<T>>
where
    S: ItemStore + ?Sized,
    T: DeserializeOwned,
{
    let scope = ItemKey::new(tenant_id, kind.prefix());
    store
        .query_prefix(&scope.partition_key, &scope.sort_key)
        .map_err(RepoError::store("query_prefix", &scope))?
        .into_iter()
        .map(|item| decode_item(kind, item))
        .collect()
}

fn find_entity<S, T>(store: &S, kind: EntityKind, tenant_id: &str, id: &str) -> RepoResult<T>
where
    S: ItemStore + ?Sized,
    T: DeserializeOwned,
{
    let key = kind.item_key(tenant_id, id);
    match store
        .get_item(&key)
        .map_err(RepoError::store("get_item", &key))?
    {
        Some(item) => decode_item(kind, item),
        None => Err(RepoError::NotFound {
            kind,
            id: id.to_string(),
        }),
    }
}

fn delete_entity<S>(store: &S, kind: EntityKind, tenant_id: &str, id: &str) -> RepoResult<()>
where
    S: ItemStore + ?Sized,
{
    let key = kind.item_key(tenant_id, id);
    match store
        .delete_item(&key)
        .map_err(RepoError::store("delete_item", &key))?
    {
        Some(_) => Ok(()),
        None => Err(RepoError::NotFound {
            kind,
            id: id.to_string(),
        }),
    }
}

fn encode_item<T: Serialize>(key: ItemKey, entity: &T) -> RepoResult<Item> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(attributes)) => Ok(Item { key, attributes }),
        Ok(other) => Err(RepoError::InvalidData(format!(
            "entity for {key} did not serialize to an object: {other}"
        ))),
        Err(err) => Err(RepoError::InvalidData(format!(
            "entity for {key} failed to serialize: {err}"
        ))),
    }
}

fn decode_item<T: DeserializeOwned>(kind: EntityKind, item: Item) -> RepoResult<T> {
    let Item { key, attributes } = item;
    serde_json::from_value(Value::Object(attributes))
        .map_err(|err| RepoError::InvalidData(format!("{kind} item {key}: {err}")))
}
