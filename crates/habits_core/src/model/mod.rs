//! Domain model for habits and habit logs.
//!
//! # Responsibility
//! - Define the entities exposed by services and serialized over HTTP.
//! - Define the request payloads that create or overwrite entities.
//!
//! # Invariants
//! - Every entity is identified by an opaque id generated at creation.
//! - `created_at` never changes after creation.
//! - Timestamps are Unix epoch seconds.

pub mod habit;
pub mod habit_log;

/// Opaque entity identifier.
///
/// Kept as a `String` because stored ids are not required to be UUIDs.
pub type EntityId = String;

/// Tenant identifier used as the item partition key.
pub type TenantId = String;
