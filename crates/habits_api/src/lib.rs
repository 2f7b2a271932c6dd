//! HTTP surface for the habits backend.
//!
//! # Responsibility
//! - Route JSON requests to habit and habit log services.
//! - Resolve the calling tenant through an injected [`TenantResolver`].
//! - Map service outcomes to HTTP statuses and `{"error": ...}` bodies.
//!
//! # Invariants
//! - Handlers never touch the item store directly.
//! - Every data route is scoped to the resolved tenant.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use identity::{HeaderTenantResolver, IdentityError, StaticTenantResolver, TenantResolver};
pub use router::router;
pub use state::{open_store, AppState, SharedStore};
