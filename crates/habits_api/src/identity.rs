//! Tenant resolution for incoming requests.
//!
//! Session verification happens upstream (identity gateway / auth
//! middleware). This module only reads the resulting subject and turns it
//! into the partition key used by the core crate.

use axum::http::header::{HeaderName, InvalidHeaderName};
use axum::http::HeaderMap;
use habits_core::TenantId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default header carrying the verified session subject.
pub const DEFAULT_TENANT_HEADER: &str = "x-user-id";

/// Failure to determine the calling tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// No session claims were attached to the request.
    MissingClaims,
    /// Claims were present but unusable.
    InvalidClaims(String),
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingClaims => write!(f, "no session claims in request"),
            Self::InvalidClaims(details) => write!(f, "invalid session claims: {details}"),
        }
    }
}

impl Error for IdentityError {}

/// Capability that extracts the tenant id from a request.
///
/// Injected into router state so tests and deployments can swap it.
pub trait TenantResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Result<TenantId, IdentityError>;
}

impl<F> TenantResolver for F
where
    F: Fn(&HeaderMap) -> Result<TenantId, IdentityError> + Send + Sync,
{
    fn resolve(&self, headers: &HeaderMap) -> Result<TenantId, IdentityError> {
        self(headers)
    }
}

/// Reads the session subject from one request header.
#[derive(Debug, Clone)]
pub struct HeaderTenantResolver {
    header: HeaderName,
}

impl HeaderTenantResolver {
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::from_bytes(header.trim().as_bytes())?,
        })
    }
}

impl Default for HeaderTenantResolver {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static(DEFAULT_TENANT_HEADER),
        }
    }
}

impl TenantResolver for HeaderTenantResolver {
    fn resolve(&self, headers: &HeaderMap) -> Result<TenantId, IdentityError> {
        let value = headers
            .get(&self.header)
            .ok_or(IdentityError::MissingClaims)?;
        let subject = value.to_str().map_err(|_| {
            IdentityError::InvalidClaims(format!(
                "`{}` is not visible ASCII",
                self.header.as_str()
            ))
        })?;
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(IdentityError::MissingClaims);
        }
        Ok(subject.to_string())
    }
}

/// Resolves every request to the same tenant.
#[derive(Debug, Clone)]
pub struct StaticTenantResolver {
    tenant_id: TenantId,
}

impl StaticTenantResolver {
    pub fn new(tenant_id: impl Into<TenantId>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
        }
    }
}

impl TenantResolver for StaticTenantResolver {
    fn resolve(&self, _headers: &HeaderMap) -> Result<TenantId, IdentityError> {
        Ok(self.tenant_id.clone())
    }
}
