//! HTTP error taxonomy and response mapping.
//!
//! # Invariants
//! - Every failure renders as `{"error": "<message>"}` with a JSON content type.
//! - Messages are fixed per operation; internal details go to the log only.
//! - `NotFound` renders as 404 on every route.

use crate::identity::IdentityError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use habits_core::ServiceError;
use log::{error, warn};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const MSG_PARSE_JSON: &str = "Could not parse JSON";
pub const MSG_MISSING_ID: &str = "Could not get ID from URL";
pub const MSG_NO_USER: &str = "Could not get user";
pub const MSG_NO_ROUTE: &str = "Route not found";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Request failure surfaced to the client.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body or missing path parameter.
    BadRequest(&'static str),
    /// Tenant could not be resolved. Rendered as 500.
    Identity(IdentityError),
    NotFound(&'static str),
    MethodNotAllowed,
    Internal(&'static str),
}

impl ApiError {
    /// Converts a service failure, logging it with operation context.
    pub fn from_service(
        err: ServiceError,
        operation: &'static str,
        not_found: &'static str,
        failure: &'static str,
    ) -> Self {
        match err {
            ServiceError::NotFound { kind, id } => {
                warn!(
                    "event={} module=api status=not_found kind={} id={}",
                    operation, kind, id
                );
                Self::NotFound(not_found)
            }
            ServiceError::Repo(err) => {
                error!(
                    "event={} module=api status=error error_code=store_failure error={}",
                    operation, err
                );
                Self::Internal(failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Identity(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                message
            }
            Self::Identity(_) => MSG_NO_USER,
            Self::MethodNotAllowed => MSG_METHOD_NOT_ALLOWED,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity(err) => write!(f, "{}: {err}", MSG_NO_USER),
            other => f.write_str(other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<IdentityError> for ApiError {
    fn from(value: IdentityError) -> Self {
        warn!(
            "event=tenant_resolve module=api status=error error={}",
            value
        );
        Self::Identity(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
