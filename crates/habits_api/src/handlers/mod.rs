//! Request handlers.
//!
//! Each data handler runs `parse body -> resolve tenant -> validate path
//! -> call service -> respond` and stops at the first failure. Service
//! calls run on the blocking pool because the store does synchronous I/O.

use crate::error::{ApiError, MSG_MISSING_ID, MSG_NO_ROUTE, MSG_PARSE_JSON};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use habits_core::TenantId;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod habit_logs;
pub mod habits;

/// Confirmation body returned by delete routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Liveness probe; never touches the store.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Catch-all for paths outside the route table.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound(MSG_NO_ROUTE)
}

/// Catch-all for known paths hit with an unrouted method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Decodes a request body; a JSON `null` reads as the all-empty request.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|err| {
            warn!("event=parse_body module=api status=error error={}", err);
            ApiError::BadRequest(MSG_PARSE_JSON)
        })
}

fn resolve_tenant(state: &AppState, headers: &HeaderMap) -> Result<TenantId, ApiError> {
    Ok(state.tenants.resolve(headers)?)
}

fn path_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    match path {
        Ok(Path(id)) if !id.trim().is_empty() => Ok(id),
        Ok(_) => {
            warn!("event=path_param module=api status=error error=empty_id");
            Err(ApiError::BadRequest(MSG_MISSING_ID))
        }
        Err(rejection) => {
            warn!(
                "event=path_param module=api status=error error={}",
                rejection
            );
            Err(ApiError::BadRequest(MSG_MISSING_ID))
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result,
        Err(err) => {
            error!(
                "event=blocking_task module=api status=error error_code=join_failed error={}",
                err
            );
            Err(ApiError::Internal("Internal server error"))
        }
    }
}
