//! Habit log routes.

use super::{parse_body, path_id, resolve_tenant, run_blocking, MessageBody};
use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use habits_core::{HabitLog, HabitLogRequest};

const NOT_FOUND: &str = "Could not find habit log by ID";

pub async fn create_habit_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<HabitLog>), ApiError> {
    let request: HabitLogRequest = parse_body(&body)?;
    let tenant_id = resolve_tenant(&state, &headers)?;

    let log = run_blocking(move || {
        state
            .habit_logs
            .create_habit_log(&tenant_id, &request)
            .map_err(|err| {
                ApiError::from_service(
                    err,
                    "habit_log_create",
                    NOT_FOUND,
                    "Could not create habit log",
                )
            })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn list_habit_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<HabitLog>>, ApiError> {
    let tenant_id = resolve_tenant(&state, &headers)?;

    let logs = run_blocking(move || {
        state.habit_logs.list_habit_logs(&tenant_id).map_err(|err| {
            ApiError::from_service(err, "habit_log_list", NOT_FOUND, "Failed to get all habit logs")
        })
    })
    .await?;

    Ok(Json(logs))
}

pub async fn find_habit_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<HabitLog>, ApiError> {
    let tenant_id = resolve_tenant(&state, &headers)?;
    let log_id = path_id(path)?;

    let log = run_blocking(move || {
        state
            .habit_logs
            .find_habit_log(&tenant_id, &log_id)
            .map_err(|err| {
                ApiError::from_service(err, "habit_log_find", NOT_FOUND, "Could not find habit log")
            })
    })
    .await?;

    Ok(Json(log))
}

pub async fn update_habit_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<HabitLog>, ApiError> {
    let request: HabitLogRequest = parse_body(&body)?;
    let tenant_id = resolve_tenant(&state, &headers)?;
    let log_id = path_id(path)?;

    let log = run_blocking(move || {
        state
            .habit_logs
            .update_habit_log(&tenant_id, &log_id, &request)
            .map_err(|err| {
                ApiError::from_service(
                    err,
                    "habit_log_update",
                    NOT_FOUND,
                    "Could not update habit log",
                )
            })
    })
    .await?;

    Ok(Json(log))
}

pub async fn delete_habit_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let tenant_id = resolve_tenant(&state, &headers)?;
    let log_id = path_id(path)?;

    run_blocking(move || {
        state
            .habit_logs
            .delete_habit_log(&tenant_id, &log_id)
            .map_err(|err| {
                ApiError::from_service(
                    err,
                    "habit_log_delete",
                    NOT_FOUND,
                    "Could not delete habit log",
                )
            })
    })
    .await?;

    Ok(Json(MessageBody {
        message: "Successfully deleted habit log",
    }))
}
