//! Habit routes.

use super::{parse_body, path_id, resolve_tenant, run_blocking, MessageBody};
use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use habits_core::{Habit, HabitRequest};

const NOT_FOUND: &str = "Could not find habit by ID";

pub async fn create_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Habit>), ApiError> {
    let request: HabitRequest = parse_body(&body)?;
    let tenant_id = resolve_tenant(&state, &headers)?;

    let habit = run_blocking(move || {
        state
            .habits
            .create_habit(&tenant_id, &request)
            .map_err(|err| {
                ApiError::from_service(err, "habit_create", NOT_FOUND, "Could not create habit")
            })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn list_habits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let tenant_id = resolve_tenant(&state, &headers)?;

    let habits = run_blocking(move || {
        state.habits.list_habits(&tenant_id).map_err(|err| {
            ApiError::from_service(err, "habit_list", NOT_FOUND, "Failed to get all habits")
        })
    })
    .await?;

    Ok(Json(habits))
}

pub async fn find_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Habit>, ApiError> {
    let tenant_id = resolve_tenant(&state, &headers)?;
    let habit_id = path_id(path)?;

    let habit = run_blocking(move || {
        state
            .habits
            .find_habit(&tenant_id, &habit_id)
            .map_err(|err| {
                ApiError::from_service(err, "habit_find", NOT_FOUND, "Could not find habit")
            })
    })
    .await?;

    Ok(Json(habit))
}

pub async fn update_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Habit>, ApiError> {
    let request: HabitRequest = parse_body(&body)?;
    let tenant_id = resolve_tenant(&state, &headers)?;
    let habit_id = path_id(path)?;

    let habit = run_blocking(move || {
        state
            .habits
            .update_habit(&tenant_id, &habit_id, &request)
            .map_err(|err| {
                ApiError::from_service(err, "habit_update", NOT_FOUND, "Could not update habit")
            })
    })
    .await?;

    Ok(Json(habit))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let tenant_id = resolve_tenant(&state, &headers)?;
    let habit_id = path_id(path)?;

    run_blocking(move || {
        state
            .habits
            .delete_habit(&tenant_id, &habit_id)
            .map_err(|err| {
                ApiError::from_service(err, "habit_delete", NOT_FOUND, "Could not delete habit")
            })
    })
    .await?;

    Ok(Json(MessageBody {
        message: "Successfully deleted habit",
    }))
}
