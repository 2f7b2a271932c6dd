//! Route table and request logging.

use crate::handlers::{habit_logs, habits, health, method_not_allowed, route_not_found};
use crate::state::AppState;
use axum::extract::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::info;
use std::time::Instant;

/// Builds the HTTP router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .route(
            "/habits",
            get(habits::list_habits)
                .post(habits::create_habit)
                .fallback(method_not_allowed),
        )
        .route(
            "/habits/:habit_id",
            get(habits::find_habit)
                .put(habits::update_habit)
                .delete(habits::delete_habit)
                .fallback(method_not_allowed),
        )
        .route(
            "/habit-logs",
            get(habit_logs::list_habit_logs)
                .post(habit_logs::create_habit_log)
                .fallback(method_not_allowed),
        )
        .route(
            "/habit-logs/:log_id",
            get(habit_logs::find_habit_log)
                .put(habit_logs::update_habit_log)
                .delete(habit_logs::delete_habit_log)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .layer(from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
