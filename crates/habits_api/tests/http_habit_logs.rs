mod common;

use axum::http::{Method, StatusCode};
use common::{app, id_of, send, USER_A, USER_B};
use serde_json::json;

const MORNING_RUN: &str = r#"{"habitId":"habit-1","date":"2024-05-01","note":"5km"}"#;

#[tokio::test]
async fn create_then_get_returns_same_log() {
    let app = app();

    let created = send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.content_type.as_deref(), Some("application/json"));
    let id = id_of(&created.body);
    assert_eq!(created.body["habitId"], "habit-1");
    assert_eq!(created.body["date"], "2024-05-01");
    assert_eq!(created.body["note"], "5km");

    let fetched = send(&app, Method::GET, &format!("/habit-logs/{id}"), Some(USER_A), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);
}

#[tokio::test]
async fn missing_fields_default_to_empty_strings() {
    let app = app();

    let created = send(&app, Method::POST, "/habit-logs", Some(USER_A), Some("{}")).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["habitId"], "");
    assert_eq!(created.body["date"], "");
    assert_eq!(created.body["note"], "");
}

#[tokio::test]
async fn logs_and_habits_are_listed_separately() {
    let app = app();

    send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    send(
        &app,
        Method::POST,
        "/habits",
        Some(USER_A),
        Some(r#"{"name":"Run","description":"","color":""}"#),
    )
    .await;

    let logs = send(&app, Method::GET, "/habit-logs", Some(USER_A), None).await;
    assert_eq!(logs.status, StatusCode::OK);
    assert_eq!(logs.body.as_array().unwrap().len(), 2);

    let habits = send(&app, Method::GET, "/habits", Some(USER_A), None).await;
    assert_eq!(habits.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn habit_id_lookup_does_not_reach_logs() {
    let app = app();
    let created = send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    let id = id_of(&created.body);

    let as_habit = send(&app, Method::GET, &format!("/habits/{id}"), Some(USER_A), None).await;
    assert_eq!(as_habit.status, StatusCode::NOT_FOUND);

    let deleted = send(&app, Method::DELETE, &format!("/habits/{id}"), Some(USER_A), None).await;
    assert_eq!(deleted.status, StatusCode::NOT_FOUND);

    let still_there =
        send(&app, Method::GET, &format!("/habit-logs/{id}"), Some(USER_A), None).await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    let created = send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    let id = id_of(&created.body);

    let updated = send(
        &app,
        Method::PUT,
        &format!("/habit-logs/{id}"),
        Some(USER_A),
        Some(r#"{"habitId":"habit-2","date":"2024-05-02","note":"rest day"}"#),
    )
    .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], id.as_str());
    assert_eq!(updated.body["habitId"], "habit-2");
    assert_eq!(updated.body["note"], "rest day");
    assert_eq!(updated.body["createdAt"], created.body["createdAt"]);
}

#[tokio::test]
async fn update_with_bad_json_is_bad_request() {
    let app = app();
    let created = send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    let id = id_of(&created.body);

    let response = send(
        &app,
        Method::PUT,
        &format!("/habit-logs/{id}"),
        Some(USER_A),
        Some(r#"{"note": 5}"#),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({"error": "Could not parse JSON"}));

    let fetched = send(&app, Method::GET, &format!("/habit-logs/{id}"), Some(USER_A), None).await;
    assert_eq!(fetched.body, created.body);
}

#[tokio::test]
async fn delete_then_lookup_is_not_found() {
    let app = app();
    let created = send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    let id = id_of(&created.body);

    let deleted =
        send(&app, Method::DELETE, &format!("/habit-logs/{id}"), Some(USER_A), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Successfully deleted habit log");

    let fetched = send(&app, Method::GET, &format!("/habit-logs/{id}"), Some(USER_A), None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["error"], "Could not find habit log by ID");

    let deleted_again =
        send(&app, Method::DELETE, &format!("/habit-logs/{id}"), Some(USER_A), None).await;
    assert_eq!(deleted_again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logs_are_isolated_between_tenants() {
    let app = app();
    let created = send(&app, Method::POST, "/habit-logs", Some(USER_A), Some(MORNING_RUN)).await;
    let id = id_of(&created.body);

    let listed = send(&app, Method::GET, "/habit-logs", Some(USER_B), None).await;
    assert_eq!(listed.body, json!([]));

    let updated = send(
        &app,
        Method::PUT,
        &format!("/habit-logs/{id}"),
        Some(USER_B),
        Some(MORNING_RUN),
    )
    .await;
    assert_eq!(updated.status, StatusCode::NOT_FOUND);

    let listed_b = send(&app, Method::GET, "/habit-logs", Some(USER_B), None).await;
    assert_eq!(listed_b.body, json!([]));
}

#[tokio::test]
async fn missing_tenant_is_internal_error() {
    let app = app();
    let response = send(&app, Method::GET, "/habit-logs", None, None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Could not get user");
}
