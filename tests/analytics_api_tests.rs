// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for the analytics and refresh endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, TimeZone, Utc};
use habit_logger::db::RecordStore;
use habit_logger::models::{HabitLog, HabitStatus};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app, create_test_app_with};

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 65536).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A stored log with history, for seeding the store directly.
fn stored_log(user_id: &str, habit_id: &str) -> HabitLog {
    let created = Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap();
    let completions = vec![
        Utc.with_ymd_and_hms(2026, 8, 10, 7, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 8, 11, 7, 30, 0).unwrap(),
    ];
    HabitLog {
        habit_id: habit_id.to_string(),
        user_id: user_id.to_string(),
        title: "Old title".to_string(),
        description: None,
        frequency: "weekly".to_string(),
        days: vec![],
        last_completion_at: completions.last().copied(),
        completions,
        current_streak: 2,
        longest_streak: 2,
        status: HabitStatus::Active,
        created_at: created,
        updated_at: created,
    }
}

#[tokio::test]
async fn test_user_analytics_lists_only_that_users_habits() {
    let (app, _store, _state) = create_test_app();

    for (habit_id, user_id) in [("h1", "u1"), ("h2", "u1"), ("h3", "u2")] {
        let body = json!({"habit_id": habit_id, "user_id": user_id});
        let response = request(app.clone(), "POST", "/api/habit-logs/complete", Some(&body)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = request(app.clone(), "GET", "/api/habit-logs/user/u1", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let summaries = read_json(response).await;
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 2);

    let ids: Vec<&str> = summaries
        .iter()
        .map(|s| s["habit_id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"h1"));
    assert!(ids.contains(&"h2"));

    let response = request(app, "GET", "/api/habit-logs/user/u2", None).await;
    let summaries = read_json(response).await;
    assert_eq!(summaries.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_analytics_without_history_is_empty_list() {
    let (app, _store, _state) = create_test_app();

    let response = request(app, "GET", "/api/habit-logs/user/nobody-yet", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let summaries = read_json(response).await;
    assert_eq!(summaries, json!([]));
}

#[tokio::test]
async fn test_user_analytics_rejects_unknown_user() {
    let (app, _store, _state) = create_test_app_with(false, None);

    let response = request(app, "GET", "/api/habit-logs/user/ghost", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = read_json(response).await;
    assert_eq!(body["error"], "invalid_user");
}

#[tokio::test]
async fn test_habit_analytics_returns_streaks_and_rate() {
    let (app, _store, _state) = create_test_app();

    // Three consecutive days ending today
    for days_ago in [2i64, 1, 0] {
        let completed = Utc::now() - Duration::days(days_ago);
        let body = json!({
            "habit_id": "h1",
            "user_id": "u1",
            "completed_at": completed.to_rfc3339(),
        });
        let response = request(app.clone(), "POST", "/api/habit-logs/complete", Some(&body)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = request(app, "GET", "/api/habit-logs/user/u1/habit/h1", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = read_json(response).await;
    assert_eq!(summary["total_completions"], 3);
    assert_eq!(summary["current_streak"], 3);
    assert_eq!(summary["longest_streak"], 3);

    let current = summary["current_streak"].as_u64().unwrap();
    let longest = summary["longest_streak"].as_u64().unwrap();
    assert!(longest >= current);

    let rate = summary["success_rate"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&rate));
}

#[tokio::test]
async fn test_stale_history_reports_zero_current_streak() {
    let (app, _store, _state) = create_test_app();

    // Two consecutive days, both well in the past
    for days_ago in [10i64, 9] {
        let completed = Utc::now() - Duration::days(days_ago);
        let body = json!({
            "habit_id": "h1",
            "user_id": "u1",
            "completed_at": completed.to_rfc3339(),
        });
        let response = request(app.clone(), "POST", "/api/habit-logs/complete", Some(&body)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = request(app, "GET", "/api/habit-logs/user/u1/habit/h1", None).await;
    let summary = read_json(response).await;
    assert_eq!(summary["current_streak"], 0);
    assert_eq!(summary["longest_streak"], 2);
}

#[tokio::test]
async fn test_habit_analytics_unknown_habit_is_not_found() {
    let (app, _store, _state) = create_test_app();

    let response = request(app, "GET", "/api/habit-logs/user/u1/habit/missing", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_refresh_updates_metadata_and_keeps_history() {
    let (app, store, _state) = create_test_app();
    store.save(&stored_log("u1", "h1")).await.unwrap();

    let response = request(
        app,
        "PUT",
        "/api/habit-logs/user/u1/habit/h1/refresh",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = read_json(response).await;
    assert_eq!(summary["title"], "Morning run");
    assert_eq!(summary["frequency"], "daily");
    assert_eq!(summary["description"], "5k before breakfast");
    assert_eq!(summary["days"], json!(["MONDAY", "WEDNESDAY"]));

    // History and streaks survive a metadata refresh
    assert_eq!(summary["total_completions"], 2);
    assert_eq!(summary["current_streak"], 2);

    let stored = store.find_by_key("u1", "h1").await.unwrap().unwrap();
    assert_eq!(stored.title, "Morning run");
    assert_eq!(stored.completions.len(), 2);
}

#[tokio::test]
async fn test_refresh_without_fresh_metadata_returns_stored_log() {
    let (app, store, _state) = create_test_app_with(true, None);
    store.save(&stored_log("u1", "h1")).await.unwrap();

    let response = request(
        app,
        "PUT",
        "/api/habit-logs/user/u1/habit/h1/refresh",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = read_json(response).await;
    assert_eq!(summary["title"], "Old title");
    assert_eq!(summary["frequency"], "weekly");
    assert_eq!(summary["total_completions"], 2);
}

#[tokio::test]
async fn test_refresh_unknown_habit_is_not_found() {
    let (app, _store, _state) = create_test_app();

    let response = request(
        app,
        "PUT",
        "/api/habit-logs/user/u1/habit/missing/refresh",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
