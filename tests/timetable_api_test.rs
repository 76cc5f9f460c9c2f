mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

fn entry(date: &str, start: &str, end: &str, subject: &str) -> Value {
    json!({
        "date": date,
        "start_time": start,
        "end_time": end,
        "subject": subject,
        "grade": "6"
    })
}

#[tokio::test]
async fn entries_are_listed_in_date_order_with_weekday() {
    let app = test_app().await;
    let token = login(&app).await;

    for body in [
        entry("2025-03-15", "09:00", "10:00", "Science"),
        entry("2025-03-14", "11:00", "12:00", "English"),
        entry("2025-03-14", "08:30", "09:30", "Maths"),
    ] {
        let (status, _) = post_json(&app, "/api/timetable", Some(&token), body).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/api/timetable", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["subject"], "maths");
    assert_eq!(entries[0]["day"], "Friday");
    assert_eq!(entries[2]["day"], "Saturday");

    let (_, filtered) = get(&app, "/api/timetable?date=2025-03-14&subject=English", None).await;
    assert_eq!(filtered["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleted_entry_disappears() {
    let app = test_app().await;
    let token = login(&app).await;

    let (_, created) = post_json(
        &app,
        "/api/timetable",
        Some(&token),
        entry("2025-03-14", "09:00", "10:00", "Maths"),
    )
    .await;
    let id = created["entry"]["id"].as_str().unwrap().to_string();

    let (status, _) = delete(&app, &format!("/api/timetable/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/timetable", None).await;
    assert!(body["entries"].as_array().unwrap().is_empty());

    let (status, _) = delete(&app, &format!("/api/timetable/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rewrites_entry_in_place() {
    let app = test_app().await;
    let token = login(&app).await;

    let (_, created) = post_json(
        &app,
        "/api/timetable",
        Some(&token),
        entry("2025-03-14", "09:00", "10:00", "Maths"),
    )
    .await;
    let id = created["entry"]["id"].as_str().unwrap().to_string();

    let (status, body) = put_json(
        &app,
        &format!("/api/timetable/{id}"),
        Some(&token),
        json!({
            "date": "2025-03-17",
            "startTime": "14:00",
            "endTime": "15:30",
            "subject": "History",
            "grade": "7"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["id"], id.as_str());
    assert_eq!(body["entry"]["day"], "Monday");
    assert_eq!(body["entry"]["start_time"], "14:00");

    let (status, _) = put_json(
        &app,
        "/api/timetable/unknown",
        Some(&token),
        entry("2025-03-14", "09:00", "10:00", "Maths"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_entries_are_rejected() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, _) = post_json(
        &app,
        "/api/timetable",
        Some(&token),
        entry("2025-03-14", "10:00", "09:00", "Maths"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&app, "/api/timetable", Some(&token), json!({ "date": "2025-03-14" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/timetable",
        None,
        entry("2025-03-14", "09:00", "10:00", "Maths"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bulk_replace_is_all_or_nothing() {
    let app = test_app().await;
    let token = login(&app).await;

    post_json(
        &app,
        "/api/timetable",
        Some(&token),
        entry("2025-03-14", "09:00", "10:00", "Maths"),
    )
    .await;

    let (status, err) = put_json(
        &app,
        "/api/timetable",
        Some(&token),
        json!({ "entries": [
            entry("2025-03-20", "09:00", "10:00", "Science"),
            entry("2025-03-21", "12:00", "11:00", "English"),
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["message"].as_str().unwrap().starts_with("entry 2:"));

    let (_, body) = get(&app, "/api/timetable", None).await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["subject"], "maths");

    let (status, body) = put_json(
        &app,
        "/api/timetable",
        Some(&token),
        json!({ "entries": [
            entry("2025-03-21", "11:00", "12:00", "English"),
            entry("2025-03-20", "09:00", "10:00", "Science"),
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/api/timetable", None).await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["subject"], "science");
}

#[tokio::test]
async fn stats_count_distinct_values() {
    let app = test_app().await;
    let token = login(&app).await;

    for body in [
        entry("2025-03-14", "09:00", "10:00", "Maths"),
        entry("2025-03-14", "10:00", "11:00", "Science"),
        entry("2025-03-15", "09:00", "10:00", "Maths"),
    ] {
        post_json(&app, "/api/timetable", Some(&token), body).await;
    }

    let (status, stats) = get(&app, "/api/timetable/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_classes"], 3);
    assert_eq!(stats["subjects"], 2);
    assert_eq!(stats["grades"], 1);
    assert_eq!(stats["days_scheduled"], 2);
}
