mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn health_reports_database() {
    let app = test_app().await;

    let (status, body) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn dashboard_stats_count_records() {
    let app = test_app().await;
    let token = login(&app).await;

    post_json(
        &app,
        "/api/students",
        Some(&token),
        json!({
            "full_name": "A", "email": "a@example.com", "student_id": "S1",
            "course": "Grade 9", "phone": "1"
        }),
    )
    .await;
    post_json(
        &app,
        "/api/students",
        Some(&token),
        json!({
            "full_name": "B", "email": "b@example.com", "student_id": "S2",
            "course": "Grade 9", "phone": "2", "status": "pending"
        }),
    )
    .await;
    post_json(&app, "/api/feedback", None, json!({ "name": "F", "message": "m", "rating": 3 })).await;

    let (status, body) = get(&app, "/api/dashboard/stats", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["stats"];
    assert_eq!(stats["total_students"], 1);
    assert_eq!(stats["pending_registrations"], 1);
    assert_eq!(stats["recent_registrations"], 2);
    assert_eq!(stats["total_admins"], 1);
    assert_eq!(stats["total_feedbacks"], 1);
    assert_eq!(stats["avg_rating"], 3.0);
    assert!(stats["last_login"].is_string());
}

#[tokio::test]
async fn dashboard_activity_covers_a_week() {
    let app = test_app().await;
    let token = login(&app).await;

    post_json(
        &app,
        "/api/students",
        Some(&token),
        json!({
            "full_name": "A", "email": "a@example.com", "student_id": "S1",
            "course": "Grade 9", "phone": "1"
        }),
    )
    .await;

    let (status, body) = get(&app, "/api/dashboard/activity", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let chart = body["activity"]["chart_data"].as_array().unwrap();
    assert_eq!(chart.len(), 7);
    assert_eq!(chart[6]["registrations"], 1);
    assert_eq!(body["activity"]["recent_students"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn quick_actions() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/dashboard/quick-actions",
        Some(&token),
        json!({ "action": "manage_students" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "mstudent.html");

    let (status, _) = post_json(
        &app,
        "/api/dashboard/quick-actions",
        Some(&token),
        json!({ "action": "launch_rockets" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn settings_default_then_saved() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = get(&app, "/api/settings/app", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["site_name"], "EduNova");
    assert_eq!(body["enable_registrations"], true);

    let (status, _) = put_json(&app, "/api/settings/app", Some(&token), json!({ "site_name": " " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put_json(
        &app,
        "/api/settings/app",
        Some(&token),
        json!({ "site_name": "EduNova", "logo_url": "not a url" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = put_json(
        &app,
        "/api/settings/app",
        Some(&token),
        json!({
            "site_name": "EduNova Institute",
            "logo_url": "",
            "cors_origins": [" http://a.test ", ""],
            "enable_registrations": false
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["cors_origins"], json!(["http://a.test"]));

    let (_, body) = get(&app, "/api/settings/app", Some(&token)).await;
    assert_eq!(body["site_name"], "EduNova Institute");
    assert_eq!(body["enable_registrations"], false);
}

#[tokio::test]
async fn registration_link_lifecycle() {
    let app = test_app().await;
    let token = login(&app).await;

    let (_, body) = get(&app, "/api/public/registration-link", None).await;
    assert_eq!(body["available"], false);

    let (status, _) = get(&app, "/api/student-registration/link", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = put_json(
        &app,
        "/api/student-registration/link",
        Some(&token),
        json!({ "link": "https://forms.example.com/a" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(
        &app,
        "/api/student-registration/link",
        Some(&token),
        json!({ "link": "not a url" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        &app,
        "/api/student-registration/link",
        Some(&token),
        json!({ "link": "https://forms.example.com/a" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["link"], "https://forms.example.com/a");
    assert_eq!(body["title"], "Student Registration Form");

    let (status, _) = post_json(
        &app,
        "/api/student-registration/link",
        Some(&token),
        json!({ "link": "https://forms.example.com/b" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = put_json(
        &app,
        "/api/student-registration/link",
        Some(&token),
        json!({ "link": "https://forms.example.com/b", "title": "Intake 2025" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/student-registration/link", Some(&token)).await;
    assert_eq!(body["link"], "https://forms.example.com/b");
    assert_eq!(body["title"], "Intake 2025");

    let (_, body) = get(&app, "/api/public/registration-link", None).await;
    assert_eq!(body["available"], true);
    assert_eq!(body["link"], "https://forms.example.com/b");

    put_json(
        &app,
        "/api/settings/app",
        Some(&token),
        json!({ "site_name": "EduNova", "enable_registrations": false }),
    )
    .await;
    let (_, body) = get(&app, "/api/public/registration-link", None).await;
    assert_eq!(body["available"], false);
    assert!(body.get("link").is_none());
}
