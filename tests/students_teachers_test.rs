mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

fn student(n: u32) -> Value {
    json!({
        "full_name": format!("Student {n}"),
        "email": format!("student{n}@example.com"),
        "student_id": format!("STU{n:03}"),
        "course": "Grade 10",
        "phone": "0771234567"
    })
}

#[tokio::test]
async fn student_crud() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = post_json(&app, "/api/students", Some(&token), student(1)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["student"]["status"], "active");
    assert_eq!(body["student"]["created_by"], "admin");
    let id = body["student_id"].as_str().unwrap().to_string();

    let (status, body) = put_json(
        &app,
        &format!("/api/students/{id}"),
        Some(&token),
        json!({ "phone": "0710000000", "status": "graduated" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["phone"], "0710000000");
    assert_eq!(body["student"]["full_name"], "Student 1");

    let (status, body) = get(&app, &format!("/api/students/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["status"], "graduated");

    let (status, _) = delete(&app, &format!("/api/students/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, &format!("/api/students/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_validation_and_duplicates() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, _) = post_json(&app, "/api/students", Some(&token), json!({ "full_name": "X" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    post_json(&app, "/api/students", Some(&token), student(1)).await;
    let mut dup = student(2);
    dup["student_id"] = json!("STU001");
    let (status, _) = post_json(&app, "/api/students", Some(&token), dup).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = get(&app, "/api/students", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn student_listing_searches_and_paginates() {
    let app = test_app().await;
    let token = login(&app).await;

    for n in 1..=12 {
        post_json(&app, "/api/students", Some(&token), student(n)).await;
    }

    let (status, body) = get(&app, "/api/students", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["pages"], 2);
    assert_eq!(body["students"].as_array().unwrap().len(), 10);
    assert_eq!(body["students"][0]["student_id"], "STU012");

    let (_, body) = get(&app, "/api/students?search=stu007", Some(&token)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["students"][0]["full_name"], "Student 7");
}

#[tokio::test]
async fn huge_page_number_returns_an_empty_page() {
    let app = test_app().await;
    let token = login(&app).await;
    post_json(&app, "/api/students", Some(&token), student(1)).await;

    let (status, body) = get(
        &app,
        "/api/students?page=9223372036854775807&limit=10",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], i64::MAX);
    assert_eq!(body["pages"], 1);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let app = test_app().await;
    let token = login(&app).await;

    post_json(&app, "/api/students", Some(&token), student(1)).await;
    let mut underscored = student(2);
    underscored["email"] = json!("kamal_perera@example.com");
    post_json(&app, "/api/students", Some(&token), underscored).await;

    let (status, body) = get(&app, "/api/students?search=%25", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);

    let (_, body) = get(&app, "/api/students?search=_", Some(&token)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["students"][0]["student_id"], "STU002");
}

#[tokio::test]
async fn teacher_crud() {
    let app = test_app().await;
    let token = login(&app).await;

    let body = json!({
        "name": "Mrs. Perera",
        "subject": "Mathematics",
        "contact": "0771112222",
        "email": "perera@example.com"
    });
    let (status, created) = post_json(&app, "/api/teachers", Some(&token), body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["teacher_id"].as_str().unwrap().to_string();

    let (status, _) = post_json(&app, "/api/teachers", Some(&token), body).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post_json(&app, "/api/teachers", Some(&token), json!({ "name": "No Subject" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = get(&app, "/api/teachers", Some(&token)).await;
    assert_eq!(list["teachers"].as_array().unwrap().len(), 1);
    assert_eq!(list["teachers"][0]["subject"], "mathematics");

    let (status, updated) = put_json(
        &app,
        &format!("/api/teachers/{id}"),
        Some(&token),
        json!({ "status": "inactive" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["teacher"]["status"], "inactive");
    assert_eq!(updated["teacher"]["name"], "Mrs. Perera");

    let (status, _) = get(&app, &format!("/api/teachers/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = delete(&app, &format!("/api/teachers/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, &format!("/api/teachers/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
