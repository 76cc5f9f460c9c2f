use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::AppJson;
use crate::auth::AuthAdmin;
use crate::db::feedback;
use crate::error::{AppError, AppResult};
use crate::models::{Feedback, FeedbackFilter, NewFeedbackRequest, PageInfo, Pagination, UpdateFeedbackRequest};
use crate::state::AppState;

const PUBLIC_DEFAULT_LIMIT: i64 = 2;
const TESTIMONIAL_DEFAULT_LIMIT: i64 = 10;
const TESTIMONIAL_MIN_RATING: i64 = 4;
const PUBLIC_MAX_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    limit: Option<i64>,
}

impl LimitQuery {
    fn resolve(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, PUBLIC_MAX_LIMIT)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminFeedbackQuery {
    status: Option<String>,
    #[serde(rename = "type")]
    feedback_type: Option<String>,
    min_rating: Option<i64>,
    page: Option<i64>,
    limit: Option<i64>,
}

#[derive(Serialize)]
pub struct FeedbackPage {
    feedbacks: Vec<Feedback>,
    #[serde(flatten)]
    page: PageInfo,
}

pub async fn submit(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewFeedbackRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let new = req.into_new_feedback()?;
    let fb = feedback::insert(&state.db, new).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Thank you for your feedback!",
            "feedback_id": fb.id,
            "feedback": fb,
        })),
    ))
}

pub async fn list_public(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Value>> {
    let rows = feedback::recent(&state.db, None, query.resolve(PUBLIC_DEFAULT_LIMIT)).await?;
    let feedbacks: Vec<Feedback> = rows.into_iter().map(Feedback::public_view).collect();
    Ok(Json(json!({ "feedbacks": feedbacks })))
}

pub async fn testimonials(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<Feedback>>> {
    let rows = feedback::recent(
        &state.db,
        Some(TESTIMONIAL_MIN_RATING),
        query.resolve(TESTIMONIAL_DEFAULT_LIMIT),
    )
    .await?;
    Ok(Json(rows.into_iter().map(Feedback::public_view).collect()))
}

pub async fn list_admin(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Query(query): Query<AdminFeedbackQuery>,
) -> AppResult<Json<FeedbackPage>> {
    let window = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .resolve(10, 100);
    let filter = FeedbackFilter {
        status: query.status,
        feedback_type: query.feedback_type,
        min_rating: query.min_rating,
    };

    let (feedbacks, total) = feedback::list_page(&state.db, &filter, window).await?;
    Ok(Json(FeedbackPage {
        feedbacks,
        page: PageInfo::new(window, total),
    }))
}

pub async fn stats(State(state): State<AppState>, _admin: AuthAdmin) -> AppResult<Json<Value>> {
    let stats = feedback::stats(&state.db).await?;
    Ok(Json(json!({ "stats": stats })))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateFeedbackRequest>,
) -> AppResult<Json<Value>> {
    let req = req.normalized()?;
    let fb = feedback::update(&state.db, &id, req)
        .await?
        .ok_or_else(|| AppError::not_found("Feedback"))?;
    Ok(Json(json!({ "message": "Feedback updated", "feedback": fb })))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    if !feedback::delete(&state.db, &id).await? {
        return Err(AppError::not_found("Feedback"));
    }
    Ok(Json(json!({ "message": "Feedback deleted" })))
}
