//! HTTP surface: JSON routes under `/api`, the health check and the static
//! front-end directories.

mod admin;
mod courses;
mod dashboard;
mod feedback;
mod registration;
mod settings;
mod students;
mod teachers;
mod timetable;

use axum::extract::{FromRequest, State};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

/// `Json` whose rejection renders as an [`AppError`] body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/admin/register", post(admin::register))
        .route("/admin/login", post(admin::login))
        .route("/admin/me", get(admin::me).put(admin::update_me))
        .route("/admin/change-password", post(admin::change_password))
        .route("/courses", get(courses::list).post(courses::create))
        .route(
            "/courses/{id}",
            get(courses::show).put(courses::update).delete(courses::remove),
        )
        .route("/feedback", get(feedback::list_public).post(feedback::submit))
        .route("/testimonials", get(feedback::testimonials))
        .route("/admin/feedback", get(feedback::list_admin))
        .route("/admin/feedback/stats", get(feedback::stats))
        .route(
            "/admin/feedback/{id}",
            put(feedback::update).delete(feedback::remove),
        )
        .route(
            "/timetable",
            get(timetable::list)
                .post(timetable::create)
                .put(timetable::replace_all),
        )
        .route("/timetable/stats", get(timetable::stats))
        .route(
            "/timetable/{id}",
            put(timetable::update).delete(timetable::remove),
        )
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/{id}",
            get(students::show).put(students::update).delete(students::remove),
        )
        .route("/teachers", get(teachers::list).post(teachers::create))
        .route(
            "/teachers/{id}",
            get(teachers::show).put(teachers::update).delete(teachers::remove),
        )
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/activity", get(dashboard::activity))
        .route("/dashboard/quick-actions", post(dashboard::quick_action))
        .route("/settings/app", get(settings::show).put(settings::update))
        .route(
            "/student-registration/link",
            get(registration::show)
                .post(registration::create)
                .put(registration::update),
        )
        .route("/public/registration-link", get(registration::public_link));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

/// The full application: routes, static front-end and middleware.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();
    let request_id = HeaderName::from_static("x-request-id");

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let root = &config.static_root;
    router(state)
        .nest_service("/admin", ServeDir::new(root.join("admin")))
        .nest_service("/shared", ServeDir::new(root.join("shared")))
        .fallback_service(ServeDir::new(root.join("public")))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match crate::db::ping(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "timestamp": timestamp,
            })),
        ),
        Err(err) => {
            error!("health check failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected",
                    "timestamp": timestamp,
                })),
            )
        }
    }
}
