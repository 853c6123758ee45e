pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::courses::handle_get_courses;
use crate::onboarding::{handle_status, handle_submit};
use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resume",
            get(handlers::handle_get_resume).put(handlers::handle_save_resume),
        )
        .route("/api/v1/resume/preview", post(handlers::handle_preview))
        .route("/api/v1/resume/export", post(handlers::handle_export))
        .route("/api/v1/resume/ats-score", post(handlers::handle_ats_score))
        .route("/api/v1/resume/keywords", post(handlers::handle_keywords))
        .route("/api/v1/resume/improve", post(handlers::handle_improve))
        // Onboarding API
        .route("/api/v1/onboarding", post(handle_submit))
        .route("/api/v1/onboarding/status", get(handle_status))
        // Courses API
        .route("/api/v1/courses", get(handle_get_courses))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::ai_client::AiClient;
    use crate::ats::scorer::GeminiKeywordScorer;
    use crate::config::Config;
    use crate::courses::CourseClient;
    use crate::keywords::KeywordClient;
    use crate::layout::default_page_geometry;

    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/careerflow_test".to_string(),
            gemini_api_key: "test-key".to_string(),
            keyword_service_url: "http://127.0.0.1:9".to_string(),
            course_service_url: "http://127.0.0.1:9".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        };
        let http = reqwest::Client::new();
        let ai = AiClient::new(http.clone(), config.gemini_api_key.clone());
        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            keyword_scorer: Arc::new(GeminiKeywordScorer(ai.clone())),
            keywords: Arc::new(KeywordClient::new(
                http.clone(),
                config.keyword_service_url.clone(),
            )),
            courses: Arc::new(CourseClient::new(http, config.course_service_url.clone())),
            ai,
            page_geometry: default_page_geometry(),
        }
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = build_router(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "careerflow-api");
    }

    #[tokio::test]
    async fn test_resume_routes_require_identity() {
        for (method, uri) in [
            ("GET", "/api/v1/resume"),
            ("GET", "/api/v1/onboarding/status"),
            ("GET", "/api/v1/courses"),
        ] {
            let response = build_router(test_state())
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"]["code"], "UNAUTHORIZED");
        }
    }
}
