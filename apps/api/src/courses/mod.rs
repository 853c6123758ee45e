//! Course recommendations proxied from the course service.

use async_trait::async_trait;
use axum::{extract::State, Json};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::remote::{ensure_success, ServiceError};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CoursesResponse {
    #[serde(default)]
    recommendations: Vec<Course>,
}

#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn recommendations(&self, external_user_id: &str) -> Result<Vec<Course>, ServiceError>;
}

#[derive(Clone)]
pub struct CourseClient {
    client: Client,
    base_url: String,
}

impl CourseClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl CourseSource for CourseClient {
    async fn recommendations(&self, external_user_id: &str) -> Result<Vec<Course>, ServiceError> {
        let response = self
            .client
            .get(format!("{}/api/get-courses", self.base_url))
            .query(&[("userId", external_user_id)])
            .send()
            .await?;

        let body: CoursesResponse = ensure_success(response).await?.json().await?;
        Ok(body.recommendations)
    }
}

#[derive(Debug, Serialize)]
pub struct CoursesPayload {
    pub recommendations: Vec<Course>,
}

/// GET /api/v1/courses
pub async fn handle_get_courses(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<CoursesPayload>, AppError> {
    let recommendations = fetch(state.courses.as_ref(), &user.external_id).await?;
    info!(user_id = %user.id, count = recommendations.len(), "Courses fetched");
    Ok(Json(CoursesPayload { recommendations }))
}

async fn fetch(source: &dyn CourseSource, external_user_id: &str) -> Result<Vec<Course>, AppError> {
    source.recommendations(external_user_id).await.map_err(|e| {
        error!("Course service error: {e}");
        AppError::RemoteService("Failed to fetch course recommendations".to_string())
    })
}
