use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ats::scorer::KeywordScorer;
use crate::ats::{self, AtsResult};
use crate::auth::AuthUser;
use crate::errors::{AppError, FieldError};
use crate::keywords;
use crate::layout::{render_blocking, write_pdf, EXPORT_FILE_NAME};
use crate::models::resume::ResumeRow;
use crate::resume::improve::{improve, ImproveKind};
use crate::resume::model::Resume;
use crate::resume::projector::{project_with, RenderStrategy};
use crate::resume::store;
use crate::resume::sync::{normalize_for_save, recompute_preview, Preview};
use crate::resume::validation::validate_resume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Load / save
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResumeContentResponse {
    pub content: String,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ResumeContentResponse>, AppError> {
    let content = store::load_content(&state.db, user.id).await?.unwrap_or_default();
    Ok(Json(ResumeContentResponse { content }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub content: String,
    /// When present and non-blank, the saved text is also ATS-scored.
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub resume: ResumeRow,
    pub ats: Option<AtsResult>,
    /// Set when scoring was requested and failed. The save itself still succeeded.
    pub ats_error: Option<String>,
}

/// PUT /api/v1/resume
pub async fn handle_save_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let content = normalize_for_save(&req.content);
    let mut resume = store::save_content(&state.db, user.id, &content).await?;

    let (ats, mut ats_error) = match score_after_save(
        state.keyword_scorer.as_ref(),
        &content,
        req.job_description.as_deref(),
    )
    .await
    {
        Ok(ats) => (ats, None),
        Err(message) => (None, Some(message)),
    };

    if let Some(result) = &ats {
        match store::record_ats(&state.db, user.id, result.score, &result.feedback).await {
            Ok(Some(row)) => resume = row,
            Ok(None) => {}
            Err(e) => {
                warn!(user_id = %user.id, "ATS result not stored after save: {e}");
                ats_error = Some(format!("ATS score could not be stored: {e}"));
            }
        }
    }

    Ok(Json(SaveResponse {
        resume,
        ats,
        ats_error,
    }))
}

/// Scores freshly saved text when a non-blank job description came with the save.
/// A scoring failure is returned as a message so it never turns the save into an error.
async fn score_after_save(
    scorer: &dyn KeywordScorer,
    content: &str,
    job_description: Option<&str>,
) -> Result<Option<AtsResult>, String> {
    let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) else {
        return Ok(None);
    };
    match ats::score_resume(scorer, content, jd).await {
        Ok(result) => Ok(Some(result)),
        Err(e) => {
            warn!("ATS scoring after save failed: {e}");
            Err(format!("ATS scoring failed: {e}"))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Preview / export
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub form: Resume,
    /// Text loaded with the editing session.
    #[serde(default)]
    pub initial: String,
    /// Text the editor currently shows, if tracked by the client.
    #[serde(default)]
    pub displayed: Option<String>,
    /// Projection the client last displayed, if any.
    #[serde(default)]
    pub last_projected: Option<String>,
    #[serde(default)]
    pub strategy: RenderStrategy,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub preview: Preview,
    pub errors: Vec<FieldError>,
}

/// POST /api/v1/resume/preview
pub async fn handle_preview(
    AuthUser(user): AuthUser,
    Json(req): Json<PreviewRequest>,
) -> Json<PreviewResponse> {
    let preview = recompute_preview(
        &req.form,
        user.display_name(),
        req.strategy,
        &req.initial,
        req.displayed.as_deref(),
        req.last_projected.as_deref(),
    );
    let errors = validate_resume(&req.form);
    Json(PreviewResponse { preview, errors })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Hand-edited markdown, exported as is.
    #[serde(default)]
    pub content: Option<String>,
    /// Structured form, projected before export. Takes precedence over `content`.
    #[serde(default)]
    pub form: Option<Resume>,
    #[serde(default)]
    pub strategy: RenderStrategy,
}

/// POST /api/v1/resume/export
pub async fn handle_export(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let text = export_text(&req, user.display_name())?;
    let document = render_blocking(text, state.page_geometry).await?;
    let bytes = write_pdf(&document);

    info!(
        user_id = %user.id,
        pages = document.page_count(),
        bytes = bytes.len(),
        "Resume exported"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        Bytes::from(bytes),
    ))
}

fn export_text(req: &ExportRequest, author: &str) -> Result<String, AppError> {
    if let Some(form) = &req.form {
        let errors = validate_resume(form);
        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }
        return Ok(project_with(form, author, req.strategy));
    }
    match req.content.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(content) => Ok(content.to_string()),
        None => Err(AppError::Validation("Nothing to export".to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ATS, keywords, improvement
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsRequest {
    pub content: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Serialize)]
pub struct AtsResponse {
    #[serde(flatten)]
    pub result: AtsResult,
    /// False when the user has no saved resume to attach the score to.
    pub persisted: bool,
}

/// POST /api/v1/resume/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<AtsRequest>,
) -> Result<Json<AtsResponse>, AppError> {
    let result =
        ats::score_resume(state.keyword_scorer.as_ref(), &req.content, &req.job_description)
            .await?;
    let persisted = store::record_ats(&state.db, user.id, result.score, &result.feedback)
        .await?
        .is_some();

    info!(user_id = %user.id, score = result.score, persisted, "ATS score computed");
    Ok(Json(AtsResponse { result, persisted }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Serialize)]
pub struct KeywordsResponse {
    pub keywords: String,
}

/// POST /api/v1/resume/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let keywords = keywords::suggest(
        state.keywords.as_ref(),
        &req.job_description,
        user.industry.as_deref(),
    )
    .await?;
    Ok(Json(KeywordsResponse { keywords }))
}

#[derive(Deserialize)]
pub struct ImproveRequest {
    #[serde(default)]
    pub current: String,
    #[serde(rename = "type")]
    pub kind: ImproveKind,
    /// Suggested keywords to work into the text.
    #[serde(default)]
    pub keywords: Option<String>,
}

#[derive(Serialize)]
pub struct ImproveResponse {
    pub content: String,
}

/// POST /api/v1/resume/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let content = improve(
        &state.ai,
        req.kind,
        &req.current,
        req.keywords.as_deref(),
        user.industry.as_deref(),
    )
    .await?;
    Ok(Json(ImproveResponse { content }))
}
