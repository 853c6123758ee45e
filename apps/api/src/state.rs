use std::sync::Arc;

use sqlx::PgPool;

use crate::ai_client::AiClient;
use crate::ats::scorer::KeywordScorer;
use crate::courses::CourseSource;
use crate::keywords::KeywordSource;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub ai: AiClient,
    /// Keyword-match backend for ATS scoring. Default: GeminiKeywordScorer.
    pub keyword_scorer: Arc<dyn KeywordScorer>,
    pub keywords: Arc<dyn KeywordSource>,
    pub courses: Arc<dyn CourseSource>,
    /// Page size and margins used for PDF export. A4 portrait, 15 mm margins.
    pub page_geometry: PageGeometry,
}
