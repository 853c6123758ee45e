mod ai_client;
mod ats;
mod auth;
mod config;
mod courses;
mod db;
mod errors;
mod keywords;
mod layout;
mod models;
mod onboarding;
mod remote;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::AiClient;
use crate::ats::scorer::GeminiKeywordScorer;
use crate::config::Config;
use crate::courses::CourseClient;
use crate::db::create_pool;
use crate::keywords::KeywordClient;
use crate::layout::default_page_geometry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerFlow API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // One HTTP connection pool shared by every remote collaborator
    let http = reqwest::Client::new();

    let ai = AiClient::new(http.clone(), config.gemini_api_key.clone());
    info!("AI client initialized (model: {})", ai_client::MODEL);

    let keyword_scorer = Arc::new(GeminiKeywordScorer(ai.clone()));
    let keywords = Arc::new(KeywordClient::new(
        http.clone(),
        config.keyword_service_url.clone(),
    ));
    let courses = Arc::new(CourseClient::new(http, config.course_service_url.clone()));
    info!(
        "Remote services: keywords={}, courses={}",
        config.keyword_service_url, config.course_service_url
    );

    let page_geometry = default_page_geometry();

    // Build app state
    let state = AppState {
        db,
        ai,
        keyword_scorer,
        keywords,
        courses,
        page_geometry,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the deployed frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
