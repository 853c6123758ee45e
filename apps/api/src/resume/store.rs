//! Persistence for the flattened resume text. One resume per user.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;

/// Returns the saved resume text, if the user has one.
pub async fn load_content(pool: &PgPool, user_id: Uuid) -> Result<Option<String>, AppError> {
    let content: Option<String> =
        sqlx::query_scalar("SELECT content FROM resumes WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    Ok(content)
}

/// Inserts or replaces the user's resume text. Existing ATS results are kept.
pub async fn save_content(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
) -> Result<ResumeRow, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, content)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id)
        DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    info!(user_id = %user_id, bytes = content.len(), "Resume saved");
    Ok(row)
}

/// Stores an ATS score and feedback on the user's resume.
/// Returns `None` when the user has not saved a resume yet.
pub async fn record_ats(
    pool: &PgPool,
    user_id: Uuid,
    score: u32,
    feedback: &str,
) -> Result<Option<ResumeRow>, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET ats_score = $1, feedback = $2, updated_at = NOW()
        WHERE user_id = $3
        RETURNING *
        "#,
    )
    .bind(f64::from(score))
    .bind(feedback)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
