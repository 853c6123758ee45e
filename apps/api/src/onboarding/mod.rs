//! Onboarding: industry, experience and skills stored on the user profile.

use axum::{extract::State, Json};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{AppError, FieldError};
use crate::models::user::User;
use crate::state::AppState;

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("leading-integer pattern is valid"));

pub const MAX_BIO_CHARS: usize = 500;
pub const MAX_EXPERIENCE_YEARS: i32 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnboardingInput {
    pub industry: String,
    pub sub_industry: String,
    pub bio: Option<String>,
    /// Years of experience as typed by the user.
    pub experience: String,
    /// Comma-separated skills.
    pub skills: String,
}

/// Validated profile, ready to store.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingProfile {
    pub industry: String,
    pub bio: Option<String>,
    pub experience: i32,
    pub skills: Vec<String>,
}

/// `<industry>-<sub-industry lower-cased, spaces replaced by '-'>`
pub fn format_industry(industry: &str, sub_industry: &str) -> String {
    format!(
        "{}-{}",
        industry.trim(),
        sub_industry.trim().to_lowercase().replace(' ', "-")
    )
}

/// Splits on commas, trims each skill and drops blanks.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks every field and collects all failures.
pub fn validate(input: &OnboardingInput) -> Result<OnboardingProfile, Vec<FieldError>> {
    let mut errors = Vec::new();

    if input.industry.trim().is_empty() {
        errors.push(FieldError::new("industry", "Please select an industry"));
    }
    if input.sub_industry.trim().is_empty() {
        errors.push(FieldError::new("subIndustry", "Please select a specialization"));
    }

    let bio = input
        .bio
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string);
    if bio.as_deref().is_some_and(|b| b.chars().count() > MAX_BIO_CHARS) {
        errors.push(FieldError::new(
            "bio",
            format!("Bio must be at most {MAX_BIO_CHARS} characters"),
        ));
    }

    let experience = match parse_experience(&input.experience) {
        Ok(years) => Some(years),
        Err(message) => {
            errors.push(FieldError::new("experience", message));
            None
        }
    };

    let skills = parse_skills(&input.skills);
    if skills.is_empty() {
        errors.push(FieldError::new("skills", "Please provide your skills"));
    }

    match (errors.is_empty(), experience) {
        (true, Some(experience)) => Ok(OnboardingProfile {
            industry: format_industry(&input.industry, &input.sub_industry),
            bio,
            experience,
            skills,
        }),
        _ => Err(errors),
    }
}

/// Reads the leading integer of the input, so `3.5` and `4 years` read as 3 and 4.
fn parse_experience(raw: &str) -> Result<i32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Please enter years of experience".to_string());
    }
    let years: i32 = LEADING_INTEGER
        .find(raw)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| "Experience must be a number of years".to_string())?;
    if years < 0 {
        return Err("Experience must be at least 0 years".to_string());
    }
    if years > MAX_EXPERIENCE_YEARS {
        return Err(format!("Experience cannot exceed {MAX_EXPERIENCE_YEARS} years"));
    }
    Ok(years)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub is_onboarded: bool,
}

/// GET /api/v1/onboarding/status
pub async fn handle_status(AuthUser(user): AuthUser) -> Json<OnboardingStatus> {
    Json(OnboardingStatus {
        is_onboarded: user.is_onboarded(),
    })
}

/// POST /api/v1/onboarding
pub async fn handle_submit(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<OnboardingInput>,
) -> Result<Json<User>, AppError> {
    let profile = validate(&input).map_err(AppError::InvalidFields)?;
    let updated = store_profile(&state.db, user.id, &profile).await?;
    info!(user_id = %user.id, industry = %profile.industry, "Onboarding complete");
    Ok(Json(updated))
}

async fn store_profile(
    pool: &PgPool,
    user_id: Uuid,
    profile: &OnboardingProfile,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET industry = $1, bio = $2, experience = $3, skills = $4
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&profile.industry)
    .bind(&profile.bio)
    .bind(profile.experience)
    .bind(&profile.skills)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(user)
}
