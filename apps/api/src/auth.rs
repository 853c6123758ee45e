//! Caller identity. The upstream identity provider forwards the authenticated
//! external user id in `x-user-id`, plus the account's email and name when known.
//! Handlers receive the resolved `User`; a caller seen for the first time is
//! provisioned on the spot.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Extractor for the authenticated, persisted user.
pub struct AuthUser(pub User);

/// What the identity provider tells us about the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
}

impl Identity {
    /// Reads the identity headers. `None` when the user id is missing or blank.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let external_id = header_value(headers, USER_ID_HEADER)?;
        Some(Self {
            external_id: external_id.to_string(),
            email: header_value(headers, USER_EMAIL_HEADER)
                .unwrap_or_default()
                .to_string(),
            name: header_value(headers, USER_NAME_HEADER).map(str::to_string),
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_headers(&parts.headers).ok_or_else(|| {
            warn!("identity header missing, request denied");
            AppError::Unauthorized
        })?;

        let user = match find_by_external_id(&state.db, &identity.external_id).await? {
            Some(user) => user,
            None => provision(&state.db, &identity).await?,
        };

        Ok(AuthUser(user))
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

async fn find_by_external_id(pool: &PgPool, external_id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Creates the row for a first-time caller. A concurrent request that already
/// created it wins; its row is returned unchanged.
async fn provision(pool: &PgPool, identity: &Identity) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, external_id, email, name)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (external_id)
        DO UPDATE SET external_id = users.external_id
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&identity.external_id)
    .bind(&identity.email)
    .bind(&identity.name)
    .fetch_one(pool)
    .await?;

    info!(user_id = %user.id, external_id = %identity.external_id, "User provisioned");
    Ok(user)
}
