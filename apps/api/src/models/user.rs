use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Header fallback when the identity provider has no name on record.
pub const DEFAULT_DISPLAY_NAME: &str = "Your Name";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Identifier issued by the external identity provider.
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    /// `<industry>-<sub-industry>` once onboarding is complete.
    pub industry: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<i32>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the resume header block.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    pub fn is_onboarded(&self) -> bool {
        self.industry.as_deref().is_some_and(|i| !i.trim().is_empty())
    }
}
