//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's role within a team.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, async_graphql::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[graphql(name = "manager")]
    Manager,
    #[graphql(name = "player")]
    Player,
}

/// User document stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Random 128-bit ID (also the document ID)
    pub id: String,
    /// Display name (from the LINE profile at sign-up)
    pub name: String,
    /// Personal goal, or coaching goal for a manager
    pub goal: String,
    /// LINE user ID the account is linked to
    pub line_user_id: String,
    /// Content hash of the avatar image
    pub image_file_hash: String,
    /// Hash of the most recently issued access token; replaced wholesale
    /// on every log-in, so only the newest token is valid
    pub access_token_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// None until the user creates or joins a team
    pub role: Option<Role>,
    /// None until the user creates or joins a team
    pub team_id: Option<String>,
    /// Cycles owned by this user; append-only
    pub cycle_ids: Vec<String>,
}
