//! Team model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Team document stored in Firestore.
///
/// A team always has exactly one manager. The player list only ever grows
/// (append/union); no operation removes a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Random 128-bit ID (also the document ID)
    pub id: String,
    /// Team name
    pub name: String,
    /// Team goal
    pub goal: String,
    /// Shared information for the whole team
    pub information: String,
    /// When the team was created
    pub created_at: DateTime<Utc>,
    /// The managing user
    pub manager_id: String,
    /// Player user IDs, append-only
    pub player_ids: Vec<String>,
}
