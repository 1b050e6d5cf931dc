//! PDCA cycle model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One PDCA cycle, owned by exactly one user through that user's
/// `cycle_ids` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Random 128-bit ID (also the document ID)
    pub id: String,
    pub plan: String,
    #[serde(rename = "do")]
    pub do_: String,
    pub check: String,
    pub act: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}
