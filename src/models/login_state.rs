//! Single-use log-in state, correlating a LINE redirect with the path and
//! origin the user came from.

use crate::origin::Origin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log-in state document, keyed by its own random token.
///
/// Created when a log-in URL is issued and deleted when the callback
/// redeems it; a token can be consumed at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginState {
    /// The state token (also the document ID)
    pub token: String,
    /// Path to return the browser to after log-in
    pub path: String,
    /// Which host the final redirect should target
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
}
