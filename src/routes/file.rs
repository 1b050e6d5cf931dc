// SPDX-License-Identifier: MIT

//! Stored file delivery.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::AppState;

/// Files are immutable under their content hash, so a year-long public
/// cache is safe.
const CACHE_CONTROL: &str = "public, max-age=31536000";

/// Serve a stored file by content hash.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Result<Response> {
    validate_hash(&hash)?;

    let (mime_type, bytes) = state
        .files
        .open(&hash)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("file ({})", hash)))?;

    Ok((
        [
            (header::CONTENT_TYPE, mime_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        bytes,
    )
        .into_response())
}

/// Reject path parameters that cannot be a stored hash.
///
/// Real hashes are lowercase hex, but seeded sample files use short names
/// like "a.png", so only clearly malformed input is refused.
fn validate_hash(hash: &str) -> Result<()> {
    let ok = !hash.is_empty()
        && hash
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "malformed file hash: {}",
            hash
        )))
    }
}
