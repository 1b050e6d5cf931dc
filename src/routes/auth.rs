// SPDX-License-Identifier: MIT

//! LINE log-in callback.
//!
//! Walks the handshake from redeemed state to a fresh access token:
//! redeem the single-use state, exchange the code, verify the id_token,
//! link or create the user, mint a token, and send the browser back to
//! where it came from with the token in the URL fragment (never a query
//! parameter, so it is not sent to any server).

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::ident;
use crate::models::{LoginState, UserRecord};
use crate::origin;
use crate::services::line::LineProfile;
use crate::AppState;

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// OAuth callback: redeem state, exchange code, link user, redirect.
pub async fn log_in_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    // Missing parameters (user cancelled, or someone poked the endpoint
    // by hand): quietly send them to the app root.
    let (Some(code), Some(state_token)) = (params.code, params.state) else {
        tracing::warn!("Log-in callback without code/state");
        return Ok(Redirect::temporary(&state.config.app_origin));
    };

    let login_state = state
        .db
        .take_login_state(&state_token)
        .await?
        .ok_or(AppError::InvalidState(state_token))?;

    let id_token = state.line.exchange_code(&code).await?;
    let profile = state.line.verify_id_token(&id_token)?;

    let access_token = link_user(&state, &profile).await?;
    let redirect_url = completion_redirect(&login_state, &state.config.app_origin, &access_token);

    tracing::info!(path = %login_state.path, "Log-in completed");
    Ok(Redirect::temporary(&redirect_url))
}

/// The URL the browser is finally sent to: the origin the log-in started
/// from, the stored return path, and the token in the fragment.
fn completion_redirect(login_state: &LoginState, app_origin: &str, access_token: &str) -> String {
    let base = login_state.origin.base_url(app_origin);
    origin::url_with_fragment(&base, &login_state.path, &[("accessToken", access_token)])
}

/// Find the user for a verified LINE identity, creating them on first
/// log-in, and issue a fresh access token. The stored hash is replaced
/// wholesale, so any previously issued token stops working.
async fn link_user(state: &Arc<AppState>, profile: &LineProfile) -> Result<String> {
    let access_token = ident::generate_access_token()?;
    let token_hash = ident::hash_access_token(&access_token)?;

    match state.db.find_user_by_line_id(&profile.line_user_id).await? {
        Some(mut user) => {
            user.access_token_hash = token_hash;
            state.db.upsert_user(&user).await?;
            tracing::info!(user_id = %user.id, "Existing user logged in");
        }
        None => {
            let image_file_hash = match &profile.picture_url {
                Some(url) => {
                    let (bytes, mime_type) = state.line.fetch_image(url).await?;
                    state.files.save(&bytes, &mime_type).await?
                }
                None => String::new(),
            };

            let user = UserRecord {
                id: ident::generate_id()?,
                name: profile.name.clone(),
                goal: String::new(),
                line_user_id: profile.line_user_id.clone(),
                image_file_hash,
                access_token_hash: token_hash,
                created_at: chrono::Utc::now(),
                role: None,
                team_id: None,
                cycle_ids: Vec::new(),
            };
            state.db.upsert_user(&user).await?;
            tracing::info!(user_id = %user.id, "New user created");
        }
    }

    Ok(access_token)
}
