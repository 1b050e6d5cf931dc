// SPDX-License-Identifier: MIT

//! LINE Login client.
//!
//! Handles:
//! - Building the authorization URL for the log-in redirect
//! - Exchanging an authorization code for an id_token
//! - Verifying the id_token (HS256, signed with the channel secret)
//! - Downloading the profile picture at sign-up
//!
//! Every step is a single best-effort call; there are no retries.

use crate::config::Config;
use crate::error::AppError;
use crate::origin;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

const LINE_ISSUER: &str = "https://access.line.me";

/// LINE Login API client.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    token_url: String,
    channel_id: String,
    channel_secret: String,
    redirect_uri: String,
}

/// Identity extracted from a verified id_token.
#[derive(Debug, Clone)]
pub struct LineProfile {
    /// Stable LINE user ID (`sub` claim)
    pub line_user_id: String,
    /// Display name from the `profile` scope
    pub name: String,
    /// Profile picture URL, if the user has one
    pub picture_url: Option<String>,
}

/// id_token claims we care about.
#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    name: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
}

impl LineClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: "https://api.line.me/oauth2/v2.1/token".to_string(),
            channel_id: config.line_channel_id.clone(),
            channel_secret: config.line_channel_secret.clone(),
            redirect_uri: config.log_in_redirect_uri.clone(),
        }
    }

    /// Build the authorization URL the browser is sent to.
    ///
    /// `state` must already be persisted; LINE echoes it back on the
    /// callback so it can be redeemed there.
    pub fn authorize_url(&self, state: &str) -> String {
        origin::url_with_query(
            "access.line.me",
            &["oauth2", "v2.1", "authorize"],
            &[
                ("response_type", "code"),
                ("client_id", &self.channel_id),
                ("redirect_uri", &self.redirect_uri),
                ("scope", "profile openid"),
                ("state", state),
            ],
        )
    }

    /// Exchange the callback's authorization code for an id_token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.channel_id.as_str()),
                ("client_secret", self.channel_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::LineApi(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LineApi(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::LineApi(format!("Malformed token response: {}", e)))?;
        Ok(token.id_token)
    }

    /// Verify an id_token's signature and claims.
    ///
    /// LINE signs the id_token with HS256 using the channel secret; the
    /// issuer and audience are checked along with the expiry.
    pub fn verify_id_token(&self, id_token: &str) -> Result<LineProfile, AppError> {
        let key = DecodingKey::from_secret(self.channel_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[LINE_ISSUER]);
        validation.set_audience(&[&self.channel_id]);

        let token_data = decode::<IdTokenClaims>(id_token, &key, &validation)
            .map_err(|e| AppError::InvalidExternalToken(e.to_string()))?;

        let claims = token_data.claims;
        Ok(LineProfile {
            line_user_id: claims.sub,
            name: claims.name.unwrap_or_else(|| "LINE User".to_string()),
            picture_url: claims.picture,
        })
    }

    /// Download an image, returning its bytes and mime type.
    pub async fn fetch_image(&self, url: &str) -> Result<(Vec<u8>, String), AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::LineApi(format!("Image download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::LineApi(format!(
                "Image download returned {}",
                response.status()
            )));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::LineApi(format!("Image download failed: {}", e)))?;

        Ok((bytes.to_vec(), mime_type))
    }
}
