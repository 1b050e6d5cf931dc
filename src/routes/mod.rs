// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod api;
pub mod auth;
pub mod file;
pub mod index;

use crate::origin::Origin;
use crate::AppState;
use axum::http::{header, Method};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// CORS check: the released app origin exactly, or a real
/// `http://localhost[:<port>]` dev origin. Lookalike hosts such as
/// `http://localhost.evil.com` are not localhost and are refused.
fn origin_allowed(app_origin: &str, origin: &str) -> bool {
    origin == app_origin
        || matches!(Origin::from_header(Some(origin)), Origin::Debug { .. })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS: the matched origin is reflected back.
    let app_origin = state.config.app_origin.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| origin_allowed(&app_origin, origin))
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(index::index_html))
        .route("/api", get(api::graphql_handler).post(api::graphql_handler))
        .route("/logInCallback", get(auth::log_in_callback))
        .route("/file/{hash}", get(file::get_file))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
