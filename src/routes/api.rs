// SPDX-License-Identifier: MIT

//! GraphQL endpoint.

use crate::origin::Origin;
use crate::AppState;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, HeaderMap},
};
use std::sync::Arc;

/// Execute a GraphQL request (GET or POST).
///
/// The request's `Origin` header decides which host a log-in redirect
/// should eventually return to, so it rides along as request data.
pub async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let origin = Origin::from_header(
        headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok()),
    );

    let request = req.into_inner().data(origin);
    state.schema.execute(request).await.into()
}
