// SPDX-License-Identifier: MIT

//! GraphQL schema.
//!
//! Built once at startup with the shared database and LINE client
//! injected as schema data; the per-request [`crate::origin::Origin`] is
//! attached by the HTTP handler.

pub mod lazy;
pub mod mutation;
pub mod query;
pub mod scalars;
pub mod types;

use crate::db::FirestoreDb;
use crate::services::LineClient;
use async_graphql::{EmptySubscription, Schema};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// The full GraphQL schema type for TEAMe.
pub type TeameSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the shared service handles.
pub fn build_schema(db: FirestoreDb, line: LineClient) -> TeameSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .data(line)
        .finish()
}
