// SPDX-License-Identifier: MIT

//! TEAMe API: backend for the TEAMe digital practice notebook.
//!
//! This crate provides social login through LINE, user/team/PDCA-cycle
//! storage in Firestore, content-addressed avatar files, and a GraphQL
//! API served over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod ident;
pub mod models;
pub mod origin;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use graphql::TeameSchema;
use services::{FileStore, LineClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub line: LineClient,
    pub files: FileStore,
    pub schema: TeameSchema,
}
