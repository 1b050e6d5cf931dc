// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Single point of access to the persisted entities:
//! - Log-in states (single-use, fetch-then-delete)
//! - Users (lookups by ID, LINE user ID, or access-token hash)
//! - Teams and cycles
//! - Content-addressed files
//!
//! Multi-document operations (team join, role assignment, cycle-list
//! append) are intentionally plain sequential writes with no transaction;
//! the underlying reads are idempotent and the original system never
//! guaranteed atomicity here.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{CycleRecord, FileRecord, LoginState, TeamRecord, UserRecord};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Log-In State Operations ─────────────────────────────────

    /// Persist a freshly issued log-in state, keyed by its token.
    pub async fn create_login_state(&self, state: &LoginState) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::LOGIN_STATES)
            .document_id(&state.token)
            .object(state)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Redeem a log-in state: fetch it and delete it.
    ///
    /// Read-then-delete rather than a true atomic take; the state token is
    /// unguessable, so a racing duplicate redemption is not a realistic
    /// threat and was never handled by the original system either.
    pub async fn take_login_state(&self, token: &str) -> Result<Option<LoginState>, AppError> {
        let state: Option<LoginState> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::LOGIN_STATES)
            .obj()
            .one(token)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if state.is_some() {
            self.get_client()?
                .fluent()
                .delete()
                .from(collections::LOGIN_STATES)
                .document_id(token)
                .execute()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        Ok(state)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &UserRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Find the user linked to a LINE account, if any.
    ///
    /// `line_user_id` is expected to match 0 or 1 documents; the first
    /// match is used.
    pub async fn find_user_by_line_id(
        &self,
        line_user_id: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        let line_user_id = line_user_id.to_string();
        let users: Vec<UserRecord> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("line_user_id").eq(line_user_id.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(users.into_iter().next())
    }

    /// Find the user whose current access token has the given hash.
    pub async fn find_user_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        let token_hash = token_hash.to_string();
        let users: Vec<UserRecord> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("access_token_hash").eq(token_hash.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(users.into_iter().next())
    }

    // ─── Team Operations ─────────────────────────────────────────

    /// Get a team by ID.
    pub async fn get_team(&self, team_id: &str) -> Result<Option<TeamRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TEAMS)
            .obj()
            .one(team_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a team.
    pub async fn upsert_team(&self, team: &TeamRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TEAMS)
            .document_id(&team.id)
            .object(team)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List every team.
    pub async fn get_all_teams(&self) -> Result<Vec<TeamRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TEAMS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Cycle Operations ────────────────────────────────────────

    /// Get a cycle by ID.
    pub async fn get_cycle(&self, cycle_id: &str) -> Result<Option<CycleRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CYCLES)
            .obj()
            .one(cycle_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a cycle.
    pub async fn upsert_cycle(&self, cycle: &CycleRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::CYCLES)
            .document_id(&cycle.id)
            .object(cycle)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── File Operations ─────────────────────────────────────────

    /// Get a stored file by content hash.
    pub async fn get_file(&self, hash: &str) -> Result<Option<FileRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FILES)
            .obj()
            .one(hash)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a file under its content hash. Idempotent: the same
    /// (bytes, mime) pair always lands on the same document.
    pub async fn set_file(&self, file: &FileRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::FILES)
            .document_id(&file.hash)
            .object(file)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
