// SPDX-License-Identifier: MIT

//! Content-addressed file storage.
//!
//! Avatar images are small, so they live as Firestore documents keyed by
//! their content hash. Storing the same (bytes, mime) pair twice is a
//! no-op overwrite of an identical document.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::ident;
use crate::models::FileRecord;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Content-addressed file store.
#[derive(Clone)]
pub struct FileStore {
    db: FirestoreDb,
}

impl FileStore {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Store a file and return its content hash.
    pub async fn save(&self, bytes: &[u8], mime_type: &str) -> Result<String, AppError> {
        let hash = ident::file_hash(bytes, mime_type);
        let record = FileRecord {
            hash: hash.clone(),
            mime_type: mime_type.to_string(),
            bytes_base64: BASE64.encode(bytes),
        };
        self.db.set_file(&record).await?;
        tracing::debug!(hash = %hash, mime = mime_type, size = bytes.len(), "File stored");
        Ok(hash)
    }

    /// Load a file by content hash, returning its mime type and bytes.
    pub async fn open(&self, hash: &str) -> Result<Option<(String, Vec<u8>)>, AppError> {
        let Some(record) = self.db.get_file(hash).await? else {
            return Ok(None);
        };
        let bytes = BASE64
            .decode(&record.bytes_base64)
            .map_err(|e| AppError::Database(format!("Corrupt file document {}: {}", hash, e)))?;
        Ok(Some((record.mime_type, bytes)))
    }
}
