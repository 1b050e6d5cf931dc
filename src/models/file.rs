//! Stored file model.

use serde::{Deserialize, Serialize};

/// A stored binary, keyed by its content hash.
///
/// Content addressing makes writes idempotent: storing the same
/// (bytes, mime) pair twice lands on the same document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Content hash (also the document ID)
    pub hash: String,
    /// Mime type served back with the bytes
    pub mime_type: String,
    /// File bytes, base64-encoded for storage
    pub bytes_base64: String,
}
