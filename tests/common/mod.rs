// SPDX-License-Identifier: MIT

use teame_api::config::Config;
use teame_api::db::FirestoreDb;
use teame_api::graphql::{self, TeameSchema};
use teame_api::services::LineClient;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Build a schema over the given database with test LINE credentials.
#[allow(dead_code)]
pub fn test_schema(db: FirestoreDb) -> TeameSchema {
    graphql::build_schema(db, LineClient::new(&Config::default()))
}
