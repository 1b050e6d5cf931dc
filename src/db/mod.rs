//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Single-use social log-in states (keyed by state token)
    pub const LOGIN_STATES: &str = "login_states";
    pub const USERS: &str = "users";
    pub const TEAMS: &str = "teams";
    pub const CYCLES: &str = "cycles";
    /// Content-addressed files (keyed by hash)
    pub const FILES: &str = "files";
}
