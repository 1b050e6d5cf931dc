// SPDX-License-Identifier: MIT

//! Persisted document models.

pub mod cycle;
pub mod file;
pub mod login_state;
pub mod team;
pub mod user;

pub use cycle::CycleRecord;
pub use file::FileRecord;
pub use login_state::LoginState;
pub use team::TeamRecord;
pub use user::{Role, UserRecord};
