// SPDX-License-Identifier: MIT

//! External service clients.

pub mod file_store;
pub mod line;

pub use file_store::FileStore;
pub use line::LineClient;
