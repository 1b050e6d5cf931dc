// SPDX-License-Identifier: MIT

//! Lazily fetched entity records.
//!
//! A GraphQL node starts as a reference (just an ID) and pulls its full
//! backing document on the first access to a field that is not already
//! known. [`Lazy`] memoizes that fetch for the node's lifetime, so any
//! number of field resolutions costs at most one document read, and
//! concurrent sibling resolvers share a single in-flight fetch.

use std::future::Future;
use tokio::sync::OnceCell;

/// A memoized, single-flight fetch of a value.
pub struct Lazy<T> {
    cell: OnceCell<T>,
}

impl<T> Lazy<T> {
    /// A cell with nothing fetched yet.
    pub fn empty() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// A cell pre-filled with an already-fetched value; `get_or_fetch`
    /// will never run its fetch closure.
    pub fn filled(value: T) -> Self {
        Self {
            cell: OnceCell::new_with(Some(value)),
        }
    }

    /// Return the value, fetching it on first access.
    ///
    /// Concurrent callers are serialized: exactly one fetch runs and the
    /// rest wait for its result. A failed fetch is not cached, so a later
    /// access tries again.
    pub async fn get_or_fetch<E, F, Fut>(&self, fetch: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell.get_or_try_init(fetch).await
    }
}
