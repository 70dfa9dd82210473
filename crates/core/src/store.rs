//! Store transport capability
//!
//! The getter talks to the blob store through the narrow [`ObjectStore`]
//! trait: a paginated prefix listing and a full-body object download. The
//! trait is implemented over the Azure SDK in `bg-azure` and mocked in the
//! orchestrator tests here.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;

/// One named object returned by a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Full object key within the container
    pub key: String,
}

impl ListEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Stores represent empty "directories" as zero-byte marker objects
    /// whose key ends in a slash; those are never downloaded.
    pub fn is_directory_marker(&self) -> bool {
        self.key.ends_with('/')
    }
}

/// One page of a prefix listing, produced by a single store call
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Entries in store listing order (lexical by key)
    pub entries: Vec<ListEntry>,
}

/// Lazy sequence of listing pages
///
/// Forward-only and non-restartable: each polled page issues one store call,
/// and the continuation marker from the previous page is threaded into the
/// next call by the producer. Consumers must drive the stream sequentially
/// and stop at the first `Err`.
pub type PageStream = BoxStream<'static, Result<ListPage>>;

/// Transport capability the getter requires from a blob store client
///
/// Retry, TLS and the auth handshake are the implementation's concern; this
/// layer never retries and surfaces every transport failure to its caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Begin a flat listing of all object keys under `prefix`
    fn list_by_prefix(&self, container: &str, prefix: &str) -> PageStream;

    /// Download the full body of a single object
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>>;
}
