//! bg-core: Core library for the blobget Azure Blob getter
//!
//! This crate provides the storage-SDK-independent half of blobget:
//! - Blob address parsing (account, base domain, container, blob path,
//!   optional shared-key credential)
//! - The `ObjectStore` trait describing the transport capability the getter
//!   needs from a blob store client
//! - Classification of an address as a single object or an object tree
//! - Tree and single-object transfer orchestration
//!
//! Everything here is unit-testable against a mock store; the actual Azure
//! transport lives in the `bg-azure` crate.

pub mod address;
pub mod error;
pub mod getter;
pub mod store;

pub use address::{BlobAddress, Credential};
pub use error::{Error, Result};
pub use getter::{ClientMode, FetchSummary, Getter, classify_mode, fetch_one, fetch_tree};
pub use store::{ListEntry, ListPage, ObjectStore, PageStream};
