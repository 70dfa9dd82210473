//! bg-azure: Azure Blob Storage transport for blobget
//!
//! Implements the `ObjectStore` trait from bg-core over the Azure Blob
//! Storage SDK, and provides [`AzureBlobGetter`], the concrete getter
//! backend that composes address parsing, client construction and the
//! transfer orchestration from bg-core.

pub mod client;
pub mod getter;

pub use client::AzureBlobClient;
pub use getter::AzureBlobGetter;
