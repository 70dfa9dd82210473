//! Getter entry points for Azure Blob addresses
//!
//! Every operation follows the same flow: parse the address, build a store
//! client scoped to the resolved account and credential, then delegate to
//! the orchestration in bg-core.

use std::path::Path;

use async_trait::async_trait;

use bg_core::{BlobAddress, ClientMode, FetchSummary, Getter, Result};

use crate::client::AzureBlobClient;

/// The Azure Blob Storage getter backend
#[derive(Debug, Default, Clone, Copy)]
pub struct AzureBlobGetter;

impl AzureBlobGetter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Getter for AzureBlobGetter {
    async fn classify_mode(&self, address: &str) -> Result<ClientMode> {
        let addr = BlobAddress::parse(address)?;
        let client = AzureBlobClient::new(&addr)?;
        bg_core::classify_mode(&client, addr.container(), addr.blob_path()).await
    }

    async fn get_tree(&self, dest: &Path, address: &str) -> Result<FetchSummary> {
        let addr = BlobAddress::parse(address)?;
        let client = AzureBlobClient::new(&addr)?;
        bg_core::fetch_tree(&client, addr.container(), addr.blob_path(), dest).await
    }

    async fn get_file(&self, dest: &Path, address: &str) -> Result<u64> {
        let addr = BlobAddress::parse(address)?;
        let client = AzureBlobClient::new(&addr)?;
        bg_core::fetch_one(&client, addr.container(), addr.blob_path(), dest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bg_core::Error;

    #[test]
    fn test_malformed_address_fails_before_any_remote_call() {
        let getter = AzureBlobGetter::new();
        let err = futures::executor::block_on(
            getter.classify_mode("https://acct.blob.example.com/onlycontainer"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[test]
    fn test_get_file_rejects_short_host() {
        let getter = AzureBlobGetter::new();
        let err = futures::executor::block_on(
            getter.get_file(Path::new("/tmp/out"), "https://example.com/container/obj"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }
}
