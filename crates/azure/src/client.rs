//! Azure Blob Storage client
//!
//! Wraps azure_storage_blobs and implements the ObjectStore trait from
//! bg-core. Request signing, TLS and transient-failure retries are the SDK
//! pipeline's responsibility; this layer only translates calls and errors.

use async_trait::async_trait;
use azure_storage::{CloudLocation, StorageCredentials};
use azure_storage_blobs::prelude::*;
use futures::StreamExt;

use bg_core::{
    BlobAddress, Credential, Error, ListEntry, ListPage, ObjectStore, PageStream, Result,
};

/// Azure Blob service client scoped to one account and credential
pub struct AzureBlobClient {
    service: BlobServiceClient,
}

impl AzureBlobClient {
    /// Build a client for the account, base domain and credential of a
    /// parsed address.
    ///
    /// The base domain is carried into a custom endpoint
    /// (`https://<account>.blob.<domain>`), so non-default clouds resolve
    /// the same way the default one does. Construction itself performs no
    /// I/O; a bad credential surfaces as a transport error on first use,
    /// never as a process abort.
    pub fn new(address: &BlobAddress) -> Result<Self> {
        let credentials = match address.credential() {
            Credential::AccessKey(key) => {
                StorageCredentials::access_key(address.account().to_owned(), key.clone())
            }
            Credential::Anonymous => StorageCredentials::anonymous(),
        };

        let location = CloudLocation::Custom {
            account: address.account().to_owned(),
            uri: format!("https://{}.blob.{}", address.account(), address.base_domain()),
        };

        tracing::debug!(
            account = address.account(),
            anonymous = matches!(address.credential(), Credential::Anonymous),
            "building blob service client"
        );

        let service = ClientBuilder::with_location(location, credentials).blob_service_client();
        Ok(Self { service })
    }
}

#[async_trait]
impl ObjectStore for AzureBlobClient {
    fn list_by_prefix(&self, container: &str, prefix: &str) -> PageStream {
        let container_client = self.service.container_client(container);

        container_client
            .list_blobs()
            .prefix(prefix.to_owned())
            .into_stream()
            .map(|page| {
                let page = page.map_err(|e| map_azure_error("list blobs", e))?;
                let entries = page
                    .blobs
                    .blobs()
                    .map(|blob| ListEntry::new(blob.name.clone()))
                    .collect();
                Ok(ListPage { entries })
            })
            .boxed()
    }

    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>> {
        let blob_client = self.service.container_client(container).blob_client(key);

        blob_client
            .get_content()
            .await
            .map_err(|e| map_azure_error(&format!("{container}/{key}"), e))
    }
}

/// Fold an SDK error into the blobget error taxonomy
///
/// An HTTP 404 means the object or container is absent; everything else is
/// an opaque transport failure.
fn map_azure_error(context: &str, error: azure_core::Error) -> Error {
    match error.kind() {
        azure_core::error::ErrorKind::HttpResponse { status, .. }
            if *status == azure_core::StatusCode::NotFound =>
        {
            Error::NotFound(context.to_owned())
        }
        _ => Error::Transport(format!("{context}: {error}")),
    }
}
