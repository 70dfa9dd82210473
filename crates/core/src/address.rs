//! Blob address parsing
//!
//! An address looks like
//! `https://myaccount.blob.core.windows.net/mycontainer/path/to/obj?access_key=KEY`.
//! The host carries the storage account and base domain, the path carries the
//! container and blob path, and the optional `access_key` query parameter
//! carries a shared-key secret. Parsing is pure: no network access.

use url::Url;

use crate::error::{Error, Result};

/// Query parameter that carries the shared-key secret, if any
pub const ACCESS_KEY_PARAM: &str = "access_key";

/// Credential resolved from an address
///
/// Selecting between an explicit shared key and anonymous access is a
/// capability branch decided once at parse time, not a client hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// No secret in the address; access the store anonymously.
    Anonymous,
    /// Shared-key secret taken from the `access_key` query parameter.
    AccessKey(String),
}

/// A parsed blob store address
///
/// Immutable once constructed. `blob_path` never carries a leading slash and
/// `container` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobAddress {
    account: String,
    base_domain: String,
    container: String,
    blob_path: String,
    credential: Credential,
}

impl BlobAddress {
    /// Parse an address string into its components
    pub fn parse(address: &str) -> Result<Self> {
        let url = Url::parse(address)
            .map_err(|e| Error::InvalidAddress(format!("{address}: {e}")))?;
        Self::from_url(&url)
    }

    /// Parse an already-constructed URL into its components
    pub fn from_url(url: &Url) -> Result<Self> {
        // Expected host shape: account.blob.core.windows.net. The middle
        // segment is the service marker; the trailing segments differ across
        // clouds, so only the three-way split is validated.
        let host = url
            .host_str()
            .ok_or_else(|| Error::InvalidAddress(format!("{url}: missing host")))?;

        let host_parts: Vec<&str> = host.splitn(3, '.').collect();
        let [account, _marker, base_domain] = host_parts.as_slice() else {
            return Err(Error::InvalidAddress(format!(
                "{url}: host must have the form <account>.<service>.<domain>"
            )));
        };

        let path_parts: Vec<&str> = url
            .path()
            .trim_start_matches('/')
            .splitn(2, '/')
            .collect();
        let [container, blob_path] = path_parts.as_slice() else {
            return Err(Error::InvalidAddress(format!(
                "{url}: path must have the form /<container>/<blob path>"
            )));
        };
        if container.is_empty() || blob_path.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "{url}: container and blob path must be non-empty"
            )));
        }

        // An absent or empty access_key means anonymous access, not an error.
        let credential = url
            .query_pairs()
            .find(|(k, _)| k == ACCESS_KEY_PARAM)
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
            .map_or(Credential::Anonymous, Credential::AccessKey);

        Ok(Self {
            account: (*account).to_owned(),
            base_domain: (*base_domain).to_owned(),
            container: (*container).to_owned(),
            blob_path: (*blob_path).to_owned(),
            credential,
        })
    }

    /// Storage account name (first host segment)
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Base domain after the service marker (e.g. `core.windows.net`)
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Container name (first path segment)
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Blob path within the container, without a leading slash
    pub fn blob_path(&self) -> &str {
        &self.blob_path
    }

    /// Credential resolved from the address
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}
