//! Error types shared by all blobget crates
//!
//! Every layer returns its error to the immediate caller; nothing here
//! retries, logs-and-continues, or aborts the process.

use thiserror::Error;

/// Result alias used throughout blobget
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by address parsing, listing and transfers
#[derive(Debug, Error)]
pub enum Error {
    /// The address does not decompose into the expected
    /// `<account>.<marker>.<domain>/<container>/<path>` shape.
    /// Raised before any remote call is attempted.
    #[error("invalid blob address: {0}")]
    InvalidAddress(String),

    /// Failure reported by the store transport: network, auth rejection,
    /// throttling, malformed response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store reports that the named object or container does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Local filesystem failure while creating directories or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the store reported the object or container as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::NotFound("container/key".into()).is_not_found());
        assert!(!Error::Transport("timeout".into()).is_not_found());
    }
}
