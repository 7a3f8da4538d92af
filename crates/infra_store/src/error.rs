//! Storage error types
//!
//! Adapter-level failures, translated to [`PortError`] at the port boundary.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use core_kernel::PortError;

/// Errors raised while reading or writing lease files
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage root could not be prepared
    #[error("Cannot use storage directory {}: {source}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing a record file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record file is not valid JSON for its type
    #[error("Malformed record {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A finalized lease already exists under this id
    #[error("Lease {0} is already finalized")]
    AlreadyFinalized(String),
}

impl StoreError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn malformed(path: &Path, source: serde_json::Error) -> Self {
        StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Checks if this error means the file does not exist
    pub fn is_missing_file(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl From<StoreError> for PortError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyFinalized(_) => PortError::conflict(err.to_string()),
            StoreError::Malformed { .. } => PortError::serialization(err.to_string()),
            StoreError::RootUnavailable { .. } | StoreError::Io { .. } => {
                let message = err.to_string();
                PortError::storage(message, err)
            }
        }
    }
}
