//! Storage errors. Never escalated: the deletion service turns them into
//! failed results.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cookie store rejected the request: {0}")]
    CookieStore(String),

    #[error("sandbox directory unavailable: {0}")]
    Unavailable(&'static str),

    #[error("resetting user defaults failed: {0}")]
    Defaults(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
