use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("timed out after {waited:?} waiting for the lock on {}", .path.display())]
    LockTimeout { path: PathBuf, waited: Duration },

    #[error("key \"{key}\" was not found in bucket \"{bucket}\"")]
    NotFound { key: String, bucket: String },

    #[error("encoding JSON failed: {0}")]
    Encode(String),

    #[error("decoding JSON failed: {0}")]
    Decode(String),
}

impl KVError {
    /// Wrap any engine-level failure as `KVError::Storage`.
    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        KVError::Storage(err.to_string())
    }
}
