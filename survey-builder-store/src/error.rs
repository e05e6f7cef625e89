use std::path::PathBuf;

/// Error type for snapshot persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A survey could not be encoded as JSON.
    #[error("Failed to encode survey: {0}")]
    Encode(#[from] serde_json::Error),

    /// The empty key has no file name.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
