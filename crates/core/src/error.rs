use thiserror::Error;

/// Boxed cause carried by traversal failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Decode error in `{input}`: {reason}")]
    Decode { input: String, reason: String },
    #[error("Cannot resolve root `{address}`: {reason}")]
    RootResolution { address: String, reason: String },
    #[error("Traversal of `{root}` failed: {source}")]
    Traversal {
        root: String,
        #[source]
        source: BoxError,
    },
}

impl ScanError {
    pub(crate) fn root(address: impl Into<String>, reason: impl ToString) -> Self {
        ScanError::RootResolution {
            address: address.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn traversal(root: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ScanError::Traversal {
            root: root.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
