use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("value cannot have length > {max} (got {actual})")]
    ValueTooLong { max: usize, actual: usize },

    #[error("key cannot have length > {max} (got {actual})")]
    KeyTooLong { max: usize, actual: usize },

    #[error("invalid input: {0}")]
    Type(#[from] pairio_types::TypeError),

    #[error("local store error: {0}")]
    Store(#[from] pairio_store::StoreError),

    #[error("remote error: {0}")]
    Remote(#[from] pairio_remote::RemoteError),
}

impl SdkError {
    /// Raised before any backend was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValueTooLong { .. } | Self::KeyTooLong { .. } | Self::Type(_)
        )
    }

    /// Remote settings were required but could not be resolved.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_config_error())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
