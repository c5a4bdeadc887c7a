use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unsupported key type: {0} (expected a string or an object)")]
    UnsupportedKeyType(String),

    #[error("unknown read strategy: {0}")]
    UnknownReadStrategy(String),

    #[error("unknown write strategy: {0}")]
    UnknownWriteStrategy(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid digest length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unable to read config file {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("invalid config: {0}")]
    ConfigParse(String),
}
