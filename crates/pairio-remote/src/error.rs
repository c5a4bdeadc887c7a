use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// A required setting is absent from both the configuration and the
    /// environment.
    #[error("missing remote {field}: configure it or set the {env_var} environment variable")]
    MissingConfig {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("request rejected by server: {0}")]
    Rejected(String),

    #[error("unable to build HTTP client: {0}")]
    Client(String),
}

impl RemoteError {
    /// Configuration errors are raised to callers; everything else is
    /// reported as a miss or a failed write.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::MissingConfig { .. })
    }

    /// Only transport failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
