use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The provider answered with a non-success status.
    #[error("completion request rejected ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("completion request failed: {0}")]
    Transport(String),

    /// The provider answered 2xx but not in the expected shape.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(value: reqwest::Error) -> Self {
        CompletionError::Transport(value.to_string())
    }
}
