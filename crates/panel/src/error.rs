/// Errors surfaced by panel operations.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// The HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("Bookmark endpoint returned HTTP {status}")]
    Status {
        status: u16,
        /// The endpoint's `error` message, when it sent one.
        message: Option<String>,
    },

    /// The response body was not the expected JSON.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The bookmark carries no verse id, so an edit cannot be saved.
    #[error("Bookmark has no verse id")]
    MissingVerseId,

    /// No signed-in user.
    #[error("Not signed in")]
    NotSignedIn,
}

impl PanelError {
    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            PanelError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
