pub type Result<T> = std::result::Result<T, Error>;

/// Fallback shown when the remote side gives us nothing usable.
pub const GENERIC_REMOTE_FAILURE: &str = "Server error. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Whitespace-only input. Resolved locally, never reaches the network.
    #[error("Please enter a search value.")]
    EmptyQuery,

    /// Missing or rejected credential. Surfaces as a redirect-to-login
    /// action, not as an error message in session state.
    #[error("Not authenticated")]
    Unauthorized,

    /// Non-2xx response or a transport failure. Carries the user-facing
    /// message (server-provided where available).
    #[error("Remote failure: {0}")]
    RemoteFailure(String),

    /// Response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Message stored in session state when this error settles a search.
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyQuery => "Please enter a search value.".to_string(),
            Error::RemoteFailure(msg) => msg.clone(),
            Error::MalformedResponse(_) => GENERIC_REMOTE_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(_err: reqwest::Error) -> Self {
        Error::RemoteFailure(GENERIC_REMOTE_FAILURE.to_string())
    }
}
