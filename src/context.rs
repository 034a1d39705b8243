use crate::error::{Error, Result};

/// Credential attached to every remote call. Acquired at login, cleared at
/// logout; passed explicitly rather than looked up from ambient storage.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    token: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer credential, or `Unauthorized` so callers short-circuit
    /// before issuing any network call.
    pub fn bearer_token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(Error::Unauthorized)
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}
