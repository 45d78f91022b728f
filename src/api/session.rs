//! Authenticated user session.

/// Credentials of the signed-in user, passed explicitly to API calls
#[derive(Clone)]
pub struct Session {
    token: String,

    /// Account the token belongs to, if known
    pub username: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Value of the Authorization header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Never print the token
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}
