//! Session context passed explicitly into the verification flow.

use std::fmt;

/// Identity of the partially authenticated user
///
/// Issued by the first login step and required by both verification
/// endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// User being verified
    pub user_id: String,

    /// Short-lived token from the password step
    pub session_token: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_token: session_token.into(),
        }
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user_id)
            .field("session_token", &"[redacted]")
            .finish()
    }
}
