use async_trait::async_trait;
use tracing::info;

use crate::traits::SessionGate;

/// Session backed by a pre-issued bearer token, if any.
#[derive(Debug, Clone, Default)]
pub struct TokenSession {
    token: Option<String>,
}

impl TokenSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[async_trait]
impl SessionGate for TokenSession {
    fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    async fn sign_in(&self) {
        info!(
            "Sign-in required: ask an administrator for a session token \
             and set RAFIKI_CLIENT_API__SESSION_TOKEN"
        );
    }
}
