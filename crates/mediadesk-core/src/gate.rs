//! Authorization gate - allow-list check in front of every mutating
//! operation.
//!
//! Stateless and evaluated fresh per request: no session, no cache. The
//! allow-list is injected at construction so tests can substitute it.

use std::sync::Arc;

use crate::error::AuthError;
use crate::ports::IdentityVerifier;

/// Resolves a bearer credential to a verified identity and checks it
/// against the configured allow-list. Fails closed.
pub struct AuthorizationGate {
    verifier: Arc<dyn IdentityVerifier>,
    allowed_emails: Vec<String>,
}

impl AuthorizationGate {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, allowed_emails: Vec<String>) -> Self {
        Self {
            verifier,
            allowed_emails,
        }
    }

    /// Authorize from a raw `Authorization` header value. Returns the
    /// verified email on success.
    pub fn authorize_header(&self, header: Option<&str>) -> Result<String, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;
        self.authorize_token(token)
    }

    /// Authorize a bare bearer token.
    pub fn authorize_token(&self, token: &str) -> Result<String, AuthError> {
        let email = self.verifier.verify(token)?;

        if !self.allowed_emails.iter().any(|allowed| allowed == &email) {
            tracing::warn!(email = %email, "rejected identity not in allow-list");
            return Err(AuthError::NotAllowed);
        }

        Ok(email)
    }
}
