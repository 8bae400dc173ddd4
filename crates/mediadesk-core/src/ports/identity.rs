use crate::error::AuthError;

/// External identity verifier: resolves a bearer credential to a verified
/// email address, or fails with invalid/expired token.
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<String, AuthError>;
}
