//! Error types for key material and delegation operations.

/// Errors that can occur when building or using a delegated identity.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The delegation structure violates the expected shape.
    #[error("malformed delegation: {0}")]
    MalformedDelegation(String),

    /// The delegation chain does not terminate at the session public key.
    #[error("delegation chain does not terminate at the session key")]
    SessionKeyMismatch,

    /// A link in the delegation chain has expired.
    #[error("delegation chain expired")]
    DelegationExpired,
}
