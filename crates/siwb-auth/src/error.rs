//! Error taxonomy: token-exchange failures and the phase-carrying
//! authentication error surfaced to callers.

use siwb_identity::IdentityError;
use siwb_provider::ProviderError;

/// Errors from the bearer-token exchange with the relying party.
#[derive(Debug, thiserror::Error)]
pub enum TokenExchangeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relying party returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code.
        status_code: u16,
        /// Error message from server.
        message: String,
    },

    /// Relying party answered with something other than JSON.
    #[error("expected JSON response, got {content_type}")]
    UnexpectedContentType {
        /// The `Content-Type` header received, if any.
        content_type: String,
    },

    /// Relying party returned a 2xx response whose body carries an error.
    #[error("auth endpoint rejected the exchange: {0}")]
    Rejected(String),

    /// No recognized token field was present in the response.
    #[error("no token field in response, available keys: [{available}]")]
    MissingToken {
        /// Comma-separated keys the response did contain.
        available: String,
    },

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Signing with the session identity failed.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),
}

/// The phase of the authentication flow an [`AuthError`] originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Fetching the challenge message.
    Prepare,
    /// Submitting the wallet signature to the provider.
    ProviderLogin,
    /// Fetching the signed delegation.
    GetDelegation,
    /// Building the delegation chain or identity.
    Delegation,
    /// Exchanging the identity for a bearer token.
    TokenExchange,
}

impl std::fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthPhase::Prepare => write!(f, "prepare"),
            AuthPhase::ProviderLogin => write!(f, "provider-login"),
            AuthPhase::GetDelegation => write!(f, "get-delegation"),
            AuthPhase::Delegation => write!(f, "delegation"),
            AuthPhase::TokenExchange => write!(f, "token-exchange"),
        }
    }
}

/// Umbrella error for [`AuthSession`](crate::AuthSession) operations.
///
/// Each variant pins down the phase that failed and preserves the
/// originating cause for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The prepare call to the provider failed.
    #[error("prepare failed: {0}")]
    Prepare(#[source] ProviderError),

    /// The provider rejected or failed the login call.
    #[error("provider login failed: {0}")]
    ProviderLogin(#[source] ProviderError),

    /// The provider could not return the delegation.
    #[error("get delegation failed: {0}")]
    GetDelegation(#[source] ProviderError),

    /// The delegation chain or identity could not be constructed.
    #[error("delegation invalid: {0}")]
    Delegation(#[source] IdentityError),

    /// The bearer-token exchange failed.
    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] TokenExchangeError),
}

impl AuthError {
    /// The phase of the flow this error originated in.
    pub fn phase(&self) -> AuthPhase {
        match self {
            AuthError::Prepare(_) => AuthPhase::Prepare,
            AuthError::ProviderLogin(_) => AuthPhase::ProviderLogin,
            AuthError::GetDelegation(_) => AuthPhase::GetDelegation,
            AuthError::Delegation(_) => AuthPhase::Delegation,
            AuthError::TokenExchange(_) => AuthPhase::TokenExchange,
        }
    }
}
