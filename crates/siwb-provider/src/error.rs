//! Error types for provider RPC operations.

/// Errors that can occur when calling the SIWB provider.
///
/// [`ProviderError::Rejected`] is the provider speaking (its explicit error
/// variant, e.g. a signature or address mismatch); everything else is the
/// transport or decoding layer failing. Callers that need to distinguish a
/// refused login from a flaky network match on the variant.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The supplied address is empty.
    #[error("address is empty")]
    EmptyAddress,

    /// The provider answered with its explicit error variant.
    #[error("provider rejected the call: {0}")]
    Rejected(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code.
        status_code: u16,
        /// Error message from server.
        message: String,
    },
}
