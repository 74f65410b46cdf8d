//! Provider data types: configuration, signature schemes, and RPC envelopes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a [`ProviderClient`](crate::ProviderClient).
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the SIWB provider RPC endpoint.
    pub provider_url: String,
    /// Timeout applied to each RPC call.
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_url: "https://ic0.app".to_string(),
            timeout: Duration::from_millis(30_000),
        }
    }
}

/// Wallet signature schemes accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureScheme {
    /// BIP-322 simple signature over the challenge message.
    Bip322Simple,
    /// Legacy ECDSA message signature.
    Ecdsa,
}

impl std::fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureScheme::Bip322Simple => write!(f, "Bip322Simple"),
            SignatureScheme::Ecdsa => write!(f, "Ecdsa"),
        }
    }
}

/// Arguments to [`ProviderClient::login`](crate::ProviderClient::login).
#[derive(Debug, Clone)]
pub struct LoginArgs<'a> {
    /// Wallet signature over the challenge message, encoded per scheme
    /// (base64 for BIP-322, hex for ECDSA).
    pub signature: &'a str,
    /// Bitcoin address being authenticated.
    pub address: &'a str,
    /// Hex-encoded wallet public key.
    pub public_key: &'a str,
    /// DER-encoded session public key the delegation should target.
    pub session_public_key: &'a [u8],
    /// Signature scheme the wallet used.
    pub scheme: SignatureScheme,
}

/// Successful provider login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Absolute delegation expiration, nanoseconds since the Unix epoch.
    /// Must be echoed verbatim into the get-delegation call.
    pub expiration: u64,
    /// DER-encoded public key of the user's root identity.
    #[serde(with = "siwb_identity::codec")]
    pub user_canister_pubkey: Vec<u8>,
}

/// Result envelope wrapping every provider RPC response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProviderResult<T> {
    /// The call succeeded.
    Ok(T),
    /// The provider refused the call with a reason.
    Err(String),
}
