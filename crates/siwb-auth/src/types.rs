//! SDK configuration and caller-facing authentication types.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use siwb_identity::DelegationIdentity;
use siwb_provider::SignatureScheme;

/// Default request timeout for provider and relying-party calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Advisory bearer-token lifetime reported to callers, in seconds. The
/// relying party does not report a TTL, so this mirrors its server-side
/// default.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3_600;

/// Configuration for an [`AuthSession`](crate::AuthSession).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the relying-party API; token exchange posts to
    /// `{base_url}/auth`.
    pub base_url: String,
    /// Base URL of the SIWB provider RPC endpoint.
    pub provider_url: String,
    /// Timeout applied to every network call.
    pub timeout: Duration,
    /// Emit a debug event for each protocol step.
    pub enable_logging: bool,
}

impl AuthConfig {
    /// Create a configuration with the default timeout and logging off.
    pub fn new(base_url: impl Into<String>, provider_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            provider_url: provider_url.into(),
            timeout: DEFAULT_TIMEOUT,
            enable_logging: false,
        }
    }
}

/// Result of the prepare phase: the challenge the wallet must sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareResult {
    /// Bitcoin address the challenge is bound to.
    pub address: String,
    /// Challenge message to be signed by the wallet, echoed back
    /// unchanged at login.
    pub message: String,
}

/// Parameters for completing the login phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginParams {
    /// Bitcoin address being authenticated.
    pub address: String,
    /// The exact challenge message returned by the prepare phase.
    pub message: String,
    /// Wallet signature over the challenge message.
    pub signature: String,
    /// Hex-encoded wallet public key.
    pub public_key: String,
    /// Signature scheme the wallet used.
    pub signature_type: SignatureScheme,
    /// Optional referral code captured at sign-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Bearer token for relying-party API calls.
    pub token: String,
    /// Text encoding of the authenticated principal.
    pub principal_id: String,
    /// Advisory token lifetime in seconds.
    pub expires_in: u64,
    /// Delegated identity for subsequent authenticated calls.
    pub identity: Arc<DelegationIdentity>,
}
