//! Authentication session state machine.
//!
//! An [`AuthSession`] is either unauthenticated (initial) or holds one
//! [`AuthResult`]. `prepare` never touches state; `login` either completes
//! all eight steps and installs its result atomically, or fails and leaves
//! the prior state untouched. `sign_out` is idempotent.
//!
//! Concurrent `login` calls on the same session are not coordinated here:
//! the last writer wins, and serializing attempts is the caller's job.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;

use siwb_identity::{DelegationChain, DelegationIdentity, ExchangeIdentity, SessionKeyPair};
use siwb_provider::{LoginArgs, ProviderClient, ProviderConfig};

use crate::error::AuthError;
use crate::exchange::TokenExchangeClient;
use crate::types::{AuthConfig, AuthResult, LoginParams, PrepareResult, DEFAULT_TOKEN_TTL_SECS};

/// Installed authentication state plus local bookkeeping for the
/// advisory expiry check.
struct ActiveAuth {
    result: AuthResult,
    issued_at: Instant,
}

impl ActiveAuth {
    /// Advisory only: the server remains authoritative on expiry.
    fn is_current(&self) -> bool {
        self.issued_at.elapsed() < Duration::from_secs(self.result.expires_in)
    }
}

/// Two-phase Sign-In-With-Bitcoin authentication session.
///
/// Owns the provider client, the token exchange client, and the current
/// authentication state. One value per signed-in user; embedding
/// applications decide whether to share it.
pub struct AuthSession {
    config: AuthConfig,
    provider: ProviderClient,
    exchange: TokenExchangeClient,
    state: RwLock<Option<ActiveAuth>>,
}

impl AuthSession {
    /// Create an unauthenticated session from the given configuration.
    pub fn new(config: AuthConfig) -> Self {
        let provider = ProviderClient::new(ProviderConfig {
            provider_url: config.provider_url.clone(),
            timeout: config.timeout,
        });
        let exchange = TokenExchangeClient::new(config.base_url.clone(), config.timeout);
        Self {
            config,
            provider,
            exchange,
            state: RwLock::new(None),
        }
    }

    /// Phase 1: fetch the challenge message the wallet must sign.
    ///
    /// Available in either state and never mutates session state.
    pub async fn prepare(&self, address: &str) -> Result<PrepareResult, AuthError> {
        if self.config.enable_logging {
            debug!(address, "preparing authentication");
        }

        let message = self
            .provider
            .prepare_login(address)
            .await
            .map_err(AuthError::Prepare)?;

        Ok(PrepareResult {
            address: address.to_string(),
            message,
        })
    }

    /// Phase 2: complete authentication with the wallet-signed challenge.
    ///
    /// Runs strictly in order: generate a session key, submit the wallet
    /// signature, fetch the delegation for the exact expiration the
    /// provider issued, build the chain and identity, exchange for a
    /// bearer token, then install the result. Any failure aborts the whole
    /// attempt and leaves prior state untouched; a retry is a new attempt
    /// with a new session key, never a resumption. A successful login
    /// while already authenticated replaces the prior result wholesale.
    pub async fn login(&self, params: LoginParams) -> Result<AuthResult, AuthError> {
        if self.config.enable_logging {
            debug!(address = %params.address, "completing authentication");
        }

        // One fresh, unlinkable session key per attempt.
        let session_key = SessionKeyPair::generate();
        let session_public_key = session_key.public_key_der();

        let outcome = self
            .provider
            .login(&LoginArgs {
                signature: &params.signature,
                address: &params.address,
                public_key: &params.public_key,
                session_public_key: &session_public_key,
                scheme: params.signature_type,
            })
            .await
            .map_err(AuthError::ProviderLogin)?;

        if self.config.enable_logging {
            debug!(expiration = outcome.expiration, "provider login accepted");
        }

        let signed = self
            .provider
            .get_delegation(&params.address, &session_public_key, outcome.expiration)
            .await
            .map_err(AuthError::GetDelegation)?;

        let chain = DelegationChain::from_signed_delegation(signed, outcome.user_canister_pubkey)
            .map_err(AuthError::Delegation)?;
        let identity =
            DelegationIdentity::new(session_key, chain).map_err(AuthError::Delegation)?;

        let token = self
            .exchange
            .exchange(&ExchangeIdentity::Delegated(&identity))
            .await
            .map_err(AuthError::TokenExchange)?;

        let principal_id = identity.principal().to_text();

        if self.config.enable_logging {
            debug!(%principal_id, "authentication complete");
        }

        let result = AuthResult {
            token,
            principal_id,
            expires_in: DEFAULT_TOKEN_TTL_SECS,
            identity: Arc::new(identity),
        };

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = Some(ActiveAuth {
            result: result.clone(),
            issued_at: Instant::now(),
        });

        Ok(result)
    }

    /// True while a login result is installed and its advisory expiry
    /// window has not elapsed.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.as_ref().is_some_and(ActiveAuth::is_current)
    }

    /// The authenticated principal, while [`is_authenticated`](Self::is_authenticated).
    pub fn current_user(&self) -> Option<String> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .as_ref()
            .filter(|active| active.is_current())
            .map(|active| active.result.principal_id.clone())
    }

    /// The delegated identity installed by the last login, for subsequent
    /// authenticated calls.
    pub fn identity(&self) -> Option<Arc<DelegationIdentity>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.as_ref().map(|active| Arc::clone(&active.result.identity))
    }

    /// The full result of the last login, if any.
    pub fn current_auth(&self) -> Option<AuthResult> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.as_ref().map(|active| active.result.clone())
    }

    /// Clear the session state. Idempotent; the session key material is
    /// zeroized once the last identity handle is dropped.
    pub fn sign_out(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = None;

        if self.config.enable_logging {
            debug!("signed out");
        }
    }
}
