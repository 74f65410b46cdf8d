//! Delegated identity: a session keypair bound to a verified delegation chain.

use std::time::{SystemTime, UNIX_EPOCH};

use candid::Principal;

use crate::delegation::DelegationChain;
use crate::error::IdentityError;
use crate::session::SessionKeyPair;

/// The runtime credential combining a session keypair with the delegation
/// chain that authorizes it to act for a principal.
///
/// Owned exclusively by one authentication session; signing re-checks the
/// chain's validity window at each call.
#[derive(Debug)]
pub struct DelegationIdentity {
    session_key: SessionKeyPair,
    chain: DelegationChain,
}

impl DelegationIdentity {
    /// Bind a session keypair to its delegation chain.
    ///
    /// Fails unless the chain terminates at this session's public key.
    pub fn new(
        session_key: SessionKeyPair,
        chain: DelegationChain,
    ) -> Result<Self, IdentityError> {
        if chain.session_public_key() != session_key.public_key_der().as_slice() {
            return Err(IdentityError::SessionKeyMismatch);
        }
        Ok(DelegationIdentity { session_key, chain })
    }

    /// Sign a message on behalf of the delegated principal.
    ///
    /// Fails with [`IdentityError::DelegationExpired`] once any link of the
    /// chain has expired.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IdentityError> {
        if !self.chain.is_valid_at(now_ns()) {
            return Err(IdentityError::DelegationExpired);
        }
        Ok(self.session_key.sign(message))
    }

    /// DER-encoded public key of the identity as seen by verifiers (the
    /// chain's root key, not the session key).
    pub fn public_key_der(&self) -> &[u8] {
        self.chain.root_public_key()
    }

    /// The self-authenticating principal derived from the chain's root key.
    pub fn principal(&self) -> Principal {
        Principal::self_authenticating(self.chain.root_public_key())
    }

    /// The delegation chain backing this identity.
    pub fn delegation_chain(&self) -> &DelegationChain {
        &self.chain
    }
}

/// Identity presented to the relying party during token exchange.
///
/// The two payload forms the relying party verifies differently: a bare
/// session key proves itself, a delegated identity proves the chain.
#[derive(Debug)]
pub enum ExchangeIdentity<'a> {
    /// A bare session keypair with no delegation attached.
    Session(&'a SessionKeyPair),
    /// A session keypair acting under a delegation chain.
    Delegated(&'a DelegationIdentity),
}

impl ExchangeIdentity<'_> {
    /// Sign a message with the underlying session key.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, IdentityError> {
        match self {
            ExchangeIdentity::Session(key) => Ok(key.sign(message)),
            ExchangeIdentity::Delegated(identity) => identity.sign(message),
        }
    }

    /// DER-encoded public key the relying party should verify against.
    pub fn public_key_der(&self) -> Vec<u8> {
        match self {
            ExchangeIdentity::Session(key) => key.public_key_der(),
            ExchangeIdentity::Delegated(identity) => identity.public_key_der().to_vec(),
        }
    }
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
