//! Delegation wire model and chain construction.
//!
//! A [`SignedDelegation`] is untrusted input from the provider until it has
//! passed through [`DelegationChain::from_signed_delegation`], which checks
//! the structural invariants. Expiration is deliberately not checked at
//! build time: build may precede first use by network latency, so
//! "unexpired" is verified by the consumer via [`DelegationChain::is_valid_at`]
//! at signing time.

use candid::Principal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::IdentityError;

/// A single delegation binding a key to act on a principal's behalf until
/// an absolute expiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// DER-encoded public key being delegated to (hex on the wire).
    #[serde(with = "crate::codec")]
    pub pubkey: Vec<u8>,
    /// Absolute expiration, nanoseconds since the Unix epoch.
    pub expiration: u64,
    /// Optional canister targets the delegation is restricted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Principal>>,
}

/// A delegation plus the signature the provider issued over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedDelegation {
    /// The delegation being attested.
    pub delegation: Delegation,
    /// Provider signature over the delegation (hex on the wire).
    #[serde(with = "crate::codec")]
    pub signature: Vec<u8>,
}

/// An ordered chain of delegations from a root public key down to a
/// session public key.
///
/// Invariants held by construction: the chain is never empty, every link
/// carries a non-empty pubkey and signature, and the terminal link's
/// pubkey is the session key the chain was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationChain {
    delegations: Vec<SignedDelegation>,
    public_key: Vec<u8>,
}

impl DelegationChain {
    /// Build a one-link chain from a provider-issued delegation and the
    /// root public key the provider claims for the user.
    pub fn from_signed_delegation(
        signed: SignedDelegation,
        root_public_key: Vec<u8>,
    ) -> Result<Self, IdentityError> {
        Self::from_delegations(vec![signed], root_public_key)
    }

    /// Build a chain from an ordered list of delegations, root first.
    pub fn from_delegations(
        delegations: Vec<SignedDelegation>,
        root_public_key: Vec<u8>,
    ) -> Result<Self, IdentityError> {
        if root_public_key.is_empty() {
            return Err(IdentityError::MalformedDelegation(
                "root public key is empty".into(),
            ));
        }
        if delegations.is_empty() {
            return Err(IdentityError::MalformedDelegation(
                "delegation chain is empty".into(),
            ));
        }
        for signed in &delegations {
            if signed.delegation.pubkey.is_empty() {
                return Err(IdentityError::MalformedDelegation(
                    "delegation pubkey is empty".into(),
                ));
            }
            if signed.signature.is_empty() {
                return Err(IdentityError::MalformedDelegation(
                    "delegation signature is empty".into(),
                ));
            }
            if signed.delegation.expiration == 0 {
                return Err(IdentityError::MalformedDelegation(
                    "delegation expiration is zero".into(),
                ));
            }
        }

        Ok(DelegationChain {
            delegations,
            public_key: root_public_key,
        })
    }

    /// The links of the chain, root first.
    pub fn delegations(&self) -> &[SignedDelegation] {
        &self.delegations
    }

    /// DER-encoded root public key the chain is anchored at.
    pub fn root_public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// DER-encoded public key the chain terminates at (the session key).
    pub fn session_public_key(&self) -> &[u8] {
        // Chain is non-empty by construction.
        &self.delegations[self.delegations.len() - 1].delegation.pubkey
    }

    /// True when every link is unexpired at `now_ns` (nanoseconds since
    /// the Unix epoch).
    pub fn is_valid_at(&self, now_ns: u64) -> bool {
        self.delegations
            .iter()
            .all(|signed| signed.delegation.expiration > now_ns)
    }

    /// Serialize the chain into the delegated-identity network's canonical
    /// JSON form: hex byte fields, expiration as a hex string.
    pub fn to_json(&self) -> String {
        let delegations: Vec<Value> = self
            .delegations
            .iter()
            .map(|signed| {
                let mut delegation = serde_json::Map::new();
                delegation.insert(
                    "expiration".to_string(),
                    Value::String(format!("{:x}", signed.delegation.expiration)),
                );
                delegation.insert(
                    "pubkey".to_string(),
                    Value::String(hex::encode(&signed.delegation.pubkey)),
                );
                if let Some(targets) = &signed.delegation.targets {
                    delegation.insert(
                        "targets".to_string(),
                        Value::Array(
                            targets
                                .iter()
                                .map(|t| Value::String(hex::encode(t.as_slice())))
                                .collect(),
                        ),
                    );
                }
                serde_json::json!({
                    "delegation": delegation,
                    "signature": hex::encode(&signed.signature),
                })
            })
            .collect();

        serde_json::json!({
            "delegations": delegations,
            "publicKey": hex::encode(&self.public_key),
        })
        .to_string()
    }
}
