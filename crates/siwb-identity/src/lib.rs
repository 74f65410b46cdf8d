#![deny(missing_docs)]

//! # siwb-identity
//!
//! Key material and delegation data model for Sign-In-With-Bitcoin:
//! ephemeral Ed25519 session keys, provider-issued signed delegations,
//! delegation chains, and the delegated identity that signs on behalf of
//! an authenticated principal.
//!
//! # Example
//!
//! ```
//! use siwb_identity::{Delegation, DelegationChain, DelegationIdentity, SessionKeyPair, SignedDelegation};
//!
//! let session_key = SessionKeyPair::generate();
//!
//! // In production the signed delegation comes from the SIWB provider.
//! let signed = SignedDelegation {
//!     delegation: Delegation {
//!         pubkey: session_key.public_key_der(),
//!         expiration: u64::MAX,
//!         targets: None,
//!     },
//!     signature: vec![0u8; 64],
//! };
//!
//! let chain = DelegationChain::from_signed_delegation(signed, vec![1u8; 44])?;
//! let identity = DelegationIdentity::new(session_key, chain)?;
//! println!("principal: {}", identity.principal().to_text());
//! # Ok::<(), siwb_identity::IdentityError>(())
//! ```

pub mod codec;
pub mod delegation;
pub mod error;
pub mod identity;
pub mod session;

pub use delegation::{Delegation, DelegationChain, SignedDelegation};
pub use error::IdentityError;
pub use identity::{DelegationIdentity, ExchangeIdentity};
pub use session::SessionKeyPair;
