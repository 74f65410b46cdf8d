//! Ephemeral Ed25519 session keys.
//!
//! A session keypair lives for exactly one authentication attempt. It is
//! generated from OS randomness, never derived from user input, and never
//! written to storage; the secret half is zeroized when the keypair is
//! dropped.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

/// DER prefix wrapping a raw Ed25519 public key into a
/// SubjectPublicKeyInfo structure (RFC 8410).
const ED25519_DER_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Length of a DER-encoded Ed25519 public key in bytes.
pub const PUBLIC_KEY_DER_LEN: usize = 44;

/// An ephemeral Ed25519 keypair scoped to a single authentication attempt.
///
/// Deliberately not `Clone`: the keypair has exactly one owner, and leaking
/// a session key compromises at most one authentication window.
pub struct SessionKeyPair {
    inner: SigningKey,
}

impl SessionKeyPair {
    /// Generate a fresh keypair using the OS random number generator.
    pub fn generate() -> Self {
        SessionKeyPair {
            inner: SigningKey::generate(&mut OsRng),
        }
    }

    /// The verifying half of the keypair.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.inner.verifying_key()
    }

    /// Raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.inner.verifying_key().to_bytes()
    }

    /// DER-encoded public key (RFC 8410 SubjectPublicKeyInfo).
    pub fn public_key_der(&self) -> Vec<u8> {
        let mut der = Vec::with_capacity(PUBLIC_KEY_DER_LEN);
        der.extend_from_slice(&ED25519_DER_PREFIX);
        der.extend_from_slice(&self.public_key_bytes());
        der
    }

    /// Sign a message, returning the 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.inner.sign(message).to_bytes().to_vec()
    }
}

impl std::fmt::Debug for SessionKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret half.
        f.debug_tuple("SessionKeyPair")
            .field(&hex::encode(self.public_key_bytes()))
            .finish()
    }
}
