//! Tests for the delegated identity and exchange identity variants.

use std::time::{SystemTime, UNIX_EPOCH};

use candid::Principal;
use siwb_identity::{
    Delegation, DelegationChain, DelegationIdentity, ExchangeIdentity, IdentityError,
    SessionKeyPair, SignedDelegation,
};

fn future_expiration_ns() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    now + 3_600 * 1_000_000_000
}

fn chain_for(session_key: &SessionKeyPair, root_key: &[u8], expiration: u64) -> DelegationChain {
    DelegationChain::from_signed_delegation(
        SignedDelegation {
            delegation: Delegation {
                pubkey: session_key.public_key_der(),
                expiration,
                targets: None,
            },
            signature: vec![7u8; 64],
        },
        root_key.to_vec(),
    )
    .unwrap()
}

#[test]
fn test_identity_binds_chain_to_session_key() {
    let session_key = SessionKeyPair::generate();
    let root_key = vec![1u8; 44];
    let chain = chain_for(&session_key, &root_key, future_expiration_ns());

    let identity = DelegationIdentity::new(session_key, chain).unwrap();

    assert_eq!(identity.public_key_der(), root_key.as_slice());
}

#[test]
fn test_identity_rejects_foreign_chain() {
    let session_key = SessionKeyPair::generate();
    let other_key = SessionKeyPair::generate();
    let chain = chain_for(&other_key, &[1u8; 44], future_expiration_ns());

    let result = DelegationIdentity::new(session_key, chain);

    assert!(matches!(
        result.unwrap_err(),
        IdentityError::SessionKeyMismatch
    ));
}

#[test]
fn test_sign_succeeds_before_expiration() {
    let session_key = SessionKeyPair::generate();
    let chain = chain_for(&session_key, &[1u8; 44], future_expiration_ns());
    let identity = DelegationIdentity::new(session_key, chain).unwrap();

    let signature = identity.sign(b"1700000000000").unwrap();
    assert_eq!(signature.len(), 64);
}

#[test]
fn test_sign_fails_after_expiration() {
    let session_key = SessionKeyPair::generate();
    // Expired long ago, but structurally valid.
    let chain = chain_for(&session_key, &[1u8; 44], 1_000);
    let identity = DelegationIdentity::new(session_key, chain).unwrap();

    let result = identity.sign(b"1700000000000");

    assert!(matches!(
        result.unwrap_err(),
        IdentityError::DelegationExpired
    ));
}

#[test]
fn test_principal_derives_from_root_key_only() {
    let root_key = vec![1u8; 44];

    let key_a = SessionKeyPair::generate();
    let chain_a = chain_for(&key_a, &root_key, future_expiration_ns());
    let identity_a = DelegationIdentity::new(key_a, chain_a).unwrap();

    let key_b = SessionKeyPair::generate();
    let chain_b = chain_for(&key_b, &root_key, future_expiration_ns());
    let identity_b = DelegationIdentity::new(key_b, chain_b).unwrap();

    // Same root key, different session keys: same principal.
    assert_eq!(identity_a.principal(), identity_b.principal());
    assert_eq!(
        identity_a.principal(),
        Principal::self_authenticating(&root_key)
    );
    assert!(!identity_a.principal().to_text().is_empty());
}

#[test]
fn test_different_root_keys_yield_different_principals() {
    let key_a = SessionKeyPair::generate();
    let chain_a = chain_for(&key_a, &[1u8; 44], future_expiration_ns());
    let identity_a = DelegationIdentity::new(key_a, chain_a).unwrap();

    let key_b = SessionKeyPair::generate();
    let chain_b = chain_for(&key_b, &[3u8; 44], future_expiration_ns());
    let identity_b = DelegationIdentity::new(key_b, chain_b).unwrap();

    assert_ne!(identity_a.principal(), identity_b.principal());
}

#[test]
fn test_exchange_identity_public_keys() {
    let session_key = SessionKeyPair::generate();
    let session_der = session_key.public_key_der();

    assert_eq!(
        ExchangeIdentity::Session(&session_key).public_key_der(),
        session_der
    );

    let root_key = vec![1u8; 44];
    let chain = chain_for(&session_key, &root_key, future_expiration_ns());
    let identity = DelegationIdentity::new(session_key, chain).unwrap();

    assert_eq!(
        ExchangeIdentity::Delegated(&identity).public_key_der(),
        root_key
    );
}

#[test]
fn test_exchange_identity_signs_with_session_key() {
    let session_key = SessionKeyPair::generate();
    let expected = session_key.sign(b"msg");

    let via_session = ExchangeIdentity::Session(&session_key).sign(b"msg").unwrap();
    assert_eq!(via_session, expected);

    let chain = chain_for(&session_key, &[1u8; 44], future_expiration_ns());
    let identity = DelegationIdentity::new(session_key, chain).unwrap();
    let via_delegated = ExchangeIdentity::Delegated(&identity).sign(b"msg").unwrap();

    // Ed25519 signing is deterministic, so both paths agree.
    assert_eq!(via_delegated, expected);
}
