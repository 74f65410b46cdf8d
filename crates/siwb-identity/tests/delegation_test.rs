//! Tests for delegation decoding and chain construction.

use candid::Principal;
use siwb_identity::{Delegation, DelegationChain, IdentityError, SignedDelegation};

fn sample_signed(pubkey: Vec<u8>, expiration: u64) -> SignedDelegation {
    SignedDelegation {
        delegation: Delegation {
            pubkey,
            expiration,
            targets: None,
        },
        signature: vec![7u8; 64],
    }
}

#[test]
fn test_build_one_link_chain() {
    let session_key = vec![2u8; 44];
    let root_key = vec![1u8; 44];

    let chain = DelegationChain::from_signed_delegation(
        sample_signed(session_key.clone(), 1_700_000_000_000_000_000),
        root_key.clone(),
    )
    .unwrap();

    assert_eq!(chain.delegations().len(), 1);
    assert_eq!(chain.root_public_key(), root_key.as_slice());
    assert_eq!(chain.session_public_key(), session_key.as_slice());
}

#[test]
fn test_build_rejects_empty_root_key() {
    let result = DelegationChain::from_signed_delegation(
        sample_signed(vec![2u8; 44], 1_700_000_000_000_000_000),
        Vec::new(),
    );

    assert!(matches!(
        result.unwrap_err(),
        IdentityError::MalformedDelegation(_)
    ));
}

#[test]
fn test_build_rejects_empty_pubkey() {
    let result = DelegationChain::from_signed_delegation(
        sample_signed(Vec::new(), 1_700_000_000_000_000_000),
        vec![1u8; 44],
    );

    assert!(matches!(
        result.unwrap_err(),
        IdentityError::MalformedDelegation(_)
    ));
}

#[test]
fn test_build_rejects_empty_signature() {
    let mut signed = sample_signed(vec![2u8; 44], 1_700_000_000_000_000_000);
    signed.signature = Vec::new();

    let result = DelegationChain::from_signed_delegation(signed, vec![1u8; 44]);

    assert!(matches!(
        result.unwrap_err(),
        IdentityError::MalformedDelegation(_)
    ));
}

#[test]
fn test_build_rejects_zero_expiration() {
    let result =
        DelegationChain::from_signed_delegation(sample_signed(vec![2u8; 44], 0), vec![1u8; 44]);

    assert!(matches!(
        result.unwrap_err(),
        IdentityError::MalformedDelegation(_)
    ));
}

#[test]
fn test_build_rejects_empty_chain() {
    let result = DelegationChain::from_delegations(Vec::new(), vec![1u8; 44]);

    assert!(matches!(
        result.unwrap_err(),
        IdentityError::MalformedDelegation(_)
    ));
}

#[test]
fn test_validity_window() {
    let chain = DelegationChain::from_signed_delegation(
        sample_signed(vec![2u8; 44], 1_000),
        vec![1u8; 44],
    )
    .unwrap();

    assert!(chain.is_valid_at(999));
    assert!(!chain.is_valid_at(1_000));
    assert!(!chain.is_valid_at(1_001));
}

#[test]
fn test_chain_json_shape() {
    let session_key = vec![2u8; 44];
    let root_key = vec![1u8; 44];
    let chain = DelegationChain::from_signed_delegation(
        sample_signed(session_key.clone(), 0xDEADBEEF),
        root_key.clone(),
    )
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&chain.to_json()).unwrap();

    assert_eq!(
        parsed["publicKey"].as_str().unwrap(),
        hex::encode(&root_key)
    );
    let link = &parsed["delegations"][0];
    assert_eq!(
        link["delegation"]["pubkey"].as_str().unwrap(),
        hex::encode(&session_key)
    );
    assert_eq!(link["delegation"]["expiration"].as_str().unwrap(), "deadbeef");
    assert!(link["delegation"].get("targets").is_none());
    assert_eq!(
        link["signature"].as_str().unwrap(),
        hex::encode(vec![7u8; 64])
    );
}

#[test]
fn test_chain_json_includes_targets() {
    let target = Principal::from_slice(&[0, 0, 0, 0, 0, 0, 0, 7, 1, 1]);
    let mut signed = sample_signed(vec![2u8; 44], 1_700_000_000_000_000_000);
    signed.delegation.targets = Some(vec![target]);

    let chain = DelegationChain::from_signed_delegation(signed, vec![1u8; 44]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&chain.to_json()).unwrap();

    let targets = parsed["delegations"][0]["delegation"]["targets"]
        .as_array()
        .unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(
        targets[0].as_str().unwrap(),
        hex::encode(target.as_slice())
    );
}

#[test]
fn test_signed_delegation_decodes_from_wire_json() {
    let wire = serde_json::json!({
        "delegation": {
            "pubkey": hex::encode(vec![2u8; 44]),
            "expiration": 1_700_000_000_000_000_000u64,
        },
        "signature": hex::encode(vec![9u8; 64]),
    });

    let signed: SignedDelegation = serde_json::from_value(wire).unwrap();

    assert_eq!(signed.delegation.pubkey, vec![2u8; 44]);
    assert_eq!(signed.delegation.expiration, 1_700_000_000_000_000_000);
    assert_eq!(signed.delegation.targets, None);
    assert_eq!(signed.signature, vec![9u8; 64]);
}

#[test]
fn test_signed_delegation_rejects_bad_hex() {
    let wire = serde_json::json!({
        "delegation": {
            "pubkey": "not hex",
            "expiration": 1u64,
        },
        "signature": "00",
    });

    assert!(serde_json::from_value::<SignedDelegation>(wire).is_err());
}
