//! Unit tests for the RS256 signer

use chrono::{Duration, Utc};
use serde_json::json;

use crate::domain::value_objects::Payload;
use crate::errors::{DomainError, VerificationError};
use crate::services::key_token::Rs256Signer;

use super::{other_key_pair, shared_key_pair};

fn payload() -> Payload {
    Payload::new()
        .with_claim("sub", "u1")
        .with_claim("scopes", json!(["read", "write"]))
}

fn verification_error(result: Result<impl std::fmt::Debug, DomainError>) -> VerificationError {
    match result {
        Err(DomainError::Verification(e)) => e,
        other => panic!("expected verification error, got {:?}", other),
    }
}

#[test]
fn test_sign_and_verify() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();

    let token = signer.sign(&payload(), &keys.private_key, 3600).unwrap();
    assert_eq!(token.split('.').count(), 3);

    let claims = signer.verify(&token, &keys.public_key).unwrap();
    assert_eq!(claims.payload, payload());
    assert_eq!(claims.lifetime(), Some(Duration::seconds(3600)));

    let drift = (claims.expires_at - (Utc::now() + Duration::seconds(3600))).num_seconds();
    assert!(drift.abs() <= 5);
}

#[test]
fn test_sign_at_is_deterministic() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();
    let issued_at = Utc::now();

    let first = signer.sign_at(&payload(), &keys.private_key, issued_at, 60).unwrap();
    let second = signer.sign_at(&payload(), &keys.private_key, issued_at, 60).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sign_rejects_payload_with_exp() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();
    let payload = payload().with_claim("exp", 1_700_000_000);

    let result = signer.sign(&payload, &keys.private_key, 3600);
    assert!(matches!(result, Err(DomainError::Signing { .. })));
}

#[test]
fn test_sign_rejects_payload_with_iat() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();
    let payload = payload().with_claim("iat", 1000);

    match signer.sign(&payload, &keys.private_key, 3600) {
        Err(DomainError::Signing { message }) => assert!(message.contains("iat")),
        other => panic!("expected signing error, got {:?}", other),
    }
}

#[test]
fn test_sign_rejects_overflowing_lifetime() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();

    let result = signer.sign(&payload(), &keys.private_key, i64::MAX);
    assert!(matches!(result, Err(DomainError::Signing { .. })));
}

#[test]
fn test_sign_rejects_invalid_private_key() {
    let signer = Rs256Signer::new();

    let result = signer.sign(&payload(), "not a pem", 3600);
    assert!(matches!(result, Err(DomainError::Signing { .. })));
}

#[test]
fn test_verify_with_mismatched_key() {
    let signer = Rs256Signer::new();
    let token = signer.sign(&payload(), &shared_key_pair().private_key, 3600).unwrap();

    let err = verification_error(signer.verify(&token, &other_key_pair().public_key));
    assert_eq!(err, VerificationError::InvalidSignature);
}

#[test]
fn test_verify_tampered_signature() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();
    let token = signer.sign(&payload(), &keys.private_key, 3600).unwrap();

    let signature_start = token.rfind('.').unwrap() + 1;
    let position = signature_start + 10;
    let flipped = if &token[position..=position] == "A" { "B" } else { "A" };
    let tampered = format!("{}{}{}", &token[..position], flipped, &token[position + 1..]);

    let err = verification_error(signer.verify(&tampered, &keys.public_key));
    assert_eq!(err, VerificationError::InvalidSignature);
}

#[test]
fn test_verify_swapped_payload() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();
    let token = signer.sign(&payload(), &keys.private_key, 3600).unwrap();
    let other = signer
        .sign(&Payload::new().with_claim("sub", "admin"), &keys.private_key, 3600)
        .unwrap();

    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let spliced = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    let err = verification_error(signer.verify(&spliced, &keys.public_key));
    assert_eq!(err, VerificationError::InvalidSignature);
}

#[test]
fn test_verify_expired_token() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();
    let token = signer.sign(&payload(), &keys.private_key, -120).unwrap();

    let err = verification_error(signer.verify(&token, &keys.public_key));
    assert_eq!(err, VerificationError::TokenExpired);
}

#[test]
fn test_verify_allows_clock_leeway() {
    let keys = shared_key_pair();
    let token = Rs256Signer::new().sign(&payload(), &keys.private_key, -30).unwrap();

    assert!(Rs256Signer::new().verify(&token, &keys.public_key).is_ok());

    let strict = Rs256Signer::new().with_leeway(0);
    let err = verification_error(strict.verify(&token, &keys.public_key));
    assert_eq!(err, VerificationError::TokenExpired);
}

#[test]
fn test_verify_malformed_input() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();

    let err = verification_error(signer.verify("not-a-token", &keys.public_key));
    assert_eq!(err, VerificationError::InvalidTokenFormat);

    let token = signer.sign(&payload(), &keys.private_key, 3600).unwrap();
    let err = verification_error(signer.verify(&token, "not a pem"));
    assert!(matches!(err, VerificationError::InvalidKey { .. }));
}

#[test]
fn test_inspect_unverified() {
    let signer = Rs256Signer::new();
    let keys = shared_key_pair();
    let expired = signer.sign(&payload(), &keys.private_key, -3600).unwrap();

    let claims = signer.inspect_unverified(&expired).unwrap();
    assert_eq!(claims.user_id().as_deref(), Some("u1"));
    assert!(claims.contains("exp"));
    assert!(claims.contains("iat"));

    assert!(signer.inspect_unverified("garbage").is_none());
}
