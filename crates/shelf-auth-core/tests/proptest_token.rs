//! Property-based tests for password digests and token signing
//!
//! These tests verify:
//! - Password digests are deterministic fixed-length hex
//! - Signed tokens roundtrip correctly (encode -> decode)
//! - Any single-character change to a token is rejected as invalid
//! - Malformed tokens never cause panics
//! - Expired tokens decode but fail verification

mod common;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use proptest::prelude::*;
use shelf_auth_core::{AuthError, Claims, PasswordDigest, SessionVerifier, SigningKey, TokenCodec};
use shelf_types::UserId;

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary claims
fn arb_claims() -> impl Strategy<Value = Claims> {
    (
        any::<[u8; 16]>(),   // subject bytes
        "[a-z][a-z0-9-]{0,15}", // issuer
        0i64..4_000_000_000_000i64, // issued at (ms)
        0i64..1_000_000_000_000i64, // lifetime (ms)
    )
        .prop_map(|(id_bytes, issuer, issued_at, lifetime)| Claims {
            subject: UserId(uuid::Uuid::from_bytes(id_bytes)),
            issuer,
            issued_at,
            expires_at: issued_at + lifetime,
        })
}

/// Generate valid signing secrets (32+ bytes)
fn arb_secret() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 32..64)
        .prop_map(|bytes| bytes.iter().map(|b| (b % 94 + 33) as char).collect())
}

/// Generate malformed token strings
fn arb_malformed_token() -> impl Strategy<Value = String> {
    prop_oneof![
        // No dots
        "[a-zA-Z0-9_-]{10,50}",
        // Too many segments
        "[a-zA-Z0-9_-]{5,10}\\.[a-zA-Z0-9_-]{5,10}\\.[a-zA-Z0-9_-]{5,10}\\.[a-zA-Z0-9_-]{5,10}",
        // Empty parts
        Just("..".to_string()),
        Just(".payload.sig".to_string()),
        Just("header..sig".to_string()),
        Just("header.payload.".to_string()),
        Just("".to_string()),
        // Invalid base64 characters
        "[!@#$%^&*()]{10,30}\\.[a-zA-Z0-9_-]{20,40}\\.[a-zA-Z0-9_-]{43}",
        // Valid base64 but not JSON, fake signature
        any::<[u8; 32]>().prop_map(|bytes| {
            let seg = URL_SAFE_NO_PAD.encode(bytes);
            format!("{seg}.{seg}.fake_sig")
        }),
    ]
}

/// Characters a tampered token may contain
fn arb_token_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('A', 'Z'),
        prop::char::range('a', 'z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
    ]
}

fn codec_for(secret: &str) -> TokenCodec {
    TokenCodec::new(SigningKey::new(secret).unwrap())
}

// ============================================================================
// Password Digest Properties
// ============================================================================

proptest! {
    /// Property: hashing is deterministic and always 64 lowercase hex chars
    #[test]
    fn prop_password_digest_deterministic(password in ".*") {
        let a = PasswordDigest::hash(&password);
        let b = PasswordDigest::hash(&password);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.as_str().len(), 64);
        prop_assert!(a.as_str().bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        prop_assert!(a.matches(&password));
    }

    /// Property: distinct passwords yield distinct digests
    #[test]
    fn prop_password_digest_distinct(a in ".{0,32}", b in ".{0,32}") {
        prop_assume!(a != b);
        prop_assert_ne!(PasswordDigest::hash(&a), PasswordDigest::hash(&b));
        prop_assert!(!PasswordDigest::hash(&a).matches(&b));
    }
}

// ============================================================================
// Token Signing/Verification Properties
// ============================================================================

proptest! {
    /// Property: encoded tokens always decode to the same claims
    #[test]
    fn prop_token_roundtrips(claims in arb_claims(), secret in arb_secret()) {
        let codec = codec_for(&secret);
        let token = codec.encode(&claims).unwrap();
        prop_assert_eq!(codec.decode(&token).unwrap(), claims);
    }

    /// Property: a token signed under one secret never decodes under another
    #[test]
    fn prop_foreign_secret_rejected(
        claims in arb_claims(),
        a in arb_secret(),
        b in arb_secret()
    ) {
        prop_assume!(a != b);
        let token = codec_for(&a).encode(&claims).unwrap();
        prop_assert!(matches!(codec_for(&b).decode(&token), Err(AuthError::InvalidToken)));
    }

    /// Property: replacing any single character is detected
    #[test]
    fn prop_single_char_tampering_detected(
        claims in arb_claims(),
        position in any::<prop::sample::Index>(),
        replacement in arb_token_char()
    ) {
        let codec = codec_for(&"p".repeat(32));
        let token = codec.encode(&claims).unwrap();

        // Tokens are pure ASCII, so byte indices are char indices
        let i = position.index(token.len());
        prop_assume!(token.as_bytes()[i] as char != replacement);

        let mut tampered = token.clone();
        tampered.replace_range(i..=i, &replacement.to_string());

        prop_assert!(
            matches!(codec.decode(&tampered), Err(AuthError::InvalidToken)),
            "tampered token accepted: {}", tampered
        );
    }

    /// Property: malformed tokens never panic and are always invalid
    #[test]
    fn prop_malformed_token_rejected(token in arb_malformed_token()) {
        let codec = codec_for(&"p".repeat(32));
        let result = std::panic::catch_unwind(|| codec.decode(&token));
        prop_assert!(result.is_ok(), "decode panicked for: {:?}", token);
        prop_assert!(matches!(result.unwrap(), Err(AuthError::InvalidToken)));
    }

    /// Property: expired tokens decode but fail verification as expired
    #[test]
    fn prop_expired_token_distinguished(claims in arb_claims(), past in 0i64..1_000_000i64) {
        let codec = codec_for(&"p".repeat(32));
        let verifier = SessionVerifier::new(codec.clone());
        let token = codec.encode(&claims).unwrap();

        prop_assert!(codec.decode(&token).is_ok());
        prop_assert!(matches!(
            verifier.verify_at(&token, claims.expires_at + past),
            Err(AuthError::ExpiredToken)
        ));
    }

    /// Property: tokens verify for every instant strictly before expiry
    #[test]
    fn prop_unexpired_token_verifies(claims in arb_claims(), before in 1i64..1_000_000i64) {
        let codec = codec_for(&"p".repeat(32));
        let verifier = SessionVerifier::new(codec.clone());
        let token = codec.encode(&claims).unwrap();

        prop_assert_eq!(
            verifier.verify_at(&token, claims.expires_at - before).unwrap(),
            claims.subject
        );
    }
}

// ============================================================================
// Non-Property Edge Case Tests
// ============================================================================

#[test]
fn test_per_run_secrets_differ() {
    assert_ne!(common::test_secret(), common::test_secret());
}

#[test]
fn test_signature_over_header_and_payload() {
    let codec = codec_for(&"p".repeat(32));
    let claims = Claims {
        subject: UserId::new(),
        issuer: "shelf".to_string(),
        issued_at: 1,
        expires_at: 2,
    };
    let token = codec.encode(&claims).unwrap();

    // Swapping in another token's signature is rejected
    let other = codec
        .encode(&Claims {
            issuer: "other".to_string(),
            ..claims.clone()
        })
        .unwrap();
    let (head, _) = token.rsplit_once('.').unwrap();
    let (_, other_sig) = other.rsplit_once('.').unwrap();
    let spliced = format!("{head}.{other_sig}");
    assert!(matches!(codec.decode(&spliced), Err(AuthError::InvalidToken)));
}
