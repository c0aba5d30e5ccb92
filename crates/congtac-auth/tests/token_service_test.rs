// Integration tests for the JWT token service
// Tests token encoding, decoding, and caching

use base64::{Engine as _, engine::general_purpose::STANDARD};
use congtac_auth::service::token::{
    decode_jwt_token, decode_jwt_token_cached, encode_jwt_token, invalidate_token,
};

// Generate a valid base64 secret key for testing
fn test_secret_key() -> String {
    STANDARD.encode("test-secret-key-that-is-long-enough-for-hs256-algorithm")
}

#[test]
fn test_encode_decode_jwt_token() {
    let secret = test_secret_key();
    let sub = "6a2f8a1e-8f2e-4f6a-9a38-0a4b8a2d1c11";
    let expire_seconds = 3600;

    let token = encode_jwt_token(sub, &secret, expire_seconds);
    assert!(token.is_ok());
    let token = token.unwrap();

    let decoded = decode_jwt_token(&token, &secret);
    assert!(decoded.is_ok());
    let decoded = decoded.unwrap();

    assert_eq!(decoded.claims.sub, sub);
}

#[test]
fn test_token_expiration() {
    let secret = test_secret_key();

    // Expired 120 seconds ago, beyond the default 60 second validation leeway
    let token = encode_jwt_token("someone", &secret, -120).unwrap();

    let decoded = decode_jwt_token(&token, &secret);
    assert!(
        decoded.is_err(),
        "Token expired beyond leeway should fail validation"
    );
}

#[test]
fn test_invalid_secret_key() {
    let secret1 = test_secret_key();
    let secret2 = STANDARD.encode("different-secret-key-for-testing-purposes-here");

    let token = encode_jwt_token("someone", &secret1, 3600).unwrap();

    let decoded = decode_jwt_token(&token, &secret2);
    assert!(decoded.is_err());
}

#[test]
fn test_cached_token_validation() {
    let secret = test_secret_key();
    let sub = "cached-user-id";

    let token = encode_jwt_token(sub, &secret, 3600).unwrap();

    // First call - cache miss, performs validation
    let result1 = decode_jwt_token_cached(&token, &secret);
    assert!(result1.is_ok());
    assert_eq!(result1.unwrap().claims.sub, sub);

    // Second call - served from cache
    let result2 = decode_jwt_token_cached(&token, &secret);
    assert!(result2.is_ok());
    assert_eq!(result2.unwrap().claims.sub, sub);

    // After invalidation the token still validates against the key
    invalidate_token(&token);
    let result3 = decode_jwt_token_cached(&token, &secret);
    assert!(result3.is_ok());
}
