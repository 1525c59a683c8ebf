//! Bearer token (JWT) inspection.
//!
//! The client never verifies signatures; it only peeks at the payload to
//! decide whether a stored token is worth sending.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::Value;

/// Decode the claims segment of a JWT.
///
/// Returns `None` for anything that is not three dot-separated segments
/// with a base64url JSON object in the middle.
pub fn decode_claims(token: &str) -> Option<Value> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    // Some issuers pad the segments; the engine here expects none.
    let payload = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&payload).ok()?;
    claims.is_object().then_some(claims)
}

/// Expiry time (`exp`, seconds since the epoch) of a JWT.
pub fn expires_at(token: &str) -> Option<i64> {
    decode_claims(token)?.get("exp")?.as_i64()
}

/// A token is expired when it cannot be decoded, has no `exp`, or `exp` is
/// not in the future.
pub fn is_token_expired(token: &str) -> bool {
    match expires_at(token) {
        Some(exp) => chrono::Utc::now().timestamp() >= exp,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(claims: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_decode_claims() {
        let token = make_token(&serde_json::json!({"sub": "ada", "exp": 4102444800i64}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims["sub"], "ada");
        assert_eq!(expires_at(&token), Some(4102444800));
    }

    #[test]
    fn test_future_token_not_expired() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = make_token(&serde_json::json!({"exp": exp}));
        assert!(!is_token_expired(&token));
    }

    #[test]
    fn test_past_token_expired() {
        let exp = chrono::Utc::now().timestamp() - 10;
        let token = make_token(&serde_json::json!({"exp": exp}));
        assert!(is_token_expired(&token));
    }

    #[test]
    fn test_malformed_tokens_are_expired() {
        assert!(is_token_expired(""));
        assert!(is_token_expired("opaque-token"));
        assert!(is_token_expired("a.!!!.c"));
        assert!(is_token_expired(&make_token(&serde_json::json!({"sub": "no-exp"}))));
        assert!(decode_claims("a.b").is_none());
    }
}
