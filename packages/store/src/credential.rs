//! # Bearer credential and local expiry inspection
//!
//! The server hands out an opaque bearer token. When that token happens to be a
//! JWT, its payload carries an `exp` claim (seconds since the Unix epoch) that
//! lets the client notice an expired session without a round-trip. Tokens that
//! are not JWTs, or JWTs without `exp`, have no local expiry; the client then
//! relies on the server answering 401.
//!
//! The signature is never checked here: the claim is only used to decide when
//! to stop sending a token the server will reject anyway.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::Deserialize;

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

impl Credential {
    /// Wrap a raw token. Surrounding whitespace is dropped; blank tokens are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `exp` claim if the token is a JWT that carries one.
    pub fn expires_at(&self) -> Option<i64> {
        let mut segments = self.0.split('.');
        let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }
        let bytes = Base64UrlUnpadded::decode_vec(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice::<Claims>(&bytes).ok()?.exp
    }

    /// True once `now + skew_secs` has reached the `exp` claim.
    /// Tokens without a readable `exp` never expire locally.
    pub fn is_expired(&self, now: i64, skew_secs: i64) -> bool {
        self.expires_at()
            .is_some_and(|exp| now.saturating_add(skew_secs) >= exp)
    }
}

/// Current time in seconds since the Unix epoch.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn now_unix() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Current time in seconds since the Unix epoch.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) fn jwt_with_payload(payload: &str) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = Base64UrlUnpadded::encode_string(payload.as_bytes());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_blank() {
        assert!(Credential::parse("").is_none());
        assert!(Credential::parse(" \n").is_none());
        assert_eq!(Credential::parse(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_debug_hides_token() {
        let c = Credential::parse("secret-token").unwrap();
        assert_eq!(format!("{c:?}"), "Credential(***)");
    }

    #[test]
    fn test_jwt_expiry() {
        let token = jwt_with_payload(r#"{"sub":"42","exp":1000}"#);
        let c = Credential::parse(&token).unwrap();
        assert_eq!(c.expires_at(), Some(1000));

        assert!(!c.is_expired(900, 0));
        assert!(c.is_expired(1000, 0));
        assert!(c.is_expired(980, 30));
    }

    #[test]
    fn test_opaque_tokens_never_expire_locally() {
        let opaque = Credential::parse("fake-token").unwrap();
        assert_eq!(opaque.expires_at(), None);
        assert!(!opaque.is_expired(i64::MAX, 0));

        let no_exp = Credential::parse(&jwt_with_payload(r#"{"sub":"42"}"#)).unwrap();
        assert_eq!(no_exp.expires_at(), None);

        let garbage = Credential::parse("a.%%%.c").unwrap();
        assert_eq!(garbage.expires_at(), None);
    }
}
