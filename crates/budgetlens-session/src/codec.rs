//! Signed cookie codec
//!
//! Wire format: `<payload>.<tag>` where `payload` is the URL-safe base64
//! (no padding) of the serialized session and `tag` is the URL-safe
//! base64 HMAC-SHA256 of the encoded payload. Verification is
//! constant-time. The payload is signed, not encrypted; callers must not
//! put anything in it they would not hand to the browser that owns it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Encode and sign a payload into a cookie value.
pub fn seal(secret: &[u8], payload: &[u8]) -> String {
    let body = URL_SAFE_NO_PAD.encode(payload);
    let tag = sign(secret, body.as_bytes());
    format!("{body}.{tag}")
}

/// Verify and decode a cookie value. Returns `None` on any structural or
/// signature failure.
pub fn open(secret: &[u8], value: &str) -> Option<Vec<u8>> {
    let (body, tag) = value.rsplit_once('.')?;
    let expected = sign(secret, body.as_bytes());
    if bool::from(expected.as_bytes().ct_eq(tag.as_bytes())) {
        URL_SAFE_NO_PAD.decode(body).ok()
    } else {
        None
    }
}

fn sign(secret: &[u8], data: &[u8]) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret).expect("hmac key");
    mac.update(data);
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_seal_open_round_trip() {
        let sealed = seal(SECRET, b"{\"accessToken\":\"tok-1\"}");
        let opened = open(SECRET, &sealed).unwrap();
        assert_eq!(opened, b"{\"accessToken\":\"tok-1\"}");
    }

    #[test]
    fn test_open_rejects_tampered_payload() {
        let sealed = seal(SECRET, b"payload");
        let (_, tag) = sealed.rsplit_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode(b"other"), tag);
        assert!(open(SECRET, &forged).is_none());
    }

    #[test]
    fn test_open_rejects_tampered_tag() {
        let sealed = seal(SECRET, b"payload");
        let (body, _) = sealed.rsplit_once('.').unwrap();
        let forged = format!("{body}.AAAA");
        assert!(open(SECRET, &forged).is_none());
    }

    #[test]
    fn test_open_rejects_wrong_secret() {
        let sealed = seal(SECRET, b"payload");
        assert!(open(b"another-secret-another-secret-00", &sealed).is_none());
    }

    #[test]
    fn test_open_rejects_missing_separator() {
        assert!(open(SECRET, "no-dot-here").is_none());
    }
}
