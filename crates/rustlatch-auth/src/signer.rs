//! HMAC-SHA1 request signer.
//!
//! The signature is `Base64(HMAC-SHA1(SecretKey, StringToSign))` using the
//! standard base64 alphabet with padding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Compute the base64-encoded HMAC-SHA1 of `string_to_sign` keyed by `secret_key`.
///
/// # Examples
///
/// ```
/// use rustlatch_auth::signer::sign;
///
/// let signature = sign(b"key", "The quick brown fox jumps over the lazy dog");
/// assert_eq!(signature, "3nybhbi3iqa8ino29wqQcBydtNk=");
/// ```
#[must_use]
pub fn sign(secret_key: &[u8], string_to_sign: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(secret_key).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
