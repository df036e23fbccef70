//! Reversible password codec.
//!
//! A stored token is `base64(xor(plaintext + "|" + salt, key))`, where the
//! salt is the student's mobile number and the key is a process-wide secret
//! supplied through configuration. The salt binds a token to one record:
//! the same password stored for two students produces two different tokens,
//! and a token copied onto another record fails to decode.
//!
//! This is obfuscation, not cryptography — the transform is reversible by
//! anyone holding the key, there is no hashing and no per-install
//! randomness. The scheme is kept for wire compatibility with existing
//! stored tokens; do not "fix" it in place. Interoperating with a legacy
//! store means configuring the same key string (see
//! [`crate::config::codec::CodecConfig`]).

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Separates the plaintext from the embedded salt inside a decoded token.
/// A password containing this character cannot survive decoding (the salt
/// comparison fails) and is reported as invalid credentials, never as an
/// error.
const SALT_SEPARATOR: char = '|';

/// Encode a plaintext password into a stored token.
///
/// Never fails for valid string inputs. The key must be non-empty;
/// [`CodecConfig::from_env`](crate::config::codec::CodecConfig::from_env)
/// enforces that at startup.
pub fn encode_password(plaintext: &str, salt: &str, key: &str) -> String {
    let combined = format!("{plaintext}{SALT_SEPARATOR}{salt}");

    let obfuscated: String = combined
        .chars()
        .zip(key.chars().cycle())
        .map(|(c, k)| char::from_u32(c as u32 ^ k as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();

    STANDARD.encode(obfuscated.as_bytes())
}

/// Decode a stored token back into its plaintext, verifying the salt.
///
/// Returns `None` on any failure: malformed base64, non-UTF-8 payload,
/// a code point the XOR keystream cannot reproduce, a missing separator,
/// or an embedded salt that does not match `salt` (a token that belongs
/// to a different record, or tampering). Malformed tokens degrade to
/// invalid credentials at the call site; this function never panics.
pub fn decode_password(token: &str, salt: &str, key: &str) -> Option<String> {
    let bytes = STANDARD.decode(token).ok()?;
    let obfuscated = String::from_utf8(bytes).ok()?;

    let decoded: String = obfuscated
        .chars()
        .zip(key.chars().cycle())
        .map(|(c, k)| char::from_u32(c as u32 ^ k as u32))
        .collect::<Option<String>>()?;

    // Split on the first separator only; everything after it is the salt
    // that was embedded at encode time.
    let (plaintext, embedded_salt) = decoded.split_once(SALT_SEPARATOR)?;

    if embedded_salt != salt {
        return None;
    }

    Some(plaintext.to_string())
}

/// Check a login attempt against a stored token.
pub fn verify_password(plaintext: &str, token: &str, salt: &str, key: &str) -> bool {
    decode_password(token, salt, key).is_some_and(|decoded| decoded == plaintext)
}
