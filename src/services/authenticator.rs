//! Credential verification for the control routes.
//!
//! Configured credentials are kept only as SHA-256 digests. Provided
//! credentials are hashed the same way and compared in constant time, so
//! the comparison does not depend on where the first mismatching byte is.

use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Username/secret pair sent by a client.
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Verifies Basic credentials against the configured pair.
#[derive(Clone)]
pub struct Authenticator {
    username_hash: [u8; 32],
    password_hash: [u8; 32],
}

impl Authenticator {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_hash: digest(username),
            password_hash: digest(password),
        }
    }

    /// Both fields must match exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = digest(username)[..].ct_eq(&self.username_hash[..]);
        let pass_ok = digest(password)[..].ct_eq(&self.password_hash[..]);
        (user_ok & pass_ok).into()
    }

    /// Verify a raw `Authorization` header value. Missing or malformed
    /// headers fail verification.
    pub fn verify_header(&self, header: Option<&str>) -> bool {
        header
            .and_then(parse_basic_auth)
            .is_some_and(|creds| self.verify(&creds.username, &creds.password))
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Parse `Authorization: Basic <base64(username:password)>`.
///
/// Returns `None` for any other scheme, invalid base64, non UTF-8 content,
/// or a payload without a `:` separator.
pub fn parse_basic_auth(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    // The password may itself contain ':'
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(user_pass))
    }

    #[test]
    fn test_verify_requires_both_fields() {
        let auth = Authenticator::new("admin", "password");

        assert!(auth.verify("admin", "password"));
        assert!(!auth.verify("admin", "wrong"));
        assert!(!auth.verify("root", "password"));
        assert!(!auth.verify("", ""));
        assert!(!auth.verify("Admin", "password"));
    }

    #[test]
    fn test_parse_basic_header() {
        let creds = parse_basic_auth(&basic("admin:pa:ss")).unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "pa:ss");

        let creds = parse_basic_auth(&format!("basic {}", STANDARD.encode("a:b"))).unwrap();
        assert_eq!(creds.username, "a");
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        assert!(parse_basic_auth("Bearer abc123").is_none());
        assert!(parse_basic_auth("Basic").is_none());
        assert!(parse_basic_auth("Basic !!!not-base64!!!").is_none());
        assert!(parse_basic_auth(&basic("no-separator")).is_none());
        assert!(parse_basic_auth(&format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':']))).is_none());
    }

    #[test]
    fn test_verify_header_fails_closed() {
        let auth = Authenticator::new("admin", "password");

        assert!(auth.verify_header(Some(&basic("admin:password"))));
        assert!(!auth.verify_header(Some(&basic("admin:nope"))));
        assert!(!auth.verify_header(Some("garbage")));
        assert!(!auth.verify_header(None));
    }
}
