//! Content digests and digest-versioned resource identifiers.
//!
//! Hosts cache widget bodies by uri. Publishing a changed body under a new
//! uri is how a deployment forces a refresh, so the version suffix is
//! derived from the body itself:
//!
//!   ui://widget/solar.html  +  body  →  ui://widget/solar.html?v=3f1c0a9be24d

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in a versioned uri.
pub const VERSION_LEN: usize = 12;

/// Lowercase 64-character hex SHA-256 of `bytes`.
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// `base` with a `v=` query parameter derived from the digest of `bytes`.
///
/// An existing query string is extended with `&`.
pub fn versioned_uri(base: &str, bytes: &[u8]) -> String {
    let digest = content_digest(bytes);
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}v={}", &digest[..VERSION_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(content_digest(b"abc").len(), 64);
    }

    #[test]
    fn versioned_uri_changes_with_body() {
        let a = versioned_uri("ui://w/1", b"<div>one</div>");
        let b = versioned_uri("ui://w/1", b"<div>two</div>");
        assert_ne!(a, b);
        assert!(a.starts_with("ui://w/1?v="));
        assert_eq!(a.len(), "ui://w/1?v=".len() + VERSION_LEN);
        assert_eq!(a, versioned_uri("ui://w/1", b"<div>one</div>"));
    }

    #[test]
    fn versioned_uri_extends_existing_query() {
        let uri = versioned_uri("ui://w/1?theme=dark", b"x");
        assert!(uri.starts_with("ui://w/1?theme=dark&v="));
    }
}
