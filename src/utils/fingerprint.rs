//! URL normalization and reverse-lookup fingerprints.

use sha2::{Digest, Sha256};

/// Prefix shared by every reverse-mapping key.
pub const REVERSE_KEY_PREFIX: &str = "url:";

/// Normalizes a submitted URL.
///
/// Only leading and trailing whitespace is stripped. Case, scheme and
/// trailing slashes are left untouched, so `HTTP://x.com` and `http://x.com`
/// are different URLs.
pub fn normalize(url: &str) -> &str {
    url.trim()
}

/// SHA-256 of the UTF-8 bytes of `normalized`, as 64 lowercase hex digits.
pub fn fingerprint(normalized: &str) -> String {
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

/// Store key of the reverse mapping for an already normalized URL.
pub fn reverse_key(normalized: &str) -> String {
    format!("{}{}", REVERSE_KEY_PREFIX, fingerprint(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize("  http://x.com \n\t"), "http://x.com");
    }

    #[test]
    fn test_normalize_keeps_case() {
        assert_eq!(normalize("HTTP://X.com/Path"), "HTTP://X.com/Path");
    }

    #[test]
    fn test_fingerprint_known_digest() {
        assert_eq!(
            fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_is_fixed_length_hex() {
        let digest = fingerprint("https://example.com/some/long/path?q=1");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_reverse_key_layout() {
        let key = reverse_key("abc");
        assert!(key.starts_with("url:"));
        assert_eq!(key.len(), REVERSE_KEY_PREFIX.len() + 64);
    }

    #[test]
    fn test_distinct_urls_distinct_keys() {
        assert_ne!(reverse_key("http://x.com"), reverse_key("http://x.com/"));
    }
}
