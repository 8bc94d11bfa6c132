//! SHA-256 content digests of canonical text.
//!
//! A digest is a content fingerprint, not a MAC: no salt, no key, no
//! truncation. The same canonical text always yields the same 64
//! lowercase hex characters.

// ============================================================================
// Imports
// ============================================================================

use sha2::{Digest, Sha256};

// ============================================================================
// Constants
// ============================================================================

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

// ============================================================================
// Functions
// ============================================================================

/// Computes the SHA-256 of `text`'s UTF-8 bytes as lowercase hex.
///
/// # Example
///
/// ```
/// use fingerprint_digest::digest;
///
/// let hex = digest("a|b|c");
/// assert_eq!(hex.len(), 64);
/// ```
#[must_use]
pub fn digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns `true` if `candidate` has the shape of a digest produced by
/// [`digest`].
#[must_use]
pub fn is_digest(candidate: &str) -> bool {
    candidate.len() == DIGEST_HEX_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_pipe_joined() {
        assert_eq!(
            digest("a|b|c"),
            "a52dd81bfd5e4e66d96b9f598382f6cbf8c5c3897654e6ae9055e03620fcf38e"
        );
    }

    #[test]
    fn test_golden_canvas_form() {
        assert_eq!(
            digest("1|g|t"),
            "aaa4d684b16e52f7885de8a45d406dcac603cf47ad414625130b550792179b64"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_repeated_calls_agree() {
        let text = "{\n  \"acos\": 1.4473588658278522\n}";
        assert_eq!(digest(text), digest(text));
    }

    #[test]
    fn test_output_shape() {
        let hex = digest("Sphinx of black quartz, judge my vow");
        assert!(is_digest(&hex));
        assert!(!is_digest("N/A"));
        assert!(!is_digest(&hex.to_uppercase()));
    }
}
