//! Canonical text for resolved signal values.
//!
//! Canonicalization turns a resolved value into text that is byte-stable
//! across runs, so that hashing it is reproducible.
//!
//! # Rules
//!
//! | Signal | Canonical form |
//! |--------|----------------|
//! | `audio` | the number, host-rendered |
//! | `canvas` | `winding(1/0)|geometry|text` |
//! | `webGlBasics` | indented JSON, declared field order |
//! | `webGlExtensions` | indented JSON, both lists sorted |
//! | `math` | indented JSON, source key order |
//!
//! A structured signal whose value is a bare number carries a status code
//! from the collector and has no canonical form.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `json` | Host-compatible JSON and number rendering |
//! | `payload` | Typed payload per signal |

// ============================================================================
// Submodules
// ============================================================================

/// Host-compatible JSON rendering.
pub mod json;

/// Typed signal payloads.
pub mod payload;

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Number, Value};
use tracing::trace;

use crate::error::Result;
use crate::identifiers::SignalName;

use payload::decode;

// ============================================================================
// Re-exports
// ============================================================================

pub use json::{HostFormatter, host_number, to_host_json};
pub use payload::{
    AudioPayload, CanvasPayload, MathPayload, WebGlBasicsPayload, WebGlExtensionsPayload,
};

// ============================================================================
// Canonical
// ============================================================================

/// Result of canonicalizing one signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Canonical {
    /// Canonical text, ready for hashing.
    Text(String),
    /// The collector reported a status code instead of the payload.
    Unavailable {
        /// The reported code.
        status: Number,
    },
}

impl Canonical {
    /// Returns the canonical text, if any.
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Unavailable { .. } => None,
        }
    }

    /// Returns `true` if the signal reported a status code.
    #[inline]
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

// ============================================================================
// Canonicalization
// ============================================================================

/// Canonicalizes a resolved value according to `signal`'s rules.
///
/// # Example
///
/// ```
/// use fingerprint_digest::{Canonical, SignalName, canonicalize};
/// use serde_json::json;
///
/// let value = json!({ "winding": true, "geometry": "g", "text": "t" });
/// let canonical = canonicalize(SignalName::Canvas, &value)?;
/// assert_eq!(canonical, Canonical::Text("1|g|t".into()));
///
/// let status = canonicalize(SignalName::WebGlBasics, &json!(-1))?;
/// assert!(status.is_unavailable());
/// # Ok::<(), fingerprint_digest::Error>(())
/// ```
///
/// # Errors
///
/// - [`Error::InvalidPayload`](crate::Error::InvalidPayload) if the value
///   does not have the signal's shape
/// - [`Error::Json`](crate::Error::Json) if serialization fails
pub fn canonicalize(signal: SignalName, value: &Value) -> Result<Canonical> {
    if signal.is_structured()
        && let Value::Number(status) = value
    {
        trace!(signal = %signal, %status, "Status code in place of payload");
        return Ok(Canonical::Unavailable {
            status: status.clone(),
        });
    }

    let text = match signal {
        SignalName::Audio => AudioPayload::from_value(value)?.canonical(),
        SignalName::Canvas => decode::<CanvasPayload>(signal, value)?.canonical(),
        SignalName::WebGlBasics => decode::<WebGlBasicsPayload>(signal, value)?.canonical()?,
        SignalName::WebGlExtensions => {
            decode::<WebGlExtensionsPayload>(signal, value)?.canonical()?
        }
        SignalName::Math => MathPayload::from_value(value)?.canonical()?,
    };

    trace!(signal = %signal, canonical = %text, "Canonicalized signal");
    Ok(Canonical::Text(text))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use serde_json::json;

    use crate::error::Error;

    fn text(signal: SignalName, value: &Value) -> String {
        canonicalize(signal, value)
            .expect("canonicalize")
            .text()
            .expect("canonical text")
            .to_string()
    }

    #[test]
    fn test_status_code_bypass() {
        let canonical = canonicalize(SignalName::WebGlBasics, &json!(0)).unwrap();
        assert_eq!(
            canonical,
            Canonical::Unavailable {
                status: Number::from(0)
            }
        );
        assert_eq!(canonical.text(), None);
    }

    #[test]
    fn test_status_code_for_extensions() {
        let canonical = canonicalize(SignalName::WebGlExtensions, &json!(-2)).unwrap();
        assert!(canonical.is_unavailable());
    }

    #[test]
    fn test_audio_number_is_payload_not_status() {
        assert_eq!(text(SignalName::Audio, &json!(0)), "0");
    }

    #[test]
    fn test_canvas_text() {
        let value = json!({ "winding": true, "geometry": "g", "text": "t" });
        assert_eq!(text(SignalName::Canvas, &value), "1|g|t");
    }

    #[test]
    fn test_extensions_order_insensitive() {
        let a = json!({ "contextAttributes": ["b", "a"], "shaderPrecisions": ["z", "y"] });
        let b = json!({ "contextAttributes": ["a", "b"], "shaderPrecisions": ["y", "z"] });
        assert_eq!(
            text(SignalName::WebGlExtensions, &a),
            text(SignalName::WebGlExtensions, &b)
        );
    }

    #[test]
    fn test_basics_not_sorted() {
        let value = json!({
            "version": "WebGL 2.0",
            "vendor": "Mozilla",
            "vendorUnmasked": "Intel",
            "renderer": "Mozilla",
            "rendererUnmasked": "Intel HD",
            "shadingLanguageVersion": "WebGL GLSL ES 3.00",
        });
        let canonical = text(SignalName::WebGlBasics, &value);
        assert!(canonical.find("version").unwrap() < canonical.find("renderer").unwrap());
    }

    #[test]
    fn test_math_unsafe_integer_matches_host() {
        let value: Value = serde_json::from_str(r#"{ "big": 9007199254740993 }"#).unwrap();
        assert_eq!(
            text(SignalName::Math, &value),
            "{\n  \"big\": 9007199254740992\n}"
        );
    }

    #[test]
    fn test_shape_mismatch_is_invalid_payload() {
        let err = canonicalize(SignalName::Canvas, &json!(["g", "t"])).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload { .. }));
    }

    proptest! {
        #[test]
        fn extensions_ignore_enumeration_order(
            (attrs, shuffled) in prop::collection::vec("[a-zA-Z0-9_=.,]{1,16}", 0..12)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let original = json!({ "contextAttributes": attrs, "shaderPrecisions": attrs });
            let reordered = json!({ "contextAttributes": shuffled, "shaderPrecisions": shuffled });
            prop_assert_eq!(
                text(SignalName::WebGlExtensions, &original),
                text(SignalName::WebGlExtensions, &reordered)
            );
        }

        #[test]
        fn math_is_deterministic(
            values in prop::collection::vec(any::<f64>().prop_filter("finite", |v| v.is_finite()), 1..8)
        ) {
            let mut fields = serde_json::Map::new();
            for (i, v) in values.iter().enumerate() {
                fields.insert(format!("f{i}"), json!(v));
            }
            let value = Value::Object(fields);
            prop_assert_eq!(text(SignalName::Math, &value), text(SignalName::Math, &value));
        }

        #[test]
        fn canvas_is_deterministic(winding in any::<bool>(), geometry in ".*", body in ".*") {
            let value = json!({ "winding": winding, "geometry": geometry, "text": body });
            prop_assert_eq!(text(SignalName::Canvas, &value), text(SignalName::Canvas, &value));
        }
    }
}
