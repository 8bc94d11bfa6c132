//! Typed payloads for structured signals.
//!
//! Each payload knows its own canonical form. Field order of the
//! serialized payloads is their declaration order, which is the order the
//! collector declares them in.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::identifiers::SignalName;

use super::json::{host_number, to_host_json};

// ============================================================================
// Constants
// ============================================================================

/// Delimiter between canvas fields.
pub const CANVAS_DELIMITER: &str = "|";

// ============================================================================
// Audio
// ============================================================================

/// Audio fingerprint: a single number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioPayload(pub f64);

impl AudioPayload {
    /// Extracts the audio number from a resolved value.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPayload`] if `value` is not a number
    pub fn from_value(value: &Value) -> Result<Self> {
        value
            .as_f64()
            .map(Self)
            .ok_or_else(|| Error::invalid_payload(SignalName::Audio, "expected a number"))
    }

    /// The number as the host renders it.
    #[must_use]
    pub fn canonical(&self) -> String {
        host_number(self.0)
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// Canvas fingerprint.
///
/// `geometry` and `text` are the collector's data URLs of the rendered
/// images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasPayload {
    /// Whether the canvas supports the even-odd winding rule.
    pub winding: bool,
    /// Geometry rendering.
    pub geometry: String,
    /// Text rendering.
    pub text: String,
}

impl CanvasPayload {
    /// `winding` as `1`/`0`, then geometry and text, joined by `|`.
    #[must_use]
    pub fn canonical(&self) -> String {
        let winding = if self.winding { "1" } else { "0" };
        [winding, self.geometry.as_str(), self.text.as_str()].join(CANVAS_DELIMITER)
    }
}

// ============================================================================
// WebGL Basics
// ============================================================================

/// WebGL context identification strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebGlBasicsPayload {
    /// `VERSION` string.
    pub version: String,
    /// `VENDOR` string as reported to pages.
    pub vendor: String,
    /// Unmasked vendor from `WEBGL_debug_renderer_info`.
    pub vendor_unmasked: String,
    /// `RENDERER` string as reported to pages.
    pub renderer: String,
    /// Unmasked renderer from `WEBGL_debug_renderer_info`.
    pub renderer_unmasked: String,
    /// `SHADING_LANGUAGE_VERSION` string.
    pub shading_language_version: String,
}

impl WebGlBasicsPayload {
    /// Indented JSON in declaration order. Nothing is sorted.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if serialization fails
    pub fn canonical(&self) -> Result<String> {
        to_host_json(self)
    }
}

// ============================================================================
// WebGL Extensions
// ============================================================================

/// WebGL context attributes and shader precisions.
///
/// The collector also reports extension lists and parameters; they are not
/// part of the canonical form and are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebGlExtensionsPayload {
    /// Context attributes as `name=value` entries.
    pub context_attributes: Vec<String>,
    /// Shader precision formats as `SHADER.PRECISION=min,max,precision` entries.
    pub shader_precisions: Vec<String>,
}

impl WebGlExtensionsPayload {
    /// Returns a copy with both lists sorted ascending.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut sorted = self.clone();
        sort_host_order(&mut sorted.context_attributes);
        sort_host_order(&mut sorted.shader_precisions);
        sorted
    }

    /// Indented JSON of the sorted payload.
    ///
    /// Enumeration order of the source never affects the result.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if serialization fails
    pub fn canonical(&self) -> Result<String> {
        to_host_json(&self.sorted())
    }
}

/// Sorts strings by UTF-16 code units, the host's default string order.
fn sort_host_order(items: &mut [String]) {
    items.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
}

// ============================================================================
// Math
// ============================================================================

/// Results of the collector's math functions, keyed by function name.
///
/// Keys keep the order the source supplied them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MathPayload(pub Map<String, Value>);

impl MathPayload {
    /// Extracts math results from a resolved value.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPayload`] if `value` is not an object of numbers
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(Error::invalid_payload(
                SignalName::Math,
                "expected an object of numbers",
            ));
        };

        if let Some((key, _)) = fields.iter().find(|(_, v)| !v.is_number()) {
            return Err(Error::invalid_payload(
                SignalName::Math,
                format!("field `{key}` is not a number"),
            ));
        }

        Ok(Self(fields.clone()))
    }

    /// Indented JSON in source order.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if serialization fails
    pub fn canonical(&self) -> Result<String> {
        to_host_json(self)
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a structured payload, reporting shape errors against `signal`.
pub(crate) fn decode<'de, T>(signal: SignalName, value: &'de Value) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(value).map_err(|e| Error::invalid_payload(signal, e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
