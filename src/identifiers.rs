//! Type-safe identifiers for signals and pipeline runs.
//!
//! - [`SignalName`] is a closed set: the collector exposes exactly five
//!   signals this crate knows how to canonicalize.
//! - [`RunId`] tags every event emitted by one pipeline run so that
//!   results from different page loads never get mixed up in logs.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

// ============================================================================
// SignalName
// ============================================================================

/// A named fingerprint signal.
///
/// The serialized form is the collector's component key
/// (`audio`, `canvas`, `webGlBasics`, `webGlExtensions`, `math`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalName {
    /// Audio stack fingerprint (a single number, possibly deferred).
    Audio,
    /// Canvas winding flag plus geometry and text renderings.
    Canvas,
    /// WebGL version, vendor and renderer strings.
    WebGlBasics,
    /// WebGL context attributes and shader precisions.
    WebGlExtensions,
    /// Results of a fixed set of math functions.
    Math,
}

impl SignalName {
    /// Every signal, in presentation order.
    pub const ALL: [SignalName; 5] = [
        Self::Audio,
        Self::Canvas,
        Self::WebGlBasics,
        Self::WebGlExtensions,
        Self::Math,
    ];

    /// Returns the collector's component key.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Canvas => "canvas",
            Self::WebGlBasics => "webGlBasics",
            Self::WebGlExtensions => "webGlExtensions",
            Self::Math => "math",
        }
    }

    /// Returns `true` if the expected payload is a structure.
    ///
    /// A bare number in place of a structured payload is a status code.
    #[inline]
    #[must_use]
    pub const fn is_structured(self) -> bool {
        !matches!(self, Self::Audio)
    }

    /// Stable prefix for presentation slot identifiers.
    #[inline]
    #[must_use]
    pub const fn slot_prefix(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Canvas => "canvas",
            Self::WebGlBasics => "webgl-basics",
            Self::WebGlExtensions => "webgl-extensions",
            Self::Math => "math",
        }
    }

    /// Presentation slot for the raw value.
    #[must_use]
    pub fn value_slot(self) -> String {
        format!("{}-value", self.slot_prefix())
    }

    /// Presentation slot for the canonical text.
    #[must_use]
    pub fn canonical_slot(self) -> String {
        format!("{}-json", self.slot_prefix())
    }

    /// Presentation slot for the digest.
    #[must_use]
    pub fn digest_slot(self) -> String {
        format!("{}-hash", self.slot_prefix())
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::config(format!("Unknown signal name: {s}")))
    }
}

// ============================================================================
// RunId
// ============================================================================

/// Identifier of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a fresh random run ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
