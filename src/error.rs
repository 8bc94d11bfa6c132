//! Error types for fingerprint digests.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use fingerprint_digest::{Result, SignalName, canonicalize};
//!
//! fn example(value: &serde_json::Value) -> Result<()> {
//!     let canonical = canonicalize(SignalName::Canvas, value)?;
//!     println!("{canonical:?}");
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Signal | [`Error::SignalNotFound`], [`Error::SignalResolution`], [`Error::ResolutionTimeout`], [`Error::InvalidPayload`] |
//! | External | [`Error::Json`] |
//!
//! A signal that reports a status code instead of its payload is not an
//! error; it surfaces as [`SignalOutcome::Unavailable`](crate::SignalOutcome::Unavailable).

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;
use std::time::Duration;

use thiserror::Error;

use crate::identifiers::SignalName;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Signal-scoped variants carry the [`SignalName`] they belong to so a
/// failure can be reported against the right presentation slot.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when pipeline configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Signal Errors
    // ========================================================================
    /// The source has no value for the requested signal.
    #[error("Signal not found: {signal}")]
    SignalNotFound {
        /// The missing signal.
        signal: SignalName,
    },

    /// A deferred signal value failed to resolve.
    #[error("Signal {signal} failed to resolve: {message}")]
    SignalResolution {
        /// The failing signal.
        signal: SignalName,
        /// Failure reported by the source.
        message: String,
    },

    /// Fetching or resolving a signal exceeded the configured timeout.
    #[error("Signal {signal} did not resolve within {timeout_ms}ms")]
    ResolutionTimeout {
        /// The stalled signal.
        signal: SignalName,
        /// Milliseconds waited before giving up.
        timeout_ms: u64,
    },

    /// The resolved value does not match the signal's payload shape.
    #[error("Invalid {signal} payload: {message}")]
    InvalidPayload {
        /// The signal whose payload was rejected.
        signal: SignalName,
        /// What was wrong with the payload.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a signal not found error.
    #[inline]
    pub fn signal_not_found(signal: SignalName) -> Self {
        Self::SignalNotFound { signal }
    }

    /// Creates a signal resolution error.
    #[inline]
    pub fn signal_resolution(signal: SignalName, message: impl Into<String>) -> Self {
        Self::SignalResolution {
            signal,
            message: message.into(),
        }
    }

    /// Creates a resolution timeout error.
    #[inline]
    pub fn resolution_timeout(signal: SignalName, timeout: Duration) -> Self {
        Self::ResolutionTimeout {
            signal,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Creates an invalid payload error.
    #[inline]
    pub fn invalid_payload(signal: SignalName, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            signal,
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ResolutionTimeout { .. })
    }

    /// Returns `true` if this error is scoped to a single signal.
    ///
    /// Signal errors never abort sibling pipelines.
    #[inline]
    #[must_use]
    pub fn is_signal_error(&self) -> bool {
        self.signal().is_some()
    }

    /// Returns the signal this error belongs to, if any.
    #[must_use]
    pub fn signal(&self) -> Option<SignalName> {
        match self {
            Self::SignalNotFound { signal }
            | Self::SignalResolution { signal, .. }
            | Self::ResolutionTimeout { signal, .. }
            | Self::InvalidPayload { signal, .. } => Some(*signal),
            Self::Config { .. } | Self::Json(_) => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::signal_resolution(SignalName::Audio, "context suspended");
        assert_eq!(
            err.to_string(),
            "Signal audio failed to resolve: context suspended"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("source is required");
        assert_eq!(err.to_string(), "Configuration error: source is required");
    }

    #[test]
    fn test_invalid_payload_display() {
        let err = Error::invalid_payload(SignalName::WebGlBasics, "missing field `vendor`");
        assert_eq!(
            err.to_string(),
            "Invalid webGlBasics payload: missing field `vendor`"
        );
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::resolution_timeout(SignalName::Audio, Duration::from_secs(2));
        let other_err = Error::signal_not_found(SignalName::Audio);

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
        assert_eq!(timeout_err.to_string(), "Signal audio did not resolve within 2000ms");
    }

    #[test]
    fn test_signal_scope() {
        let resolution = Error::signal_resolution(SignalName::Math, "boom");
        let config = Error::config("test");

        assert!(resolution.is_signal_error());
        assert_eq!(resolution.signal(), Some(SignalName::Math));
        assert!(!config.is_signal_error());
        assert_eq!(config.signal(), None);
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(!err.is_signal_error());
    }
}
