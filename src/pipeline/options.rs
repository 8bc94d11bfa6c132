//! Pipeline options.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use fingerprint_digest::{PipelineOptions, SignalName};
//!
//! let options = PipelineOptions::new()
//!     .without_signal(SignalName::Audio)
//!     .with_resolve_timeout(Duration::from_secs(5));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::identifiers::SignalName;

// ============================================================================
// PipelineOptions
// ============================================================================

/// Which signals a run processes and how long it waits for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Signals to process, in the order their pipelines are started.
    pub signals: Vec<SignalName>,

    /// Upper bound for fetching and resolving one signal.
    ///
    /// `None` waits indefinitely; a hung signal then stalls only itself.
    pub resolve_timeout: Option<Duration>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl PipelineOptions {
    /// Creates options covering every signal with no timeout.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            signals: SignalName::ALL.to_vec(),
            resolve_timeout: None,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl PipelineOptions {
    /// Replaces the signal set.
    #[inline]
    #[must_use]
    pub fn with_signals(mut self, signals: impl IntoIterator<Item = SignalName>) -> Self {
        self.signals = signals.into_iter().collect();
        self
    }

    /// Removes a signal from the set.
    #[inline]
    #[must_use]
    pub fn without_signal(mut self, signal: SignalName) -> Self {
        self.signals.retain(|s| *s != signal);
        self
    }

    /// Bounds fetch plus resolution of each signal.
    #[inline]
    #[must_use]
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = Some(timeout);
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl PipelineOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error message if the signal set is empty or repeats a
    /// signal, or if the timeout is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.signals.is_empty() {
            return Err("At least one signal must be selected".to_string());
        }

        for (i, signal) in self.signals.iter().enumerate() {
            if self.signals[..i].contains(signal) {
                return Err(format!("Signal {signal} is selected more than once"));
            }
        }

        if self.resolve_timeout == Some(Duration::ZERO) {
            return Err("Resolve timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_covers_all_signals() {
        let options = PipelineOptions::new();
        assert_eq!(options.signals, SignalName::ALL.to_vec());
        assert!(options.resolve_timeout.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_without_signal() {
        let options = PipelineOptions::new().without_signal(SignalName::Audio);
        assert!(!options.signals.contains(&SignalName::Audio));
        assert_eq!(options.signals.len(), 4);
    }

    #[test]
    fn test_with_signals() {
        let options = PipelineOptions::new().with_signals([SignalName::Math]);
        assert_eq!(options.signals, vec![SignalName::Math]);
    }

    #[test]
    fn test_validate_empty() {
        let options = PipelineOptions::new().with_signals(Vec::new());
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate() {
        let options =
            PipelineOptions::new().with_signals([SignalName::Canvas, SignalName::Canvas]);
        let err = options.validate().unwrap_err();
        assert!(err.contains("canvas"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let options = PipelineOptions::new().with_resolve_timeout(Duration::ZERO);
        assert!(options.validate().is_err());
    }
}
