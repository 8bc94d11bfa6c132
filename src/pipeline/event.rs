//! Events emitted to the presentation layer.
//!
//! Every signal pipeline ends in exactly one [`SignalEvent`]. Subscribers
//! receive events in completion order, which is not the order signals
//! were started in.
//!
//! # Outcomes
//!
//! | Outcome | Canonical | Digest |
//! |---------|-----------|--------|
//! | [`SignalOutcome::Ready`] | text | 64 hex chars |
//! | [`SignalOutcome::Unavailable`] | `N/A` | `N/A` |
//! | [`SignalOutcome::Failed`] | `N/A` | `N/A` |

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::{Number, Value};

use crate::canonical::{host_number, to_host_json};
use crate::identifiers::{RunId, SignalName};

// ============================================================================
// Constants
// ============================================================================

/// Placeholder shown where no canonical text or digest exists.
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// SignalReport
// ============================================================================

/// A successfully processed signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalReport {
    /// The resolved value as supplied.
    pub raw: Value,
    /// Canonical text that was hashed.
    pub canonical: String,
    /// SHA-256 of `canonical`, lowercase hex.
    pub digest: String,
}

// ============================================================================
// SignalOutcome
// ============================================================================

/// How one signal pipeline ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SignalOutcome {
    /// Canonicalized and hashed.
    Ready(SignalReport),

    /// The collector reported a status code; nothing was hashed.
    Unavailable {
        /// The resolved value as supplied.
        raw: Value,
        /// The reported code.
        status: Number,
    },

    /// Fetching, resolving or canonicalizing failed.
    Failed {
        /// Error description.
        message: String,
    },
}

impl SignalOutcome {
    /// Canonical text, or `N/A`.
    #[inline]
    #[must_use]
    pub fn canonical_text(&self) -> &str {
        match self {
            Self::Ready(report) => &report.canonical,
            _ => NOT_AVAILABLE,
        }
    }

    /// Digest, or `N/A`.
    #[inline]
    #[must_use]
    pub fn digest_text(&self) -> &str {
        match self {
            Self::Ready(report) => &report.digest,
            _ => NOT_AVAILABLE,
        }
    }

    /// Returns `true` for [`SignalOutcome::Ready`].
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns `true` for [`SignalOutcome::Unavailable`].
    #[inline]
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns `true` for [`SignalOutcome::Failed`].
    #[inline]
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Human-readable rendering of the raw value.
    #[must_use]
    pub fn value_text(&self) -> String {
        match self {
            Self::Ready(report) => display_value(&report.raw),
            Self::Unavailable { status, .. } => format!("Status code: {status}"),
            Self::Failed { message } => format!("Error: {message}"),
        }
    }
}

/// Renders a raw value for display.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number
            .as_f64()
            .map(host_number)
            .unwrap_or_else(|| number.to_string()),
        other => to_host_json(other).unwrap_or_else(|_| other.to_string()),
    }
}

// ============================================================================
// SignalEvent
// ============================================================================

/// Result of one signal pipeline, delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEvent {
    /// The run this event belongs to.
    pub run_id: RunId,
    /// The signal.
    pub signal: SignalName,
    /// How its pipeline ended.
    #[serde(flatten)]
    pub outcome: SignalOutcome,
}

impl SignalEvent {
    /// Flattens the event into display strings keyed by slot.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        Presentation {
            value_slot: self.signal.value_slot(),
            canonical_slot: self.signal.canonical_slot(),
            digest_slot: self.signal.digest_slot(),
            value: self.outcome.value_text(),
            canonical: self.outcome.canonical_text().to_string(),
            digest: self.outcome.digest_text().to_string(),
        }
    }
}

// ============================================================================
// Presentation
// ============================================================================

/// Display strings for one signal, keyed by stable slot identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Slot id for the raw value, e.g. `math-value`.
    pub value_slot: String,
    /// Slot id for the canonical form, e.g. `math-json`.
    pub canonical_slot: String,
    /// Slot id for the digest, e.g. `math-hash`.
    pub digest_slot: String,
    /// Raw value text.
    pub value: String,
    /// Canonical text, or `N/A`.
    pub canonical: String,
    /// Digest hex, or `N/A`.
    pub digest: String,
}

// ============================================================================
// RunReport
// ============================================================================

/// Every event of one run, in completion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// The run.
    pub run_id: RunId,
    /// One event per selected signal.
    pub events: Vec<SignalEvent>,
}

impl RunReport {
    /// Returns the event for `signal`, if it was selected.
    #[must_use]
    pub fn get(&self, signal: SignalName) -> Option<&SignalEvent> {
        self.events.iter().find(|event| event.signal == signal)
    }

    /// Number of signals that produced a digest.
    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.count(SignalOutcome::is_ready)
    }

    /// Number of signals that reported a status code.
    #[must_use]
    pub fn unavailable_count(&self) -> usize {
        self.count(SignalOutcome::is_unavailable)
    }

    /// Number of signals whose pipeline failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(SignalOutcome::is_failed)
    }

    /// Returns `true` if no pipeline failed.
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }

    fn count(&self, predicate: impl Fn(&SignalOutcome) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(&e.outcome)).count()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn event(signal: SignalName, outcome: SignalOutcome) -> SignalEvent {
        SignalEvent {
            run_id: RunId::generate(),
            signal,
            outcome,
        }
    }

    #[test]
    fn test_ready_presentation() {
        let outcome = SignalOutcome::Ready(SignalReport {
            raw: json!(124.04347527516074),
            canonical: "124.04347527516074".into(),
            digest: "ab".repeat(32),
        });
        let presentation = event(SignalName::Audio, outcome).presentation();

        assert_eq!(presentation.value_slot, "audio-value");
        assert_eq!(presentation.value, "124.04347527516074");
        assert_eq!(presentation.digest, "ab".repeat(32));
    }

    #[test]
    fn test_unavailable_presentation() {
        let outcome = SignalOutcome::Unavailable {
            raw: json!(0),
            status: Number::from(0),
        };
        let presentation = event(SignalName::WebGlBasics, outcome).presentation();

        assert_eq!(presentation.value, "Status code: 0");
        assert_eq!(presentation.canonical, NOT_AVAILABLE);
        assert_eq!(presentation.digest, "N/A");
        assert_eq!(presentation.digest_slot, "webgl-basics-hash");
    }

    #[test]
    fn test_failed_presentation() {
        let outcome = SignalOutcome::Failed {
            message: "Signal audio failed to resolve: blocked".into(),
        };
        let presentation = event(SignalName::Audio, outcome).presentation();

        assert!(presentation.value.starts_with("Error: "));
        assert_eq!(presentation.canonical, NOT_AVAILABLE);
        assert_eq!(presentation.digest, NOT_AVAILABLE);
    }

    #[test]
    fn test_structured_value_text_is_indented_json() {
        let outcome = SignalOutcome::Ready(SignalReport {
            raw: json!({ "acos": 1.0 }),
            canonical: String::new(),
            digest: String::new(),
        });
        assert_eq!(outcome.value_text(), "{\n  \"acos\": 1\n}");
    }

    #[test]
    fn test_event_serializes_flat() {
        let ev = event(
            SignalName::Math,
            SignalOutcome::Failed {
                message: "boom".into(),
            },
        );
        let json = serde_json::to_value(&ev).expect("serialize");

        assert_eq!(json["signal"], "math");
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["message"], "boom");
        assert!(json["runId"].is_string());
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport {
            run_id: RunId::generate(),
            events: vec![
                event(
                    SignalName::WebGlBasics,
                    SignalOutcome::Unavailable {
                        raw: json!(-1),
                        status: Number::from(-1),
                    },
                ),
                event(
                    SignalName::Audio,
                    SignalOutcome::Failed {
                        message: "x".into(),
                    },
                ),
            ],
        };

        assert_eq!(report.ready_count(), 0);
        assert_eq!(report.unavailable_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_clean());
        assert!(report.get(SignalName::Audio).is_some());
        assert!(report.get(SignalName::Canvas).is_none());
    }
}
