//! Signal sources.
//!
//! The collector itself is a black box. [`SignalSource`] is the seam the
//! pipeline talks to; [`StaticSource`] is an in-memory implementation
//! that can be filled by hand or loaded from the collector's components
//! document:
//!
//! ```json
//! {
//!   "audio": { "value": 124.04347527516074, "duration": 5 },
//!   "webGlBasics": { "value": -1, "duration": 1 },
//!   "fonts": { "value": ["Arial"], "duration": 40 }
//! }
//! ```
//!
//! Components this crate does not canonicalize (`fonts` above) are skipped.
//! A component carrying `"error"` instead of `"value"` fails on fetch.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::identifiers::SignalName;

use super::value::RawValue;

// ============================================================================
// SignalSource
// ============================================================================

/// Supplies raw signal values.
///
/// Each value is handed out once; a second fetch of the same signal may
/// fail with [`Error::SignalNotFound`].
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Fetches the raw value of `signal`.
    ///
    /// # Errors
    ///
    /// - [`Error::SignalNotFound`] if the source has no value for `signal`
    /// - [`Error::SignalResolution`] if the source itself failed to collect it
    async fn fetch(&self, signal: SignalName) -> Result<RawValue>;
}

// ============================================================================
// StaticSource
// ============================================================================

/// A stored component: either a value or the collector's error text.
#[derive(Debug)]
enum Entry {
    Value(RawValue),
    Failed(String),
}

/// In-memory [`SignalSource`].
///
/// # Example
///
/// ```
/// use fingerprint_digest::{RawValue, SignalName, StaticSource};
/// use serde_json::json;
///
/// let source = StaticSource::new()
///     .with(SignalName::Audio, RawValue::resolved(124.04))
///     .with(SignalName::WebGlBasics, json!(-1));
/// assert_eq!(source.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct StaticSource {
    entries: Mutex<FxHashMap<SignalName, Entry>>,
}

impl StaticSource {
    /// Creates an empty source.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, replacing any previous one for the same signal.
    #[must_use]
    pub fn with(self, signal: SignalName, value: impl Into<RawValue>) -> Self {
        self.insert(signal, value);
        self
    }

    /// Adds a collection failure for `signal`.
    #[must_use]
    pub fn with_failure(self, signal: SignalName, message: impl Into<String>) -> Self {
        self.entries
            .lock()
            .insert(signal, Entry::Failed(message.into()));
        self
    }

    /// Inserts a value, replacing any previous one for the same signal.
    pub fn insert(&self, signal: SignalName, value: impl Into<RawValue>) {
        self.entries.lock().insert(signal, Entry::Value(value.into()));
    }

    /// Returns the number of signals not yet fetched.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if every signal has been fetched.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Parses a collector components document.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if `json` is not valid JSON
    /// - [`Error::Config`] if the document is not an object of components
    pub fn from_components_json(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_components(document)
    }

    /// Builds a source from an already parsed components document.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the document is not an object of components,
    ///   or a known component has neither `value` nor `error`
    pub fn from_components(document: Value) -> Result<Self> {
        let Value::Object(components) = document else {
            return Err(Error::config("Components document must be a JSON object"));
        };

        let source = Self::new();
        for (key, component) in components {
            let Ok(signal) = key.parse::<SignalName>() else {
                trace!(component = %key, "Skipping component without canonical form");
                continue;
            };

            let entry = match component {
                Value::Object(mut fields) => {
                    if let Some(value) = fields.remove("value") {
                        Entry::Value(RawValue::Resolved(value))
                    } else if let Some(error) = fields.remove("error") {
                        Entry::Failed(error_text(error))
                    } else {
                        return Err(Error::config(format!(
                            "Component {key} has neither `value` nor `error`"
                        )));
                    }
                }
                _ => {
                    return Err(Error::config(format!("Component {key} must be an object")));
                }
            };

            source.entries.lock().insert(signal, entry);
        }

        debug!(signals = source.len(), "Loaded components document");
        Ok(source)
    }
}

/// Renders a component's `error` field as text.
fn error_text(error: Value) -> String {
    match error {
        Value::String(message) => message,
        Value::Object(ref fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

#[async_trait]
impl SignalSource for StaticSource {
    async fn fetch(&self, signal: SignalName) -> Result<RawValue> {
        let entry = self.entries.lock().remove(&signal);

        match entry {
            Some(Entry::Value(value)) => Ok(value),
            Some(Entry::Failed(message)) => Err(Error::signal_resolution(signal, message)),
            None => Err(Error::signal_not_found(signal)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    const COMPONENTS: &str = r#"{
        "audio": { "value": 124.04347527516074, "duration": 5 },
        "canvas": {
            "value": { "winding": true, "geometry": "data:image/png;base64,AAA", "text": "data:image/png;base64,BBB" },
            "duration": 12
        },
        "webGlBasics": { "value": -1, "duration": 1 },
        "math": { "error": { "name": "Error", "message": "Math is frozen" }, "duration": 0 },
        "fonts": { "value": ["Arial", "Courier"], "duration": 40 }
    }"#;

    #[tokio::test]
    async fn test_fetch_consumes_value() {
        let source = StaticSource::new().with(SignalName::Audio, json!(35.7));

        let value = source.fetch(SignalName::Audio).await.expect("fetch");
        assert!(matches!(value, RawValue::Resolved(v) if v == json!(35.7)));

        let err = source.fetch(SignalName::Audio).await.unwrap_err();
        assert!(matches!(err, Error::SignalNotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_signal() {
        let source = StaticSource::new();
        let err = source.fetch(SignalName::Canvas).await.unwrap_err();
        assert_eq!(err.signal(), Some(SignalName::Canvas));
    }

    #[test]
    fn test_components_skip_unknown() {
        let source = StaticSource::from_components_json(COMPONENTS).expect("parse");
        assert_eq!(source.len(), 4);
    }

    #[tokio::test]
    async fn test_components_error_entry() {
        let source = StaticSource::from_components_json(COMPONENTS).expect("parse");
        let err = source.fetch(SignalName::Math).await.unwrap_err();

        assert!(matches!(err, Error::SignalResolution { .. }));
        assert!(err.to_string().contains("Math is frozen"));
    }

    #[tokio::test]
    async fn test_components_status_code_kept_raw() {
        let source = StaticSource::from_components_json(COMPONENTS).expect("parse");
        let value = source.fetch(SignalName::WebGlBasics).await.expect("fetch");
        assert!(matches!(value, RawValue::Resolved(v) if v == json!(-1)));
    }

    #[test]
    fn test_components_must_be_object() {
        let err = StaticSource::from_components_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_component_without_value_or_error() {
        let err = StaticSource::from_components_json(r#"{ "audio": { "duration": 3 } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("audio"));
    }

    #[test]
    fn test_invalid_json() {
        let err = StaticSource::from_components_json("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_with_failure() {
        let source = StaticSource::new().with_failure(SignalName::Audio, "blocked");
        let err = source.fetch(SignalName::Audio).await.unwrap_err();
        assert!(err.to_string().contains("blocked"));
    }
}
