//! Builder pattern for pipeline configuration.
//!
//! Provides a fluent API for configuring and creating [`Pipeline`] instances.
//!
//! # Example
//!
//! ```
//! use fingerprint_digest::{Pipeline, SignalName, StaticSource};
//! use serde_json::json;
//!
//! # fn example() -> fingerprint_digest::Result<()> {
//! let source = StaticSource::new().with(SignalName::Math, json!({ "acos": 1.4473588658278522 }));
//!
//! let pipeline = Pipeline::builder()
//!     .source(source)
//!     .signals([SignalName::Math])
//!     .on_signal(|event| println!("{}: {}", event.signal, event.outcome.digest_text()))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::identifiers::SignalName;
use crate::signal::SignalSource;

use super::core::{Pipeline, SignalHandler};
use super::event::SignalEvent;
use super::options::PipelineOptions;

// ============================================================================
// PipelineBuilder
// ============================================================================

/// Builder for configuring a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to create a new builder.
#[derive(Default)]
pub struct PipelineBuilder {
    /// Where raw values come from.
    source: Option<Arc<dyn SignalSource>>,
    /// Signal selection and timeout.
    options: PipelineOptions,
    /// Synchronous result callback.
    handler: Option<SignalHandler>,
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("source", &self.source.is_some())
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

// ============================================================================
// PipelineBuilder Implementation
// ============================================================================

impl PipelineBuilder {
    /// Creates a new builder selecting every signal.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the signal source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: impl SignalSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Sets a signal source that is shared with other owners.
    #[inline]
    #[must_use]
    pub fn shared_source(mut self, source: Arc<dyn SignalSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replaces all options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Restricts the run to `signals`.
    #[inline]
    #[must_use]
    pub fn signals(mut self, signals: impl IntoIterator<Item = SignalName>) -> Self {
        self.options = self.options.with_signals(signals);
        self
    }

    /// Bounds fetch plus resolution of each signal.
    #[inline]
    #[must_use]
    pub fn resolve_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_resolve_timeout(timeout);
        self
    }

    /// Sets the callback invoked for every emitted event.
    ///
    /// The callback runs on the pipeline's task and should not block.
    #[inline]
    #[must_use]
    pub fn on_signal<F>(mut self, handler: F) -> Self
    where
        F: Fn(&SignalEvent) + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Builds the pipeline with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no source is set
    /// - [`Error::Config`] if the options are invalid
    pub fn build(self) -> Result<Pipeline> {
        let source = self.source.ok_or_else(|| {
            Error::config(
                "Signal source is required. Use .source() to set it.\n\
                 Example: Pipeline::builder().source(StaticSource::new())",
            )
        })?;

        self.options.validate().map_err(Error::config)?;

        Ok(Pipeline::new(source, self.options, self.handler))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::signal::StaticSource;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = PipelineBuilder::new();
        assert!(builder.source.is_none());
        assert!(builder.handler.is_none());
        assert_eq!(builder.options, PipelineOptions::new());
    }

    #[test]
    fn test_build_fails_without_source() {
        let err = PipelineBuilder::new().build().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn test_build_fails_with_invalid_options() {
        let err = PipelineBuilder::new()
            .source(StaticSource::new())
            .signals([SignalName::Audio, SignalName::Audio])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_build_fails_with_zero_timeout() {
        let result = PipelineBuilder::new()
            .source(StaticSource::new())
            .resolve_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_succeeds() {
        let pipeline = PipelineBuilder::new()
            .source(StaticSource::new())
            .signals([SignalName::Canvas])
            .on_signal(|_| {})
            .build()
            .expect("build");
        assert_eq!(pipeline.options().signals, vec![SignalName::Canvas]);
    }

    #[test]
    fn test_shared_source() {
        let source: Arc<dyn SignalSource> = Arc::new(StaticSource::new());
        let builder = PipelineBuilder::new().shared_source(Arc::clone(&source));
        assert!(builder.source.is_some());
        assert_eq!(Arc::strong_count(&source), 2);
    }

    #[test]
    fn test_debug_hides_internals() {
        let builder = PipelineBuilder::new().on_signal(|_| {});
        let text = format!("{builder:?}");
        assert!(text.contains("handler: true"));
        assert!(text.contains("source: false"));
    }
}
