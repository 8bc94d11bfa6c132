//! Core pipeline implementation.
//!
//! A [`Pipeline`] runs one independent sub-pipeline per selected signal:
//!
//! ```text
//! fetch ─▶ resolve ─▶ canonicalize ─▶ digest ─▶ emit
//!                          │
//!                          └─ status code ─▶ emit Unavailable (no hashing)
//! ```
//!
//! All sub-pipelines are polled concurrently on the caller's task; none
//! is spawned. A failure ends only its own sub-pipeline.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use futures_util::future::join_all;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::canonical::{Canonical, canonicalize};
use crate::digest::digest;
use crate::error::{Error, Result};
use crate::identifiers::{RunId, SignalName};
use crate::signal::{SignalSource, resolve};

use super::builder::PipelineBuilder;
use super::event::{RunReport, SignalEvent, SignalOutcome, SignalReport};
use super::options::PipelineOptions;

// ============================================================================
// Types
// ============================================================================

/// Event handler callback type.
///
/// Called once per signal with that signal's final event.
pub type SignalHandler = Box<dyn Fn(&SignalEvent) + Send + Sync>;

// ============================================================================
// Pipeline
// ============================================================================

/// Turns raw signals into canonical digests and emits the results.
///
/// # Example
///
/// ```
/// use fingerprint_digest::{Pipeline, SignalName, StaticSource};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> fingerprint_digest::Result<()> {
/// let source = StaticSource::new()
///     .with(SignalName::Canvas, json!({ "winding": true, "geometry": "g", "text": "t" }));
///
/// let pipeline = Pipeline::builder()
///     .source(source)
///     .signals([SignalName::Canvas])
///     .build()?;
///
/// let report = pipeline.run().await;
/// let canvas = report.get(SignalName::Canvas).expect("selected");
/// assert_eq!(canvas.outcome.canonical_text(), "1|g|t");
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    /// Where raw values come from.
    source: Arc<dyn SignalSource>,
    /// Signal selection and timeout.
    options: PipelineOptions,
    /// Synchronous result callback.
    handler: Option<SignalHandler>,
    /// Channel subscribers.
    subscribers: Mutex<Vec<mpsc::UnboundedSender<SignalEvent>>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .field("subscribers", &self.subscribers.lock().len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Pipeline - Constructor
// ============================================================================

impl Pipeline {
    /// Creates a configuration builder for the pipeline.
    #[inline]
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Creates a pipeline from validated parts.
    pub(crate) fn new(
        source: Arc<dyn SignalSource>,
        options: PipelineOptions,
        handler: Option<SignalHandler>,
    ) -> Self {
        Self {
            source,
            options,
            handler,
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

// ============================================================================
// Pipeline - Public API
// ============================================================================

impl Pipeline {
    /// Returns the pipeline's options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Subscribes to events of all future runs.
    ///
    /// Dropping the receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SignalEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Runs every selected signal once.
    ///
    /// Never fails as a whole: a failing signal is logged and reported as
    /// [`SignalOutcome::Failed`] while its siblings carry on. Events reach
    /// subscribers as each signal finishes; the returned report lists them
    /// in the same order.
    pub async fn run(&self) -> RunReport {
        let run_id = RunId::generate();
        info!(run_id = %run_id, signals = self.options.signals.len(), "Pipeline run started");

        let events = Mutex::new(Vec::with_capacity(self.options.signals.len()));
        let pipelines = self
            .options
            .signals
            .iter()
            .map(|&signal| self.run_signal(run_id, signal, &events));
        join_all(pipelines).await;

        let report = RunReport {
            run_id,
            events: events.into_inner(),
        };

        info!(
            run_id = %run_id,
            ready = report.ready_count(),
            unavailable = report.unavailable_count(),
            failed = report.failed_count(),
            "Pipeline run finished"
        );

        report
    }
}

// ============================================================================
// Pipeline - Signal Processing
// ============================================================================

impl Pipeline {
    /// Runs one signal to completion and emits its event.
    async fn run_signal(
        &self,
        run_id: RunId,
        signal: SignalName,
        events: &Mutex<Vec<SignalEvent>>,
    ) {
        let outcome = self
            .fetch_resolved(signal)
            .await
            .and_then(|value| process_value(signal, value));

        let outcome = outcome.unwrap_or_else(|e| {
            error!(run_id = %run_id, signal = %signal, error = %e, "Signal pipeline failed");
            SignalOutcome::Failed {
                message: e.to_string(),
            }
        });

        let event = SignalEvent {
            run_id,
            signal,
            outcome,
        };
        self.emit(&event);
        events.lock().push(event);
    }

    /// Fetches and resolves one signal, bounded by the resolve timeout.
    async fn fetch_resolved(&self, signal: SignalName) -> Result<Value> {
        let work = async {
            let raw = self.source.fetch(signal).await?;
            debug!(signal = %signal, deferred = raw.is_deferred(), "Fetched signal");
            resolve(signal, raw).await
        };

        match self.options.resolve_timeout {
            Some(limit) => timeout(limit, work)
                .await
                .map_err(|_| Error::resolution_timeout(signal, limit))?,
            None => work.await,
        }
    }

    /// Delivers an event to the handler and every live subscriber.
    fn emit(&self, event: &SignalEvent) {
        if let Some(handler) = &self.handler {
            handler(event);
        }

        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

// ============================================================================
// Processing
// ============================================================================

/// Canonicalizes and hashes one resolved value.
///
/// A status code short-circuits to [`SignalOutcome::Unavailable`] before
/// anything is hashed.
///
/// # Errors
///
/// - [`Error::InvalidPayload`] if the value does not have the signal's shape
/// - [`Error::Json`] if serialization fails
pub fn process_value(signal: SignalName, value: Value) -> Result<SignalOutcome> {
    match canonicalize(signal, &value)? {
        Canonical::Unavailable { status } => {
            warn!(signal = %signal, %status, "Signal unavailable");
            Ok(SignalOutcome::Unavailable { raw: value, status })
        }
        Canonical::Text(canonical) => {
            let digest = digest(&canonical);
            debug!(signal = %signal, digest = %digest, "Signal digested");
            Ok(SignalOutcome::Ready(SignalReport {
                raw: value,
                canonical,
                digest,
            }))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
