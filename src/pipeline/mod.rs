//! Signal dispatch.
//!
//! This module ties source, canonicalizer and digest together and
//! delivers results to the presentation layer.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Pipeline`] | Runs the per-signal pipelines |
//! | [`PipelineBuilder`] | Fluent configuration builder |
//! | [`PipelineOptions`] | Signal selection and timeout |
//! | [`SignalEvent`] | One signal's result, as delivered to subscribers |
//! | [`RunReport`] | All results of one run |
//!
//! # Example
//!
//! ```no_run
//! use fingerprint_digest::{Pipeline, StaticSource};
//!
//! # async fn example(components: &str) -> fingerprint_digest::Result<()> {
//! let pipeline = Pipeline::builder()
//!     .source(StaticSource::from_components_json(components)?)
//!     .build()?;
//!
//! let mut events = pipeline.subscribe();
//! let report = pipeline.run().await;
//!
//! while let Ok(event) = events.try_recv() {
//!     let view = event.presentation();
//!     println!("{} = {}", view.digest_slot, view.digest);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for pipeline configuration.
pub mod builder;

/// Core pipeline implementation.
pub mod core;

/// Emitted events and run reports.
pub mod event;

/// Pipeline options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::PipelineBuilder;
pub use core::{Pipeline, SignalHandler, process_value};
pub use event::{
    NOT_AVAILABLE, Presentation, RunReport, SignalEvent, SignalOutcome, SignalReport,
};
pub use options::PipelineOptions;
