//! Fingerprint Digest - deterministic digests of browser fingerprint signals.
//!
//! This library takes the raw signals produced by a browser fingerprint
//! collector, turns each into a canonical string and hashes it with
//! SHA-256, so that equal fingerprints always yield equal digests.
//!
//! # Architecture
//!
//! ```text
//! SignalSource ─▶ RawValue ─▶ resolve ─▶ canonicalize ─▶ digest ─▶ SignalEvent
//! ```
//!
//! Key design principles:
//!
//! - The collector is a black box behind [`SignalSource`]
//! - Deferred values are an explicit [`RawValue::Deferred`] variant, resolved once
//! - Each signal runs independently; one failure never aborts the others
//! - Results are pushed to subscribers (callback or channel), not written
//!   into shared state
//!
//! # Quick Start
//!
//! ```no_run
//! use fingerprint_digest::{Pipeline, Result, StaticSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let components = std::fs::read_to_string("components.json").expect("components");
//!
//!     let pipeline = Pipeline::builder()
//!         .source(StaticSource::from_components_json(&components)?)
//!         .on_signal(|event| {
//!             println!("{}: {}", event.signal, event.outcome.digest_text());
//!         })
//!         .build()?;
//!
//!     let report = pipeline.run().await;
//!     println!("{} signals digested", report.ready_count());
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`canonical`] | Canonical text per signal |
//! | [`digest`] | SHA-256 hex digests |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | [`SignalName`] and [`RunId`] |
//! | [`pipeline`] | Signal dispatch and result delivery |
//! | [`signal`] | Raw values and signal sources |

// ============================================================================
// Modules
// ============================================================================

/// Canonical text for resolved signal values.
pub mod canonical;

/// SHA-256 content digests.
pub mod digest;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Signal names and run identifiers.
pub mod identifiers;

/// Signal dispatch.
///
/// Use [`Pipeline::builder()`] to create a configured pipeline.
pub mod pipeline;

/// Raw values and sources.
pub mod signal;

// ============================================================================
// Re-exports
// ============================================================================

// Canonicalization
pub use canonical::{Canonical, canonicalize};

// Digest
pub use digest::{DIGEST_HEX_LEN, digest, is_digest};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{RunId, SignalName};

// Pipeline types
pub use pipeline::{
    NOT_AVAILABLE, Pipeline, PipelineBuilder, PipelineOptions, Presentation, RunReport,
    SignalEvent, SignalHandler, SignalOutcome, SignalReport, process_value,
};

// Signal types
pub use signal::{Deferred, RawValue, Signal, SignalSource, StaticSource, resolve};
