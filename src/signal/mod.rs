//! Raw signals and where they come from.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `source` | [`SignalSource`] trait and the in-memory [`StaticSource`] |
//! | `value` | [`RawValue`], [`Deferred`] and [`resolve`] |

// ============================================================================
// Submodules
// ============================================================================

/// Signal source trait and implementations.
pub mod source;

/// Raw values and resolution.
pub mod value;

// ============================================================================
// Re-exports
// ============================================================================

pub use source::{SignalSource, StaticSource};
pub use value::{Deferred, RawValue, Signal, resolve};
