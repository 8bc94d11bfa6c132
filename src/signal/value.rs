//! Raw signal values and their resolution.
//!
//! The collector hands over each signal either as a finished value or as
//! a zero-argument computation that produces one later. [`RawValue`]
//! makes that distinction explicit and [`resolve`] is the only place a
//! deferred computation is ever run.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;

use futures_util::future::BoxFuture;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::SignalName;

// ============================================================================
// Deferred
// ============================================================================

/// Boxed future produced by a [`Deferred`] thunk.
type DeferredFuture = BoxFuture<'static, std::result::Result<Value, String>>;

/// A zero-argument computation yielding a signal value asynchronously.
///
/// The thunk is `FnOnce`; resolving consumes it, so it can run at most once.
pub struct Deferred(Box<dyn FnOnce() -> DeferredFuture + Send>);

impl Deferred {
    /// Wraps an async computation.
    ///
    /// The computation's error is kept only as its display text.
    pub fn new<F, Fut, E>(thunk: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<Value, E>> + Send + 'static,
        E: fmt::Display + 'static,
    {
        Self(Box::new(move || {
            let fut = thunk();
            Box::pin(async move { fut.await.map_err(|e| e.to_string()) })
        }))
    }

    /// Runs the computation.
    async fn run(self) -> std::result::Result<Value, String> {
        (self.0)().await
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

// ============================================================================
// RawValue
// ============================================================================

/// A signal value as supplied by the source.
#[derive(Debug)]
pub enum RawValue {
    /// Already available.
    Resolved(Value),
    /// Must be resolved before use.
    Deferred(Deferred),
}

impl RawValue {
    /// Creates a resolved value.
    #[inline]
    #[must_use]
    pub fn resolved(value: impl Into<Value>) -> Self {
        Self::Resolved(value.into())
    }

    /// Creates a deferred value from an async computation.
    #[inline]
    #[must_use]
    pub fn deferred<F, Fut, E>(thunk: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<Value, E>> + Send + 'static,
        E: fmt::Display + 'static,
    {
        Self::Deferred(Deferred::new(thunk))
    }

    /// Returns `true` if the value still has to be resolved.
    #[inline]
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl From<Value> for RawValue {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Resolved(value)
    }
}

// ============================================================================
// Signal
// ============================================================================

/// A named raw value.
#[derive(Debug)]
pub struct Signal {
    /// Which signal this is.
    pub name: SignalName,
    /// The raw value.
    pub value: RawValue,
}

impl Signal {
    /// Creates a signal.
    #[inline]
    #[must_use]
    pub fn new(name: SignalName, value: impl Into<RawValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Resolves the signal's value.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub async fn resolve(self) -> Result<Value> {
        resolve(self.name, self.value).await
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves a raw value into a plain value.
///
/// Resolved values pass through untouched. Deferred values are awaited
/// exactly once.
///
/// # Errors
///
/// - [`Error::SignalResolution`] if the deferred computation fails
pub async fn resolve(signal: SignalName, raw: RawValue) -> Result<Value> {
    match raw {
        RawValue::Resolved(value) => Ok(value),
        RawValue::Deferred(deferred) => {
            debug!(signal = %signal, "Resolving deferred signal value");
            deferred
                .run()
                .await
                .map_err(|message| Error::signal_resolution(signal, message))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
