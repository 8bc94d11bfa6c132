//! Host-compatible JSON rendering.
//!
//! The collector page serializes structured signals with 2-space indented
//! JSON and renders numbers the way its host runtime does: shortest
//! round-trip digits, integral values without a fractional part, and
//! exponent notation below `1e-6` and from `1e21` (`1e-7`, `1e+21`).
//! [`HostFormatter`] reproduces that byte-for-byte so digests computed here
//! match digests computed in the browser.

// ============================================================================
// Imports
// ============================================================================

use std::io;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Decimal exponent from which host numbers switch to exponent notation.
const EXPONENT_UPPER: i32 = 21;

/// Decimal exponent at or below which host numbers switch to exponent notation.
const EXPONENT_LOWER: i32 = -6;

/// Largest integer the host represents exactly (`2^53 - 1`).
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

// ============================================================================
// Number Rendering
// ============================================================================

/// Renders `value` the way the collector's host runtime renders numbers.
///
/// Non-finite values render as `NaN`, `Infinity` and `-Infinity`; the JSON
/// path never reaches this with them because they serialize as `null`.
#[must_use]
pub fn host_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest round-trip digits as `d.ddd` `e` exponent.
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= EXPONENT_UPPER {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= EXPONENT_UPPER {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if EXPONENT_LOWER < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{e_sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{e_sign}{}", e.abs())
        }
    };

    format!("{sign}{body}")
}

// ============================================================================
// HostFormatter
// ============================================================================

/// Pretty JSON formatter with host number rendering.
///
/// Layout is delegated to [`PrettyFormatter`] (2-space indent, `": "`
/// separators, `[]`/`{}` for empty containers).
pub struct HostFormatter {
    pretty: PrettyFormatter<'static>,
}

impl HostFormatter {
    /// Creates a formatter with 2-space indentation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Default for HostFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for HostFormatter {
    #[inline]
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(host_number(value).as_bytes())
    }

    #[inline]
    fn write_u64<W>(&mut self, writer: &mut W, value: u64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value > MAX_SAFE_INTEGER {
            return self.write_f64(writer, value as f64);
        }
        self.pretty.write_u64(writer, value)
    }

    #[inline]
    fn write_i64<W>(&mut self, writer: &mut W, value: i64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value.unsigned_abs() > MAX_SAFE_INTEGER {
            return self.write_f64(writer, value as f64);
        }
        self.pretty.write_i64(writer, value)
    }

    #[inline]
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    #[inline]
    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    #[inline]
    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    #[inline]
    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    #[inline]
    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_value(writer)
    }

    #[inline]
    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Serializes `value` as host-compatible indented JSON.
///
/// # Errors
///
/// - [`Error::Json`](crate::Error::Json) if `value` cannot be serialized
pub fn to_host_json<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(256);
    let mut serializer = Serializer::with_formatter(&mut buf, HostFormatter::new());
    value.serialize(&mut serializer)?;

    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// ============================================================================
// Tests
// ============================================================================
