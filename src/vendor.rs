//! The seam between this crate and the vendor's RAW file reading library.
//!
//! Everything the pipeline needs from the vendor is captured by
//! [`VendorRawReader`]. Any implementation works, whether it binds the real
//! SDK (see the `dotnet` feature) or fabricates data for tests.

use crate::constants::{Device, TraceType};
use crate::error::Result;

/// Selects which trace a chromatogram request should return. Mirrors the
/// vendor's `ChromatogramTraceSettings` object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromatogramTraceSettings {
    pub trace: TraceType,
    pub delay_in_min: f64,
}

impl ChromatogramTraceSettings {
    /// Settings for `trace` with no acquisition delay
    pub fn new(trace: TraceType) -> Self {
        Self {
            trace,
            delay_in_min: 0.0,
        }
    }
}

/// An inclusive range of 1-based scan numbers.
///
/// `end` comes from file metadata and is only known once the file is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    pub start: i32,
    pub end: i32,
}

impl ScanRange {
    /// The full range of a file, scan 1 through `last`
    pub fn through_last(last: i32) -> Self {
        Self { start: 1, end: last }
    }

    /// A file with no recorded scans produces `[1, 0]`, the empty range
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// A chromatogram response, parallel position and intensity arrays.
///
/// The vendor returns one inner array per requested settings entry. This
/// crate always requests exactly one trace, so only the first entries are
/// ever read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromatogramData {
    pub positions: Vec<Vec<f64>>,
    pub intensities: Vec<Vec<f64>>,
}

/// The operations this crate consumes from a vendor RAW file reader.
///
/// A reader is created already holding an open file; construction is left to
/// each implementation since it is where the interop strategy lives.
pub trait VendorRawReader {
    /// Make `device` number `instrument_index` the active channel for
    /// subsequent calls. Indexes are 1-based.
    fn select_instrument(&mut self, device: Device, instrument_index: i32) -> Result<()>;

    /// The 1-based scan number of the last spectrum recorded by the active
    /// device, from the file's run header. Zero when nothing was recorded.
    fn last_spectrum(&self) -> Result<i32>;

    /// Request the chromatogram described by `settings` over `range`
    fn chromatogram_data(
        &mut self,
        settings: &ChromatogramTraceSettings,
        range: ScanRange,
    ) -> Result<ChromatogramData>;

    /// Release the vendor-side resources. Safe to call repeatedly.
    fn close(&mut self);
}
