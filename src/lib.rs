//! Dump the UV absorbance chromatogram of a Thermo RAW file to a CSV file.
//!
//! The pipeline is three sequential stages: [`RawFile::open`] selects the
//! mass spectrometry device of the RAW file, [`extract_uv_trace`] requests the
//! UV "channel A" trace over the file's full scan range, and [`write_csv`]
//! renders the paired time/intensity arrays as a two column CSV.
//!
//! The vendor library itself sits behind the narrow [`VendorRawReader`] trait.
//! The default build carries no vendor backend; enable the `dotnet` feature to
//! drive Thermo's `RawFileReader` library through a self-hosted `dotnet`
//! runtime.
//!
//! # Licensing
//! Reading RAW files through the `dotnet` backend is subject to the
//! [RawFileReader License](https://github.com/thermofisherlsms/RawFileReader).
pub mod constants;
pub mod error;
pub mod export;
pub mod reader;
pub mod trace;
pub mod vendor;

#[cfg(feature = "dotnet")]
pub mod dotnet;

pub use crate::constants::{Device, TraceType, TRACE_KIND_UV_CHANNEL_A};
pub use crate::error::Error;
pub use crate::export::write_csv;
pub use crate::reader::{open, RawFile};
pub use crate::trace::{extract_uv_trace, UvTrace};
pub use crate::vendor::{
    ChromatogramData, ChromatogramTraceSettings, ScanRange, VendorRawReader,
};

#[cfg(feature = "dotnet")]
pub use crate::dotnet::{initialize, set_runtime_dir};
