//! A vendor backend that drives Thermo's `RawFileReader` library through a
//! self-hosted `dotnet` runtime.
//!
//! The runtime loads a small managed bridge assembly, `libuvreader`, whose
//! unmanaged-callers-only exports cover exactly the operations of
//! [`VendorRawReader`]. Where that assembly lives is deployment
//! configuration, see [`set_runtime_dir`] and [`initialize`].

mod buffer;
mod runtime;

pub use runtime::{initialize, set_runtime_dir, RUNTIME_DIR_VAR};

use std::ffi::c_void;
use std::fmt::Debug;
use std::path::Path;
use std::ptr;
use std::sync::Arc;

use netcorehost::{hostfxr::AssemblyDelegateLoader, pdcstr};

use crate::constants::Device;
use crate::error::{Error, Result};
use crate::vendor::{ChromatogramData, ChromatogramTraceSettings, ScanRange, VendorRawReader};

/// Status codes reported by the managed bridge after each operation.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeStatus {
    Ok = 0,
    FileNotFound = 1,
    InvalidFormat = 2,
    DeviceNotFound = 3,
    TraceNotFound = 4,
    HandleNotFound = 5,
    Error = 999,
}

impl From<u32> for BridgeStatus {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Ok,
            1 => Self::FileNotFound,
            2 => Self::InvalidFormat,
            3 => Self::DeviceNotFound,
            4 => Self::TraceNotFound,
            5 => Self::HandleNotFound,
            _ => Self::Error,
        }
    }
}

/// A [`VendorRawReader`] backed by the `dotnet`-hosted bridge. The value
/// holds a token for the managed reader instance and releases it on drop.
pub struct DotNetRawReader {
    handle: *mut c_void,
    runtime: Arc<AssemblyDelegateLoader>,
}

impl Debug for DotNetRawReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DotNetRawReader")
            .field("handle", &self.handle)
            .finish()
    }
}

impl DotNetRawReader {
    /// Open `path` through the bridge. This may also create the `dotnet`
    /// runtime if this is the first time it was called.
    pub fn open(path: &Path) -> Result<Self> {
        let runtime = initialize()?;
        let open_fn = runtime
            .get_function_with_unmanaged_callers_only::<fn(*const u8, i32) -> *mut c_void>(
                pdcstr!("libuvreader.Exports, libuvreader"),
                pdcstr!("Open"),
            )
            .map_err(|e| Error::VendorLibraryUnavailable(format!("binding Open: {e:?}")))?;

        let text = path.to_string_lossy().to_string();
        let handle = open_fn(text.as_ptr(), text.len() as i32);
        let reader = Self { handle, runtime };

        match reader.status()? {
            BridgeStatus::Ok => Ok(reader),
            BridgeStatus::FileNotFound => Err(Error::UnreadableFile(format!(
                "{}: file not found",
                path.display()
            ))),
            BridgeStatus::InvalidFormat => Err(Error::UnreadableFile(format!(
                "{}: does not appear to be a valid RAW file",
                path.display()
            ))),
            status => Err(Error::UnreadableFile(format!(
                "{}: {status:?}",
                path.display()
            ))),
        }
    }

    fn status(&self) -> Result<BridgeStatus> {
        let status_fn = self
            .runtime
            .get_function_with_unmanaged_callers_only::<fn(*mut c_void) -> u32>(
                pdcstr!("libuvreader.Exports, libuvreader"),
                pdcstr!("Status"),
            )
            .map_err(|e| Error::VendorLibraryUnavailable(format!("binding Status: {e:?}")))?;
        Ok(status_fn(self.handle).into())
    }
}

impl VendorRawReader for DotNetRawReader {
    fn select_instrument(&mut self, device: Device, instrument_index: i32) -> Result<()> {
        let select_fn = self
            .runtime
            .get_function_with_unmanaged_callers_only::<fn(*mut c_void, i32, i32) -> u32>(
                pdcstr!("libuvreader.Exports, libuvreader"),
                pdcstr!("SelectInstrument"),
            )
            .map_err(|e| {
                Error::VendorLibraryUnavailable(format!("binding SelectInstrument: {e:?}"))
            })?;
        match BridgeStatus::from(select_fn(self.handle, device as i32, instrument_index)) {
            BridgeStatus::Ok => Ok(()),
            BridgeStatus::DeviceNotFound => Err(Error::UnreadableFile(format!(
                "no {device:?} device at instrument index {instrument_index}"
            ))),
            status => Err(Error::UnreadableFile(format!(
                "selecting {device:?} instrument {instrument_index} failed: {status:?}"
            ))),
        }
    }

    fn last_spectrum(&self) -> Result<i32> {
        let index_fn = self
            .runtime
            .get_function_with_unmanaged_callers_only::<fn(*mut c_void) -> i32>(
                pdcstr!("libuvreader.Exports, libuvreader"),
                pdcstr!("LastSpectrum"),
            )
            .map_err(|e| Error::VendorLibraryUnavailable(format!("binding LastSpectrum: {e:?}")))?;
        Ok(index_fn(self.handle))
    }

    fn chromatogram_data(
        &mut self,
        settings: &ChromatogramTraceSettings,
        range: ScanRange,
    ) -> Result<ChromatogramData> {
        let chrom_fn = self
            .runtime
            .get_function_with_unmanaged_callers_only::<fn(
                *mut c_void,
                i16,
                f64,
                i32,
                i32,
            ) -> buffer::RawVec<u8>>(
                pdcstr!("libuvreader.Exports, libuvreader"),
                pdcstr!("ChromatogramData"),
            )
            .map_err(|e| {
                Error::VendorLibraryUnavailable(format!("binding ChromatogramData: {e:?}"))
            })?;

        let buf = chrom_fn(
            self.handle,
            settings.trace as i16,
            settings.delay_in_min,
            range.start,
            range.end,
        );
        match self.status()? {
            BridgeStatus::Ok => {}
            // An empty response, the extractor reports the missing trace
            BridgeStatus::TraceNotFound => return Ok(ChromatogramData::default()),
            status => {
                return Err(Error::UnreadableFile(format!(
                    "chromatogram request failed: {status:?}"
                )))
            }
        }
        decode_chromatogram(&buf)
    }

    fn close(&mut self) {
        if self.handle.is_null() {
            return;
        }
        // Binding failures are swallowed, release failure is not fatal
        if let Ok(close_fn) = self
            .runtime
            .get_function_with_unmanaged_callers_only::<fn(*mut c_void)>(
                pdcstr!("libuvreader.Exports, libuvreader"),
                pdcstr!("Close"),
            )
        {
            close_fn(self.handle);
        }
        self.handle = ptr::null_mut();
    }
}

impl Drop for DotNetRawReader {
    fn drop(&mut self) {
        self.close()
    }
}

/// Unpack the bridge's chromatogram payload: a little-endian `u64` sample
/// count followed by that many `f64` times and that many `f64` intensities.
/// The bridge only runs on little-endian x86 hosts, so no byte swapping is
/// done here.
///
/// A payload that disagrees with its own sample count is a data-integrity
/// failure, distinct from the trace simply being absent.
fn decode_chromatogram(buf: &[u8]) -> Result<ChromatogramData> {
    let malformed = |detail: &str| {
        Error::UnreadableFile(format!(
            "malformed chromatogram payload ({detail}, {} bytes)",
            buf.len()
        ))
    };

    let header: [u8; 8] = buf
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| malformed("missing sample count"))?;
    let n = u64::from_le_bytes(header) as usize;

    let body = &buf[8..];
    let expected = n
        .checked_mul(16)
        .ok_or_else(|| malformed("sample count overflows"))?;
    if body.len() != expected {
        return Err(malformed("truncated arrays"));
    }

    let mut time: Vec<f64> = bytemuck::pod_collect_to_vec(body);
    let intensity = time.split_off(n);
    Ok(ChromatogramData {
        positions: vec![time],
        intensities: vec![intensity],
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn encode(time: &[f64], intensity: &[f64]) -> Vec<u8> {
        let mut buf = (time.len() as u64).to_le_bytes().to_vec();
        for value in time.iter().chain(intensity) {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf
    }

    #[test]
    fn test_decode_payload() {
        let buf = encode(&[0.01, 0.02], &[5.0, 125.5]);
        let data = decode_chromatogram(&buf).unwrap();
        assert_eq!(data.positions, vec![vec![0.01, 0.02]]);
        assert_eq!(data.intensities, vec![vec![5.0, 125.5]]);
    }

    #[test]
    fn test_decode_empty_payload() {
        let buf = encode(&[], &[]);
        let data = decode_chromatogram(&buf).unwrap();
        assert_eq!(data.positions, vec![Vec::<f64>::new()]);
    }

    #[test]
    fn test_decode_truncated_payload_is_integrity_error() {
        let mut buf = encode(&[0.01, 0.02], &[5.0, 125.5]);
        buf.truncate(buf.len() - 3);
        let err = decode_chromatogram(&buf).unwrap_err();
        assert!(matches!(err, Error::UnreadableFile(_)));
    }

    #[test]
    fn test_decode_short_header_is_integrity_error() {
        let err = decode_chromatogram(&[0u8; 5]).unwrap_err();
        assert!(matches!(err, Error::UnreadableFile(_)));
    }
}
