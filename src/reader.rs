use std::fmt::Debug;
use std::path::PathBuf;

use log::debug;

use crate::constants::Device;
use crate::error::{Error, Result};
use crate::vendor::{ChromatogramData, ChromatogramTraceSettings, ScanRange, VendorRawReader};

/// The instrument index of the mass spectrometry device to read from.
///
/// Always the first MS device; files with more than one are not enumerated.
const MS_INSTRUMENT_INDEX: i32 = 1;

/// An open RAW file with its mass spectrometry device already selected.
///
/// This object exclusively owns the vendor-side handle and closes it when
/// dropped, on every exit path.
pub struct RawFile {
    inner: Box<dyn VendorRawReader>,
    path: PathBuf,
}

impl Debug for RawFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawFile")
            .field("path", &self.path)
            .finish()
    }
}

impl Drop for RawFile {
    fn drop(&mut self) {
        self.inner.close()
    }
}

/// Open a Thermo RAW file from a path with the default vendor backend.
///
/// This is a wrapper around [`RawFile::open`]
pub fn open<P: Into<PathBuf>>(path: P) -> Result<RawFile> {
    RawFile::open(path)
}

impl RawFile {
    /// Open a Thermo RAW file from a path with the default vendor backend.
    /// This may also create the `dotnet` runtime if this is the first time it
    /// was called.
    ///
    /// Without a backend feature enabled this always fails with
    /// [`Error::VendorLibraryUnavailable`].
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path: PathBuf = path.into();
        #[cfg(feature = "dotnet")]
        {
            let reader = crate::dotnet::DotNetRawReader::open(&path)?;
            Self::wrap(Box::new(reader), path)
        }
        #[cfg(not(feature = "dotnet"))]
        {
            let _ = &path;
            Err(Error::VendorLibraryUnavailable(
                "this build carries no vendor backend, rebuild with the `dotnet` feature".into(),
            ))
        }
    }

    /// Wrap an already-open vendor reader, selecting the MS device.
    ///
    /// The reader is closed again if device selection fails.
    pub fn wrap(mut reader: Box<dyn VendorRawReader>, path: PathBuf) -> Result<Self> {
        if let Err(e) = reader.select_instrument(Device::MS, MS_INSTRUMENT_INDEX) {
            reader.close();
            return Err(e);
        }
        debug!(
            "selected {:?} instrument {MS_INSTRUMENT_INDEX} of {}",
            Device::MS,
            path.display()
        );
        Ok(Self {
            inner: reader,
            path,
        })
    }

    /// The path the file was opened from
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// The scan number of the last spectrum, from the run header
    pub fn last_spectrum(&self) -> Result<i32> {
        self.inner.last_spectrum()
    }

    /// Request a chromatogram trace over a scan range
    pub fn chromatogram(
        &mut self,
        settings: &ChromatogramTraceSettings,
        range: ScanRange,
    ) -> Result<ChromatogramData> {
        self.inner.chromatogram_data(settings, range)
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::constants::TraceType;

    struct Recorder {
        selected: Option<(Device, i32)>,
        fail_selection: bool,
        closed: Arc<AtomicBool>,
    }

    impl VendorRawReader for Recorder {
        fn select_instrument(&mut self, device: Device, instrument_index: i32) -> Result<()> {
            if self.fail_selection {
                return Err(Error::UnreadableFile("no MS device".into()));
            }
            self.selected = Some((device, instrument_index));
            Ok(())
        }

        fn last_spectrum(&self) -> Result<i32> {
            Ok(48)
        }

        fn chromatogram_data(
            &mut self,
            _settings: &ChromatogramTraceSettings,
            _range: ScanRange,
        ) -> Result<ChromatogramData> {
            assert_eq!(self.selected, Some((Device::MS, 1)));
            Ok(ChromatogramData::default())
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_selects_ms_instrument_one() {
        let closed = Arc::new(AtomicBool::new(false));
        let reader = Recorder {
            selected: None,
            fail_selection: false,
            closed: closed.clone(),
        };
        let mut raw = RawFile::wrap(Box::new(reader), "small.RAW".into()).unwrap();
        assert_eq!(raw.last_spectrum().unwrap(), 48);
        let settings = ChromatogramTraceSettings::new(TraceType::ChannelA);
        raw.chromatogram(&settings, ScanRange::through_last(48))
            .unwrap();
    }

    #[test]
    fn test_closed_on_drop() {
        let closed = Arc::new(AtomicBool::new(false));
        let reader = Recorder {
            selected: None,
            fail_selection: false,
            closed: closed.clone(),
        };
        let raw = RawFile::wrap(Box::new(reader), "small.RAW".into()).unwrap();
        drop(raw);
        assert!(closed.load(Ordering::Relaxed));
    }

    #[test]
    fn test_closed_when_selection_fails() {
        let closed = Arc::new(AtomicBool::new(false));
        let reader = Recorder {
            selected: None,
            fail_selection: true,
            closed: closed.clone(),
        };
        let err = RawFile::wrap(Box::new(reader), "small.RAW".into()).unwrap_err();
        assert!(matches!(err, Error::UnreadableFile(_)));
        assert!(closed.load(Ordering::Relaxed));
    }

    #[cfg(not(feature = "dotnet"))]
    #[test]
    fn test_open_without_backend() {
        let err = RawFile::open("does-not-matter.RAW").unwrap_err();
        assert!(matches!(err, Error::VendorLibraryUnavailable(_)));
    }
}
