use log::debug;

use crate::constants::TRACE_KIND_UV_CHANNEL_A;
use crate::error::{Error, Result};
use crate::reader::RawFile;
use crate::vendor::{ChromatogramData, ChromatogramTraceSettings, ScanRange};

/// A UV absorbance trace, index-aligned time and intensity arrays of equal
/// length. Times are assumed monotonic by the source format, not verified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UvTrace {
    pub time: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl UvTrace {
    /// Number of samples in the trace
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the trace holds no samples at all
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Extract the UV channel A chromatogram over the file's full scan range.
///
/// A file whose MS device recorded no scans yields an empty trace. A file
/// that has scans but no channel A data fails with
/// [`Error::TraceUnavailable`], and parallel arrays of unequal length fail
/// with [`Error::MalformedTrace`] rather than being truncated.
pub fn extract_uv_trace(raw: &mut RawFile) -> Result<UvTrace> {
    let settings = ChromatogramTraceSettings::new(TRACE_KIND_UV_CHANNEL_A);
    let range = ScanRange::through_last(raw.last_spectrum()?);
    if range.is_empty() {
        debug!("{} recorded no scans, trace is empty", raw.path().display());
        return Ok(UvTrace::default());
    }

    let ChromatogramData {
        positions,
        intensities,
    } = raw.chromatogram(&settings, range)?;

    let time = positions
        .into_iter()
        .next()
        .filter(|p| !p.is_empty())
        .ok_or(Error::TraceUnavailable(settings.trace))?;
    let intensity = intensities
        .into_iter()
        .next()
        .ok_or(Error::TraceUnavailable(settings.trace))?;

    if time.len() != intensity.len() {
        return Err(Error::MalformedTrace {
            time: time.len(),
            intensity: intensity.len(),
        });
    }
    debug!("extracted {} samples over scans {}-{}", time.len(), range.start, range.end);
    Ok(UvTrace { time, intensity })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{Device, TraceType};
    use crate::vendor::VendorRawReader;

    /// A vendor reader that serves one canned chromatogram response.
    struct Canned {
        last: i32,
        response: ChromatogramData,
    }

    impl VendorRawReader for Canned {
        fn select_instrument(&mut self, _device: Device, _index: i32) -> Result<()> {
            Ok(())
        }

        fn last_spectrum(&self) -> Result<i32> {
            Ok(self.last)
        }

        fn chromatogram_data(
            &mut self,
            settings: &ChromatogramTraceSettings,
            range: ScanRange,
        ) -> Result<ChromatogramData> {
            assert_eq!(settings.trace, TraceType::ChannelA);
            assert_eq!(settings.delay_in_min, 0.0);
            assert_eq!(range.start, 1);
            assert_eq!(range.end, self.last);
            Ok(self.response.clone())
        }

        fn close(&mut self) {}
    }

    fn open_canned(last: i32, response: ChromatogramData) -> RawFile {
        RawFile::wrap(Box::new(Canned { last, response }), "small.RAW".into()).unwrap()
    }

    #[test]
    fn test_extract() {
        let mut raw = open_canned(
            3,
            ChromatogramData {
                positions: vec![vec![0.01, 0.02, 0.03]],
                intensities: vec![vec![5.0, 125.5, 4.25]],
            },
        );
        let trace = extract_uv_trace(&mut raw).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.time, vec![0.01, 0.02, 0.03]);
        assert_eq!(trace.intensity, vec![5.0, 125.5, 4.25]);
    }

    #[test]
    fn test_empty_file_is_not_an_error() {
        let mut raw = open_canned(0, ChromatogramData::default());
        let trace = extract_uv_trace(&mut raw).unwrap();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_missing_channel() {
        let mut raw = open_canned(10, ChromatogramData::default());
        let err = extract_uv_trace(&mut raw).unwrap_err();
        assert!(matches!(err, Error::TraceUnavailable(TraceType::ChannelA)));
    }

    #[test]
    fn test_empty_positions_array_is_unavailable() {
        let mut raw = open_canned(
            10,
            ChromatogramData {
                positions: vec![vec![]],
                intensities: vec![vec![]],
            },
        );
        let err = extract_uv_trace(&mut raw).unwrap_err();
        assert!(matches!(err, Error::TraceUnavailable(_)));
    }

    #[test]
    fn test_length_mismatch_is_surfaced() {
        let mut raw = open_canned(
            10,
            ChromatogramData {
                positions: vec![vec![0.01, 0.02, 0.03]],
                intensities: vec![vec![5.0, 125.5]],
            },
        );
        let err = extract_uv_trace(&mut raw).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedTrace {
                time: 3,
                intensity: 2
            }
        ));
    }
}
