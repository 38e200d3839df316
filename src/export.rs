use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::trace::UvTrace;

/// Write a trace to `path` as CSV, a `time,intensity` header followed by one
/// row per sample in original order. An existing file is truncated.
///
/// Values are rendered with Rust's default shortest float formatting, so
/// parsing a row back reproduces the original `f64`s exactly. No atomic-write
/// guarantee is made; a failed write may leave a partial file behind.
pub fn write_csv<P: AsRef<Path>>(path: P, trace: &UvTrace) -> Result<()> {
    if trace.time.len() != trace.intensity.len() {
        return Err(Error::MalformedTrace {
            time: trace.time.len(),
            intensity: trace.intensity.len(),
        });
    }

    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["time", "intensity"])?;
    for (time, intensity) in trace.time.iter().zip(trace.intensity.iter()) {
        writer.serialize((time, intensity))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    debug!("wrote {} rows to {}", trace.len(), path.display());
    Ok(())
}
