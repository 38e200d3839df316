use crate::constants::TraceType;

/// The ways a conversion run can fail. Every error aborts the run, there is
/// no retry or partial-result recovery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The vendor reader library could not be located or started
    #[error("vendor reader library unavailable: {0}")]
    VendorLibraryUnavailable(String),

    /// The input path does not exist, is not a RAW file, or its MS device
    /// could not be selected
    #[error("could not read instrument file: {0}")]
    UnreadableFile(String),

    /// The file opened, but carries no data for the requested trace
    #[error("trace {0:?} is not available in this file")]
    TraceUnavailable(TraceType),

    /// The time and intensity arrays disagree in length
    #[error("malformed trace: {time} time points but {intensity} intensity points")]
    MalformedTrace { time: usize, intensity: usize },

    /// The destination file could not be written
    #[error("failed to write output: {0}")]
    WriteError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
