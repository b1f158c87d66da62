//! Error types for the recording comparison engine

use std::fmt;

/// Errors that can occur while comparing two recordings
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Audio decoding error (unreadable, corrupt or unsupported file)
    DecodingError(String),

    /// Processing error during analysis
    ProcessingError(String),

    /// Failed to draw or write the comparison chart
    RenderError(String),

    /// Filesystem error outside of decoding (log files, metadata lookups)
    IoError(String),
}

impl AnalysisError {
    /// True for errors that mean the input audio could not be read at all
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, AnalysisError::DecodingError(_))
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AnalysisError::RenderError(msg) => write!(f, "Render error: {}", msg),
            AnalysisError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::IoError(err.to_string())
    }
}
