//! Error types for the analysis pipeline

use std::fmt;

/// Errors that can occur during tempo or key analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Audio file could not be opened, decoded or resampled
    DecodingError(String),

    /// Fewer than two onsets were detected, so no inter-onset interval exists
    InsufficientOnsets {
        /// Number of onsets that were available
        found: usize,
    },

    /// The representative inter-onset interval is zero or negative
    DegenerateInterval {
        /// Offending interval in seconds
        interval: f64,
    },

    /// Processing error during analysis
    ProcessingError(String),

    /// Writing a diagnostic artifact failed
    IoError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AnalysisError::InsufficientOnsets { found } => write!(
                f,
                "Insufficient onsets: tempo estimation needs at least 2, found {}",
                found
            ),
            AnalysisError::DegenerateInterval { interval } => write!(
                f,
                "Degenerate inter-onset interval: {:.3}s cannot be converted to BPM",
                interval
            ),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AnalysisError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}
