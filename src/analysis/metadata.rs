//! Comparison metadata structures

use serde::{Deserialize, Serialize};

/// Diagnostics recorded alongside a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetadata {
    /// Algorithm version
    pub algorithm_version: String,

    /// Retained (pitched) frames of each recording
    pub frames_retained: (usize, usize),

    /// Note labels of each recording
    pub notes: (usize, usize),

    /// Wall-clock time of the comparison in milliseconds
    pub processing_time_ms: f32,

    /// Non-fatal issues (silent input, failed chart rendering)
    pub warnings: Vec<String>,
}

impl Default for ComparisonMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            frames_retained: (0, 0),
            notes: (0, 0),
            processing_time_ms: 0.0,
            warnings: vec![],
        }
    }
}
