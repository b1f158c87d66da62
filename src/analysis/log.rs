//! Flat comparison log
//!
//! One line per comparison, appended to a plain text file:
//!
//! ```text
//! raga_a.wav Vs raga_b.wav : Overall Similarity: 87.5%, Pattern Similarity: 91.23%, Swara Similarity: 87.5%
//! ```
//!
//! Percentages are rounded to two decimals and printed in shortest form with
//! at least one decimal (`100.0`, `87.5`, `33.33`).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::result::SimilarityResult;
use crate::error::AnalysisError;

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Display name of the first recording
    pub file1: String,
    /// Display name of the second recording
    pub file2: String,
    /// Overall similarity in percent
    pub overall_similarity: f64,
    /// Pattern similarity in percent
    pub pattern_similarity: f64,
    /// Swara similarity in percent
    pub swara_similarity: f64,
}

impl LogEntry {
    /// Parse a log line; `None` if it does not follow the log format
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (files, scores) = line.split_once(" : ")?;
        let (file1, file2) = files.split_once(" Vs ")?;

        let mut values = scores.split(", ").map(|part| {
            let (_, value) = part.split_once(": ")?;
            value.trim_end_matches('%').parse::<f64>().ok()
        });

        let overall_similarity = values.next()??;
        let pattern_similarity = values.next()??;
        let swara_similarity = values.next()??;

        Some(Self {
            file1: file1.to_string(),
            file2: file2.to_string(),
            overall_similarity,
            pattern_similarity,
            swara_similarity,
        })
    }
}

/// Format the log line for a comparison of `name1` against `name2`
pub fn format_log_line(name1: &str, name2: &str, result: &SimilarityResult) -> String {
    let (overall, pattern, swara) = result.percentages();
    format!(
        "{} Vs {} : Overall Similarity: {:?}%, Pattern Similarity: {:?}%, Swara Similarity: {:?}%",
        name1, name2, overall, pattern, swara
    )
}

/// Append one line to the log file, creating it if needed
pub fn append_log_entry<P: AsRef<Path>>(path: P, line: &str) -> Result<(), AnalysisError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// Read and parse every well-formed line of a log file
///
/// A missing file yields an empty list; malformed lines are skipped.
pub fn read_log_entries<P: AsRef<Path>>(path: P) -> Result<Vec<LogEntry>, AnalysisError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let entries: Vec<LogEntry> = contents.lines().filter_map(LogEntry::parse).collect();

    log::debug!("Read {} log entries from {}", entries.len(), path.display());

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metadata::ComparisonMetadata;
    use crate::similarity::SimilarityScores;

    fn result(overall: f32, pattern: f32, swara: f32) -> SimilarityResult {
        SimilarityResult::from_scores(
            SimilarityScores {
                overall,
                pattern,
                swara,
            },
            None,
            ComparisonMetadata::default(),
        )
    }

    #[test]
    fn test_format_log_line() {
        let line = format_log_line("a.wav", "b.mp3", &result(1.0, 0.875, 1.0 / 3.0));
        assert_eq!(
            line,
            "a.wav Vs b.mp3 : Overall Similarity: 100.0%, Pattern Similarity: 87.5%, Swara Similarity: 33.33%"
        );
    }

    #[test]
    fn test_parse_log_line() {
        let entry = LogEntry::parse(
            "kalyani.wav Vs todi.wav : Overall Similarity: 42.17%, Pattern Similarity: 10.0%, Swara Similarity: 42.17%\n",
        )
        .unwrap();
        assert_eq!(entry.file1, "kalyani.wav");
        assert_eq!(entry.file2, "todi.wav");
        assert_eq!(entry.overall_similarity, 42.17);
        assert_eq!(entry.pattern_similarity, 10.0);
        assert_eq!(entry.swara_similarity, 42.17);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(LogEntry::parse("").is_none());
        assert!(LogEntry::parse("just some text").is_none());
        assert!(LogEntry::parse("a Vs b : Overall Similarity: x%").is_none());
        assert!(LogEntry::parse("a and b : Overall Similarity: 1%, Pattern Similarity: 1%, Swara Similarity: 1%").is_none());
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");

        assert!(read_log_entries(&path).unwrap().is_empty());

        append_log_entry(&path, &format_log_line("x.wav", "y.wav", &result(0.5, 0.25, 0.5))).unwrap();
        append_log_entry(&path, "garbage line").unwrap();
        append_log_entry(&path, &format_log_line("y.wav", "x.wav", &result(0.4, 0.25, 0.4))).unwrap();

        let entries = read_log_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file1, "x.wav");
        assert_eq!(entries[0].overall_similarity, 50.0);
        assert_eq!(entries[1].file1, "y.wav");
        assert_eq!(entries[1].swara_similarity, 40.0);
    }
}
