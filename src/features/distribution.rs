//! Note distribution analysis
//!
//! Folds a note sequence onto the 12 pitch classes and normalizes the counts,
//! giving the share of retained frames spent on each swara position.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::notes::{NoteLabel, PitchClass};

/// Normalized pitch-class histogram of one recording
///
/// Only observed pitch classes are present; values sum to 1.0 unless the
/// distribution is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDistribution {
    shares: BTreeMap<PitchClass, f32>,
}

impl NoteDistribution {
    /// Share of the given pitch class, 0.0 if never observed
    pub fn get(&self, pitch_class: PitchClass) -> f32 {
        self.shares.get(&pitch_class).copied().unwrap_or(0.0)
    }

    /// Number of observed pitch classes
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    /// True if no notes were observed
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Observed pitch classes with their shares, in chromatic order
    pub fn iter(&self) -> impl Iterator<Item = (PitchClass, f32)> + '_ {
        self.shares.iter().map(|(&pc, &share)| (pc, share))
    }

    /// Sum of all shares (1.0 for a non-empty distribution)
    pub fn total(&self) -> f32 {
        self.shares.values().sum()
    }

    /// Sorted union of the pitch classes observed in either distribution
    pub fn union_classes(&self, other: &NoteDistribution) -> Vec<PitchClass> {
        let mut classes: Vec<PitchClass> = self
            .shares
            .keys()
            .chain(other.shares.keys())
            .copied()
            .collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }
}

/// Compute the normalized pitch-class distribution of a note sequence
///
/// Octaves are stripped before counting. An empty sequence yields an empty
/// distribution, not a uniform one.
///
/// # Example
///
/// ```
/// use swara_similarity::features::distribution::analyze_note_distribution;
/// use swara_similarity::features::notes::{NoteLabel, PitchClass};
///
/// let notes: Vec<NoteLabel> = ["A4", "A3", "E4", "A4"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let dist = analyze_note_distribution(&notes);
/// assert_eq!(dist.get(PitchClass::A), 0.75);
/// assert_eq!(dist.get(PitchClass::E), 0.25);
/// assert_eq!(dist.get(PitchClass::C), 0.0);
/// ```
pub fn analyze_note_distribution(note_sequence: &[NoteLabel]) -> NoteDistribution {
    if note_sequence.is_empty() {
        return NoteDistribution::default();
    }

    let mut counts: BTreeMap<PitchClass, usize> = BTreeMap::new();
    for note in note_sequence {
        *counts.entry(note.strip_octave()).or_insert(0) += 1;
    }

    let total = note_sequence.len() as f32;
    let shares = counts
        .into_iter()
        .map(|(pc, count)| (pc, count as f32 / total))
        .collect();

    NoteDistribution { shares }
}
