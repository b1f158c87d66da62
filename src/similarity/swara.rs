//! Swara similarity
//!
//! Blend of two terms:
//! 1. Pitch proximity: fraction of frames of the first contour that find a
//!    pitch in the second contour within an absolute Hz window
//! 2. Distribution similarity: mean of `1 - |share1 - share2|` over the union
//!    of observed pitch classes
//!
//! `swara = pitch_weight * proximity + distribution_weight * distribution`
//! (0.7 / 0.3 by default).
//!
//! The proximity scan is greedy and directional: each pitch of the first
//! contour stops at the first close pitch of the second, and a pitch of the
//! second contour may be matched any number of times. With the
//! `max(len1, len2)` denominator this makes `swara(a, b)` and `swara(b, a)`
//! differ in general.

use crate::config::AnalysisConfig;
use crate::features::distribution::{analyze_note_distribution, NoteDistribution};
use crate::features::notes::PitchClass;
use crate::features::pitch::PitchFeatures;

/// Distribution similarity when neither recording has any note
pub const VACUOUS_DISTRIBUTION_SIMILARITY: f32 = 1.0;

/// Fraction of `pitches1` matched in `pitches2` within `tolerance_hz`
///
/// `matched / max(len1, len2)`; 0.0 when both contours are empty. O(n·m).
pub fn pitch_proximity(pitches1: &[f32], pitches2: &[f32], tolerance_hz: f32) -> f32 {
    let denom = pitches1.len().max(pitches2.len());
    if denom == 0 {
        return 0.0;
    }

    let matched = pitches1
        .iter()
        .filter(|&&p1| pitches2.iter().any(|&p2| (p1 - p2).abs() <= tolerance_hz))
        .count();

    matched as f32 / denom as f32
}

/// Per-class agreement `1 - |share1 - share2|` over the sorted class union
pub fn per_class_similarity(
    dist1: &NoteDistribution,
    dist2: &NoteDistribution,
) -> Vec<(PitchClass, f32)> {
    dist1
        .union_classes(dist2)
        .into_iter()
        .map(|pc| (pc, 1.0 - (dist1.get(pc) - dist2.get(pc)).abs()))
        .collect()
}

/// Mean per-class agreement; [`VACUOUS_DISTRIBUTION_SIMILARITY`] for an empty union
pub fn distribution_similarity(dist1: &NoteDistribution, dist2: &NoteDistribution) -> f32 {
    let per_class = per_class_similarity(dist1, dist2);
    if per_class.is_empty() {
        log::debug!("Distribution similarity: no pitch classes observed, using vacuous value");
        return VACUOUS_DISTRIBUTION_SIMILARITY;
    }

    per_class.iter().map(|(_, s)| s).sum::<f32>() / per_class.len() as f32
}

/// Swara similarity of two recordings' features
///
/// # Example
///
/// ```
/// use swara_similarity::AnalysisConfig;
/// use swara_similarity::features::pitch::PitchFeatures;
/// use swara_similarity::similarity::swara::swara_similarity;
///
/// let features = PitchFeatures {
///     pitch_sequence: vec![440.0, 441.0, 261.6],
///     confidence_sequence: vec![1.0, 1.0, 1.0],
///     note_sequence: vec!["A4".parse()?, "A4".parse()?, "C4".parse()?],
/// };
/// let score = swara_similarity(&features, &features, &AnalysisConfig::default());
/// assert!((score - 1.0).abs() < 1e-6);
/// # Ok::<(), swara_similarity::AnalysisError>(())
/// ```
pub fn swara_similarity(
    features1: &PitchFeatures,
    features2: &PitchFeatures,
    config: &AnalysisConfig,
) -> f32 {
    let proximity = pitch_proximity(
        &features1.pitch_sequence,
        &features2.pitch_sequence,
        config.tolerance_hz(),
    );

    let dist1 = analyze_note_distribution(&features1.note_sequence);
    let dist2 = analyze_note_distribution(&features2.note_sequence);
    let distribution = distribution_similarity(&dist1, &dist2);

    log::debug!(
        "Swara similarity: proximity={:.4}, distribution={:.4}",
        proximity,
        distribution
    );

    config.pitch_weight * proximity + config.distribution_weight * distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notes::note_of;

    fn features(pitches: &[f32]) -> PitchFeatures {
        PitchFeatures {
            pitch_sequence: pitches.to_vec(),
            confidence_sequence: vec![1.0; pitches.len()],
            note_sequence: pitches.iter().filter_map(|&p| note_of(p)).collect(),
        }
    }

    #[test]
    fn test_identical_contours_match_fully() {
        let pitches = [220.0, 246.9, 261.6, 293.7, 329.6];
        assert_eq!(pitch_proximity(&pitches, &pitches, 8.27), 1.0);

        let f = features(&pitches);
        let score = swara_similarity(&f, &f, &AnalysisConfig::default());
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_tolerance_is_absolute() {
        // 8 Hz apart matches at any register, 9 Hz apart never does
        assert_eq!(pitch_proximity(&[100.0], &[108.0], 8.27), 1.0);
        assert_eq!(pitch_proximity(&[1000.0], &[1008.0], 8.27), 1.0);
        assert_eq!(pitch_proximity(&[1000.0], &[1009.0], 8.27), 0.0);
    }

    #[test]
    fn test_empty_contours() {
        assert_eq!(pitch_proximity(&[], &[], 8.27), 0.0);
        assert_eq!(pitch_proximity(&[440.0], &[], 8.27), 0.0);
        assert_eq!(pitch_proximity(&[], &[440.0], 8.27), 0.0);
    }

    #[test]
    fn test_many_to_one_matching() {
        // Three pitches of the first contour all match the single 440 Hz pitch
        let p1 = [438.0, 440.0, 442.0];
        let p2 = [440.0];
        assert_eq!(pitch_proximity(&p1, &p2, 8.27), 1.0);
        // Reverse direction: one match over max(1, 3)
        assert!((pitch_proximity(&p2, &p1, 8.27) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_swara_is_asymmetric() {
        let a = features(&[438.0, 440.0, 442.0, 300.0]);
        let b = features(&[440.0, 600.0]);
        let config = AnalysisConfig::default();
        let ab = swara_similarity(&a, &b, &config);
        let ba = swara_similarity(&b, &a, &config);
        assert!((ab - ba).abs() > 1e-3, "expected asymmetry, got {} vs {}", ab, ba);
    }

    #[test]
    fn test_vacuous_distribution_similarity() {
        let empty = NoteDistribution::default();
        assert_eq!(
            distribution_similarity(&empty, &empty),
            VACUOUS_DISTRIBUTION_SIMILARITY
        );

        // Two silent recordings: no proximity, vacuous distribution agreement
        let silent = features(&[]);
        let score = swara_similarity(&silent, &silent, &AnalysisConfig::default());
        assert!((score - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_distribution_similarity_with_one_empty() {
        let dist = analyze_note_distribution(&[note_of(440.0).unwrap(), note_of(262.0).unwrap()]);
        let empty = NoteDistribution::default();
        // Union {C, A}: each class agrees 1 - 0.5
        assert!((distribution_similarity(&dist, &empty) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_per_class_similarity_values() {
        let a = analyze_note_distribution(&[note_of(440.0).unwrap()]);
        let b = analyze_note_distribution(&[note_of(440.0).unwrap(), note_of(262.0).unwrap()]);
        let per_class = per_class_similarity(&a, &b);
        assert_eq!(per_class.len(), 2);
        assert_eq!(per_class[0].0, PitchClass::C);
        assert!((per_class[0].1 - 0.5).abs() < 1e-6);
        assert_eq!(per_class[1].0, PitchClass::A);
        assert!((per_class[1].1 - 0.5).abs() < 1e-6);
    }
}
