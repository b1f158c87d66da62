//! Note naming
//!
//! Frequency ↔ MIDI conversions and chromatic note labels. Labels always use
//! sharps (`C#`, never `Db`) and carry an integer octave, so `A4` is 440 Hz.
//!
//! # Example
//!
//! ```
//! use swara_similarity::features::notes::{note_of, PitchClass};
//!
//! let note = note_of(440.0).unwrap();
//! assert_eq!(note.pitch_class, PitchClass::A);
//! assert_eq!(note.octave, 4);
//! assert_eq!(note.to_string(), "A4");
//! assert!(note_of(0.0).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// Reference frequency of A4 in Hz
pub const A4_FREQUENCY: f32 = 440.0;

/// MIDI number of A4
const A4_MIDI: f32 = 69.0;

/// Chromatic pitch-class names starting at C
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Continuous MIDI note number for a frequency (A4 = 440 Hz = 69)
///
/// Non-positive frequencies give `-inf` or NaN; callers filter them first.
pub fn hz_to_midi(frequency: f32) -> f32 {
    hz_to_midi_with_reference(frequency, A4_FREQUENCY)
}

/// Continuous MIDI note number for a frequency against a custom A4
pub fn hz_to_midi_with_reference(frequency: f32, reference: f32) -> f32 {
    12.0 * (frequency / reference).log2() + A4_MIDI
}

/// Frequency in Hz of a (possibly fractional) MIDI note number
pub fn midi_to_hz(midi: f32) -> f32 {
    A4_FREQUENCY * 2.0_f32.powf((midi - A4_MIDI) / 12.0)
}

/// One of the 12 chromatic pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    /// C
    C,
    /// C#
    CSharp,
    /// D
    D,
    /// D#
    DSharp,
    /// E
    E,
    /// F
    F,
    /// F#
    FSharp,
    /// G
    G,
    /// G#
    GSharp,
    /// A
    A,
    /// A#
    ASharp,
    /// B
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order from C
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Pitch class for a semitone index; wraps modulo 12
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Semitone index (C = 0, ..., B = 11)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Name in sharp notation (e.g. "C#")
    pub fn name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.index()]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PITCH_CLASS_NAMES
            .iter()
            .position(|&name| name == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| AnalysisError::InvalidInput(format!("Unknown pitch class: {}", s)))
    }
}

/// A note label: pitch class plus octave (e.g. `A4`, `C#3`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteLabel {
    /// Octave number, C-based (C4 is middle C)
    pub octave: i32,
    /// Pitch class with the octave stripped
    pub pitch_class: PitchClass,
}

impl NoteLabel {
    /// Create a label from its parts
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self { octave, pitch_class }
    }

    /// Label for a continuous MIDI number: pitch class from the rounded-down
    /// MIDI number, octave `floor(midi / 12) - 1`
    pub fn from_midi(midi: f32) -> Self {
        let semitone = midi.floor() as i32;
        Self {
            octave: (midi / 12.0).floor() as i32 - 1,
            pitch_class: PitchClass::from_index(semitone),
        }
    }

    /// The label with its octave stripped
    pub fn strip_octave(&self) -> PitchClass {
        self.pitch_class
    }

    /// Equal-tempered frequency of this note (A4 = 440 Hz)
    pub fn frequency(&self) -> f32 {
        let midi = (self.octave + 1) * 12 + self.pitch_class.index() as i32;
        midi_to_hz(midi as f32)
    }
}

impl fmt::Display for NoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class.name(), self.octave)
    }
}

impl FromStr for NoteLabel {
    type Err = AnalysisError;

    /// Parse labels such as "A4", "C#3" or "B-1"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c == '-' || c.is_ascii_digit())
            .ok_or_else(|| AnalysisError::InvalidInput(format!("Note label has no octave: {}", s)))?;
        let (name, octave) = s.split_at(split);
        let pitch_class = name.parse::<PitchClass>()?;
        let octave = octave
            .parse::<i32>()
            .map_err(|_| AnalysisError::InvalidInput(format!("Invalid octave in note label: {}", s)))?;
        Ok(Self::new(pitch_class, octave))
    }
}

/// Note label for a frequency, or `None` for frequencies ≤ 0
pub fn note_of(frequency: f32) -> Option<NoteLabel> {
    note_of_with_reference(frequency, A4_FREQUENCY)
}

/// Note label for a frequency against a custom A4 reference
pub fn note_of_with_reference(frequency: f32, reference: f32) -> Option<NoteLabel> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }
    Some(NoteLabel::from_midi(hz_to_midi_with_reference(
        frequency, reference,
    )))
}

/// Frequency of a note given by name, e.g. `note_to_hz("C2")`
pub fn note_to_hz(name: &str) -> Result<f32, AnalysisError> {
    Ok(name.parse::<NoteLabel>()?.frequency())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a440_is_a4() {
        let note = note_of(440.0).unwrap();
        assert_eq!(note, NoteLabel::new(PitchClass::A, 4));
        assert_eq!(note.to_string(), "A4");
    }

    #[test]
    fn test_non_positive_frequency_has_no_note() {
        assert!(note_of(0.0).is_none());
        assert!(note_of(-12.5).is_none());
        assert!(note_of(f32::NAN).is_none());
    }

    #[test]
    fn test_pitch_class_rounds_down() {
        // 439 Hz is a hair below A4 (midi ~68.996) and lands on G#4
        assert_eq!(note_of(439.0).unwrap().to_string(), "G#4");
        // 445 Hz is above A4 and stays on A4
        assert_eq!(note_of(445.0).unwrap().to_string(), "A4");
    }

    #[test]
    fn test_octave_boundaries() {
        assert_eq!(note_of(261.63).unwrap().to_string(), "C4");
        assert_eq!(note_of(65.41).unwrap().to_string(), "C2");
        assert_eq!(note_of(2093.1).unwrap().to_string(), "C7");
        assert_eq!(note_of(123.48).unwrap().to_string(), "B2");
    }

    #[test]
    fn test_labels_are_deterministic_and_chromatic() {
        let mut f = 30.0;
        while f < 5000.0 {
            let a = note_of(f).unwrap();
            let b = note_of(f).unwrap();
            assert_eq!(a, b);
            assert!(PITCH_CLASS_NAMES.contains(&a.pitch_class.name()));
            f *= 1.037;
        }
    }

    #[test]
    fn test_midi_conversions() {
        assert!((hz_to_midi(440.0) - 69.0).abs() < 1e-5);
        assert!((midi_to_hz(69.0) - 440.0).abs() < 1e-3);
        assert!((midi_to_hz(60.0) - 261.6256).abs() < 1e-2);
        assert!((hz_to_midi(midi_to_hz(47.3)) - 47.3).abs() < 1e-3);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("C#3".parse::<NoteLabel>().unwrap(), NoteLabel::new(PitchClass::CSharp, 3));
        assert_eq!("B-1".parse::<NoteLabel>().unwrap(), NoteLabel::new(PitchClass::B, -1));
        assert!("H4".parse::<NoteLabel>().is_err());
        assert!("A".parse::<NoteLabel>().is_err());
        assert!((note_to_hz("A4").unwrap() - 440.0).abs() < 1e-3);
    }

    #[test]
    fn test_strip_octave() {
        let note = NoteLabel::new(PitchClass::FSharp, 5);
        assert_eq!(note.strip_octave(), PitchClass::FSharp);
        assert_eq!(note.strip_octave().to_string(), "F#");
    }
}
