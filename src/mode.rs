//! # Scale Pattern Table
//!
//! Named modes and the cluster patterns the highlighter walks.
//!
//! A cluster pattern is a cycle of run lengths counted in whole tones: `[3, 4]`
//! means "three notes of one whole-tone scale, then four of the other". The
//! highlighter restarts the cycle at the next occurrence of its start pitch.
//!
//! | Mode       | Pattern   |
//! |------------|-----------|
//! | Ionian     | [3, 4]    |
//! | Dorian     | [2, 4, 1] |
//! | Phrygian   | [1, 4, 2] |
//! | Lydian     | [4, 3]    |
//! | Mixolydian | [3, 3, 1] |
//! | Aeolian    | [2, 3, 2] |
//! | Locrian    | [1, 3, 3] |
//! | Whole Tone | [6]       |
//!
//! Two synthetic patterns are built directly rather than looked up:
//! [`Pattern::whole_tone`] (`[6]`) and [`Pattern::alternating_whole_tones`]
//! (twelve `1`s, flipping color on every key, used as a background layer).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::KeyboardError;

/// The seven diatonic modes plus the whole-tone scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Mode {
    #[default]
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    #[serde(rename = "Whole Tone")]
    WholeTone,
}

impl Mode {
    /// All modes in table order
    pub const ALL: [Mode; 8] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
        Mode::WholeTone,
    ];

    pub fn pattern(self) -> &'static [usize] {
        match self {
            Mode::Ionian => &[3, 4],
            Mode::Dorian => &[2, 4, 1],
            Mode::Phrygian => &[1, 4, 2],
            Mode::Lydian => &[4, 3],
            Mode::Mixolydian => &[3, 3, 1],
            Mode::Aeolian => &[2, 3, 2],
            Mode::Locrian => &[1, 3, 3],
            Mode::WholeTone => &[6],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Ionian => "Ionian",
            Mode::Dorian => "Dorian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Aeolian => "Aeolian",
            Mode::Locrian => "Locrian",
            Mode::WholeTone => "Whole Tone",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = KeyboardError;

    /// Parse a mode name, case-insensitively.
    ///
    /// Also accepts "Major"/"Minor", the "Aeolean"/"Locrean" spellings, and
    /// `whole-tone`/`wholetone`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.trim().to_ascii_lowercase().as_str() {
            "ionian" | "major" => Mode::Ionian,
            "dorian" => Mode::Dorian,
            "phrygian" => Mode::Phrygian,
            "lydian" => Mode::Lydian,
            "mixolydian" => Mode::Mixolydian,
            "aeolian" | "aeolean" | "minor" => Mode::Aeolian,
            "locrian" | "locrean" => Mode::Locrian,
            "whole tone" | "whole-tone" | "wholetone" => Mode::WholeTone,
            _ => return Err(KeyboardError::UnknownMode(s.to_string())),
        };
        Ok(mode)
    }
}

/// A cycle of cluster sizes
///
/// Entries must be non-empty and positive; the highlighter indexes it without
/// checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern(Vec<usize>);

impl Pattern {
    pub fn new(entries: Vec<usize>) -> Self {
        Self(entries)
    }

    pub fn from_mode(mode: Mode) -> Self {
        Self(mode.pattern().to_vec())
    }

    /// Six whole tones in a single run
    pub fn whole_tone() -> Self {
        Self(vec![6])
    }

    /// Twelve runs of one, alternating color on every key
    pub fn alternating_whole_tones() -> Self {
        Self(vec![1; 12])
    }

    pub fn entries(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Notes highlighted in one full pass of the cycle
    pub fn cycle_length(&self) -> usize {
        self.0.iter().sum()
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::from_mode(Mode::Ionian)
    }
}

impl From<Mode> for Pattern {
    fn from(mode: Mode) -> Self {
        Self::from_mode(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diatonic_patterns_cover_seven_notes() {
        for mode in Mode::ALL.iter().filter(|m| **m != Mode::WholeTone) {
            assert_eq!(
                Pattern::from_mode(*mode).cycle_length(),
                7,
                "{} should highlight 7 notes per cycle",
                mode
            );
        }
        assert_eq!(Pattern::from_mode(Mode::WholeTone).cycle_length(), 6);
    }

    #[test]
    fn test_mode_table() {
        assert_eq!(Mode::Ionian.pattern(), &[3, 4]);
        assert_eq!(Mode::Dorian.pattern(), &[2, 4, 1]);
        assert_eq!(Mode::Phrygian.pattern(), &[1, 4, 2]);
        assert_eq!(Mode::Lydian.pattern(), &[4, 3]);
        assert_eq!(Mode::Mixolydian.pattern(), &[3, 3, 1]);
        assert_eq!(Mode::Aeolian.pattern(), &[2, 3, 2]);
        assert_eq!(Mode::Locrian.pattern(), &[1, 3, 3]);
        assert_eq!(Mode::WholeTone.pattern(), &[6]);
    }

    #[test]
    fn test_synthetic_patterns() {
        assert_eq!(Pattern::whole_tone().entries(), &[6]);
        let alternating = Pattern::alternating_whole_tones();
        assert_eq!(alternating.len(), 12);
        assert!(alternating.entries().iter().all(|&n| n == 1));
        assert_eq!(Pattern::default(), Pattern::from_mode(Mode::Ionian));
    }

    #[test]
    fn test_parse_mode() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!("aeolean".parse::<Mode>().unwrap(), Mode::Aeolian);
        assert_eq!("Locrean".parse::<Mode>().unwrap(), Mode::Locrian);
        assert_eq!("whole-tone".parse::<Mode>().unwrap(), Mode::WholeTone);
        assert_eq!(
            "Blues".parse::<Mode>(),
            Err(KeyboardError::UnknownMode("Blues".to_string()))
        );
    }
}
