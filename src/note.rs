//! # Note Indexing
//!
//! Pitches, keyboard notes, and the conversion between a spelled pitch and its
//! chromatic index.
//!
//! ## Chromatic Index
//! ```text
//! index = octave * 12 + letter offset + accidental offset
//!
//! letter:      C  D  E  F  G  A  B
//! offset:      0  2  4  5  7  9  11
//! accidental:  # = +1, b = -1, natural = 0
//! ```
//! The index is the only ordering key used by the highlighter. Spelling is kept
//! for display and for matching a scan's start pitch (`C#` never matches `Db`).
//!
//! ## Inverse Mapping
//! [`Pitch::at`] always spells black keys as the sharp of the natural below
//! (C#, D#, F#, G#, A#). Flats only ever come from direct input.
//!
//! ## Notes
//! A [`Note`] is one keyboard key: its pitch plus the annotation fields the
//! highlighter writes (`highlight`, `bracket`, `bracket_color`,
//! `bracket_label`, `playable`). Notes are plain values, shared by every
//! highlighter that scans them; whichever highlighter writes a field last wins.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::KeyboardError;
use crate::highlighter::HighlightColor;

/// Natural note letters C through B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum NoteName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Semitone offset of the natural letter from C
    pub fn offset(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

/// Accidental applied to a natural letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    Natural,
    Sharp, // #
    Flat,  // b
}

impl Accidental {
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// Key color on a piano keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    White,
    Black,
}

/// A spelled pitch: natural letter, accidental and octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Pitch {
    pub name: NoteName,
    pub accidental: Accidental,
    pub octave: i32,
}

impl Pitch {
    pub fn new(name: NoteName, accidental: Accidental, octave: i32) -> Self {
        Self {
            name,
            accidental,
            octave,
        }
    }

    /// A natural pitch, e.g. `Pitch::natural(NoteName::C, 0)` for C0
    pub fn natural(name: NoteName, octave: i32) -> Self {
        Self::new(name, Accidental::Natural, octave)
    }

    pub fn sharp(name: NoteName, octave: i32) -> Self {
        Self::new(name, Accidental::Sharp, octave)
    }

    pub fn flat(name: NoteName, octave: i32) -> Self {
        Self::new(name, Accidental::Flat, octave)
    }

    /// Chromatic index of this pitch.
    ///
    /// # Example
    /// ```
    /// use wholetone::Pitch;
    ///
    /// let cs1: Pitch = "C#1".parse().unwrap();
    /// assert_eq!(cs1.index(), 13);
    /// let bb0: Pitch = "Bb0".parse().unwrap();
    /// assert_eq!(bb0.index(), 10);
    /// ```
    pub fn index(&self) -> i32 {
        self.octave * 12 + self.name.offset() + self.accidental.offset()
    }

    /// Pitch for a chromatic index, black keys spelled as sharps.
    ///
    /// `Pitch::at(i).index() == i` for every `i`.
    pub fn at(index: i32) -> Self {
        let octave = index.div_euclid(12);
        let (name, accidental) = match index.rem_euclid(12) {
            0 => (NoteName::C, Accidental::Natural),
            1 => (NoteName::C, Accidental::Sharp),
            2 => (NoteName::D, Accidental::Natural),
            3 => (NoteName::D, Accidental::Sharp),
            4 => (NoteName::E, Accidental::Natural),
            5 => (NoteName::F, Accidental::Natural),
            6 => (NoteName::F, Accidental::Sharp),
            7 => (NoteName::G, Accidental::Natural),
            8 => (NoteName::G, Accidental::Sharp),
            9 => (NoteName::A, Accidental::Natural),
            10 => (NoteName::A, Accidental::Sharp),
            11 => (NoteName::B, Accidental::Natural),
            _ => unreachable!(),
        };
        Self::new(name, accidental, octave)
    }

    /// Letter and accidental match, octave ignored
    pub fn same_spelling(&self, other: &Pitch) -> bool {
        self.name == other.name && self.accidental == other.accidental
    }

    pub fn key_color(&self) -> KeyColor {
        match self.accidental {
            Accidental::Natural => KeyColor::White,
            _ => KeyColor::Black,
        }
    }

    /// Key label without octave, using ♯/♭ glyphs
    pub fn pretty_name(&self) -> String {
        let glyph = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "♯",
            Accidental::Flat => "♭",
        };
        format!("{}{}", self.name.as_char(), glyph)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acc = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}{}", self.name.as_char(), acc, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = KeyboardError;

    /// Parse a compact pitch name like `"C0"`, `"C#0"`, `"Bb-1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |message: String| KeyboardError::PitchError {
            input: s.to_string(),
            message,
        };

        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let first = chars.next().ok_or_else(|| err("empty pitch".to_string()))?;
        let name = NoteName::from_char(first)
            .ok_or_else(|| err(format!("unknown note letter '{}'", first)))?;

        let rest = chars.as_str();
        let (accidental, octave_str) = match rest.chars().next() {
            Some('#') => (Accidental::Sharp, &rest[1..]),
            Some('b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };

        let octave = octave_str
            .parse::<i32>()
            .map_err(|_| err(format!("invalid octave '{}'", octave_str)))?;

        Ok(Self::new(name, accidental, octave))
    }
}

/// One keyboard key and its highlight annotations
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub pitch: Pitch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket: Option<Bracket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket_color: Option<HighlightColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket_label: Option<String>,
    pub playable: bool,
}

impl Note {
    pub fn new(pitch: Pitch) -> Self {
        Self {
            pitch,
            ..Default::default()
        }
    }

    pub fn index(&self) -> i32 {
        self.pitch.index()
    }

    /// Drop everything a highlighter may have written
    pub fn clear_annotations(&mut self) {
        self.highlight = None;
        self.bracket = None;
        self.bracket_color = None;
        self.bracket_label = None;
        self.playable = false;
    }
}

impl From<Pitch> for Note {
    fn from(pitch: Pitch) -> Self {
        Note::new(pitch)
    }
}

/// Position of a note within a drawn bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bracket {
    Left,
    Middle,
    Right,
    Solo,
}

impl Bracket {
    /// CSS classes for the bracket segment drawn under a key
    pub fn css_classes(self) -> &'static str {
        match self {
            Bracket::Left => "left middle",
            Bracket::Middle => "middle",
            Bracket::Right => "middle right",
            Bracket::Solo => "left middle right",
        }
    }
}

/// Materialize one fresh note per chromatic index in `[from, to)`.
///
/// # Example
/// ```
/// use wholetone::{notes_in_range, Pitch};
///
/// let notes = notes_in_range(&"C0".parse().unwrap(), &"C1".parse().unwrap());
/// assert_eq!(notes.len(), 12);
/// assert_eq!(notes[1].pitch.to_string(), "C#0");
/// ```
pub fn notes_in_range(from: &Pitch, to: &Pitch) -> Vec<Note> {
    (from.index()..to.index())
        .map(|index| Note::new(Pitch::at(index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for i in -24..120 {
            assert_eq!(Pitch::at(i).index(), i, "round trip failed for {}", i);
        }
    }

    #[test]
    fn test_index_of_spelled_pitches() {
        assert_eq!(Pitch::natural(NoteName::C, 0).index(), 0);
        assert_eq!(Pitch::natural(NoteName::B, 0).index(), 11);
        assert_eq!(Pitch::natural(NoteName::A, 4).index(), 57);
        assert_eq!(Pitch::sharp(NoteName::F, 1).index(), 18);
        // Db and C# share an index but not a spelling
        let db = Pitch::flat(NoteName::D, 2);
        let cs = Pitch::sharp(NoteName::C, 2);
        assert_eq!(db.index(), cs.index());
        assert!(!db.same_spelling(&cs));
        // Cb wraps below its octave
        assert_eq!(Pitch::flat(NoteName::C, 1).index(), 11);
    }

    #[test]
    fn test_pitch_at_spells_sharps() {
        assert_eq!(Pitch::at(1), Pitch::sharp(NoteName::C, 0));
        assert_eq!(Pitch::at(10), Pitch::sharp(NoteName::A, 0));
        assert_eq!(Pitch::at(-1), Pitch::natural(NoteName::B, -1));
        assert_eq!(Pitch::at(-11), Pitch::sharp(NoteName::C, -1));
        assert_eq!(Pitch::at(36), Pitch::natural(NoteName::C, 3));
    }

    #[test]
    fn test_parse_pitch() {
        assert_eq!("C0".parse::<Pitch>().unwrap(), Pitch::natural(NoteName::C, 0));
        assert_eq!("C#0".parse::<Pitch>().unwrap(), Pitch::sharp(NoteName::C, 0));
        assert_eq!("Eb3".parse::<Pitch>().unwrap(), Pitch::flat(NoteName::E, 3));
        assert_eq!("A-1".parse::<Pitch>().unwrap(), Pitch::natural(NoteName::A, -1));
        assert_eq!("Gb-2".parse::<Pitch>().unwrap().index(), -18);
    }

    #[test]
    fn test_parse_pitch_errors() {
        assert!(matches!(
            "X0".parse::<Pitch>(),
            Err(KeyboardError::PitchError { .. })
        ));
        assert!("C".parse::<Pitch>().is_err());
        assert!("C#".parse::<Pitch>().is_err());
        assert!("".parse::<Pitch>().is_err());
        assert!("c4".parse::<Pitch>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for name in ["C0", "C#0", "Bb-1", "F#7", "A3"] {
            let pitch: Pitch = name.parse().unwrap();
            assert_eq!(pitch.to_string(), name);
        }
    }

    #[test]
    fn test_key_color_and_pretty_name() {
        let fs: Pitch = "F#2".parse().unwrap();
        assert_eq!(fs.key_color(), KeyColor::Black);
        assert_eq!(fs.pretty_name(), "F♯");
        let bb: Pitch = "Bb2".parse().unwrap();
        assert_eq!(bb.pretty_name(), "B♭");
        let g: Pitch = "G2".parse().unwrap();
        assert_eq!(g.key_color(), KeyColor::White);
        assert_eq!(g.pretty_name(), "G");
    }

    #[test]
    fn test_bracket_css_classes() {
        assert_eq!(Bracket::Left.css_classes(), "left middle");
        assert_eq!(Bracket::Middle.css_classes(), "middle");
        assert_eq!(Bracket::Right.css_classes(), "middle right");
        assert_eq!(Bracket::Solo.css_classes(), "left middle right");
    }

    #[test]
    fn test_notes_in_range() {
        let from: Pitch = "C0".parse().unwrap();
        let to: Pitch = "C3".parse().unwrap();
        let notes = notes_in_range(&from, &to);
        assert_eq!(notes.len(), 36);
        assert_eq!(notes[0].index(), 0);
        assert_eq!(notes[35].index(), 35);
        assert!(notes.iter().all(|n| n.highlight.is_none() && !n.playable));

        // Empty when the range is inverted
        assert!(notes_in_range(&to, &from).is_empty());
    }

    #[test]
    fn test_clear_annotations() {
        let mut note = Note::new(Pitch::at(0));
        note.highlight = Some(HighlightColor::Color1);
        note.bracket = Some(Bracket::Left);
        note.bracket_color = Some(HighlightColor::Color2);
        note.bracket_label = Some("1".to_string());
        note.playable = true;
        note.clear_annotations();
        assert_eq!(note, Note::new(Pitch::at(0)));
    }
}
