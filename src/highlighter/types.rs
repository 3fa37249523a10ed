//! Highlighter option and annotation types

use serde::{Deserialize, Serialize};

use crate::mode::Pattern;
use crate::note::{NoteName, Pitch};

/// Color tag written to a note's `highlight` and `bracket_color`
///
/// Serializes to the tag the stylesheet uses (`"color-1"`, `"color-2 lighten"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HighlightColor {
    #[serde(rename = "color-1")]
    Color1,
    #[serde(rename = "color-2")]
    Color2,
    #[serde(rename = "color-1 lighten")]
    Color1Light,
    #[serde(rename = "color-2 lighten")]
    Color2Light,
}

impl HighlightColor {
    pub fn tag(self) -> &'static str {
        match self {
            HighlightColor::Color1 => "color-1",
            HighlightColor::Color2 => "color-2",
            HighlightColor::Color1Light => "color-1 lighten",
            HighlightColor::Color2Light => "color-2 lighten",
        }
    }

    /// Class for a highlighted key, e.g. `tone-color-1`
    pub fn tone_class(self) -> String {
        format!("tone-{}", self.tag())
    }

    /// Class for a bracket segment, e.g. `bracket-color-2 lighten`
    pub fn bracket_class(self) -> String {
        format!("bracket-{}", self.tag())
    }
}

/// The four canonical color pairings (odd run color, even run color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    SingleFirst,
    SingleSecond,
    #[default]
    Dual,
    /// Lighter dual palette for background layers
    DualLight,
}

impl ColorScheme {
    pub fn colors(self) -> (HighlightColor, HighlightColor) {
        match self {
            ColorScheme::SingleFirst => (HighlightColor::Color1, HighlightColor::Color1),
            ColorScheme::SingleSecond => (HighlightColor::Color2, HighlightColor::Color2),
            ColorScheme::Dual => (HighlightColor::Color1, HighlightColor::Color2),
            ColorScheme::DualLight => (HighlightColor::Color1Light, HighlightColor::Color2Light),
        }
    }
}

/// What a highlighter draws under the keys it scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BracketStyle {
    /// No brackets or labels; highlights only
    #[default]
    None,
    /// Label each highlighted note with its position in the current run
    #[serde(alias = "run-num")]
    RunNumber,
    /// Label each highlighted note with its position in the pattern cycle
    #[serde(alias = "scale-num")]
    ScaleNumber,
    /// Label each highlighted note r (root), h (half step) or w (whole step)
    WholeHalf,
}

/// Run parity; selects the odd or even color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn flip(self) -> Self {
        match self {
            Parity::Odd => Parity::Even,
            Parity::Even => Parity::Odd,
        }
    }
}

/// How the scan reached the note it is highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Root,
    Half,
    Whole,
}

impl Step {
    /// Single-letter whole-half label
    pub fn label(self) -> &'static str {
        match self {
            Step::Root => "r",
            Step::Half => "h",
            Step::Whole => "w",
        }
    }
}

/// Configuration for one highlighter
///
/// Fixed for the duration of a scan; the keyboard may change the start pitch
/// or pattern between scans.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlighterOptions {
    /// Pitch whose spelling (octave ignored) starts each pattern cycle
    pub start: Pitch,
    pub pattern: Pattern,
    pub odd_color: HighlightColor,
    pub even_color: HighlightColor,
    /// Only fed revealed notes, and marks highlighted notes playable
    pub animate: bool,
    pub bracket_style: BracketStyle,
    /// Draw this layer even when background highlighting is switched off
    pub force_background: bool,
}

impl HighlighterOptions {
    pub fn color_for(&self, parity: Parity) -> HighlightColor {
        match parity {
            Parity::Odd => self.odd_color,
            Parity::Even => self.even_color,
        }
    }
}

impl Default for HighlighterOptions {
    fn default() -> Self {
        let (odd_color, even_color) = ColorScheme::Dual.colors();
        Self {
            start: Pitch::natural(NoteName::C, 4),
            pattern: Pattern::default(),
            odd_color,
            even_color,
            animate: false,
            bracket_style: BracketStyle::None,
            force_background: false,
        }
    }
}
