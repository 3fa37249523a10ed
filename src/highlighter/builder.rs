//! Fluent construction of highlighters from named presets

use crate::mode::{Mode, Pattern};
use crate::note::Pitch;

use super::engine::Highlighter;
use super::types::{BracketStyle, ColorScheme, HighlightColor, HighlighterOptions};

/// Field-by-field builder for [`HighlighterOptions`]
///
/// Unset fields keep their defaults: start C4, Ionian pattern, dual colors,
/// no brackets, not animated.
#[derive(Debug, Clone, Default)]
pub struct HighlighterOptionsBuilder {
    opts: HighlighterOptions,
}

impl HighlighterOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: Pitch) -> Self {
        self.opts.start = start;
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.opts.pattern = pattern;
        self
    }

    pub fn odd_color(mut self, color: HighlightColor) -> Self {
        self.opts.odd_color = color;
        self
    }

    pub fn even_color(mut self, color: HighlightColor) -> Self {
        self.opts.even_color = color;
        self
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.opts.animate = animate;
        self
    }

    pub fn bracket_style(mut self, style: BracketStyle) -> Self {
        self.opts.bracket_style = style;
        self
    }

    pub fn force_background(mut self, force: bool) -> Self {
        self.opts.force_background = force;
        self
    }

    pub fn build(&self) -> HighlighterOptions {
        self.opts.clone()
    }
}

/// Preset-driven highlighter builder
///
/// The builder is not consumed by [`build`](ModeBuilder::build), so one
/// configuration can be reused for several start notes:
///
/// ```
/// use wholetone::{ModeBuilder, Pitch};
///
/// let builder = ModeBuilder::new("C0".parse().unwrap())
///     .ionian()
///     .color_single_first()
///     .brackets_whole_half()
///     .animate();
/// let c_major = builder.build();
/// let d_major = builder.note("D0".parse().unwrap()).build();
///
/// assert_eq!(c_major.options().pattern, d_major.options().pattern);
/// assert_eq!(d_major.options().start.to_string(), "D0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModeBuilder {
    opts: HighlighterOptionsBuilder,
}

impl ModeBuilder {
    pub fn new(start: Pitch) -> Self {
        Self {
            opts: HighlighterOptionsBuilder::new().start(start),
        }
    }

    /// Change the start note
    pub fn note(mut self, start: Pitch) -> Self {
        self.opts = self.opts.start(start);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.opts = self.opts.pattern(Pattern::from_mode(mode));
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.opts = self.opts.pattern(pattern);
        self
    }

    pub fn whole_tone(self) -> Self {
        self.pattern(Pattern::whole_tone())
    }

    pub fn alternating_whole_tones(self) -> Self {
        self.pattern(Pattern::alternating_whole_tones())
    }

    pub fn ionian(self) -> Self {
        self.mode(Mode::Ionian)
    }

    pub fn dorian(self) -> Self {
        self.mode(Mode::Dorian)
    }

    pub fn phrygian(self) -> Self {
        self.mode(Mode::Phrygian)
    }

    pub fn lydian(self) -> Self {
        self.mode(Mode::Lydian)
    }

    pub fn mixolydian(self) -> Self {
        self.mode(Mode::Mixolydian)
    }

    pub fn aeolian(self) -> Self {
        self.mode(Mode::Aeolian)
    }

    pub fn locrian(self) -> Self {
        self.mode(Mode::Locrian)
    }

    pub fn brackets(mut self, style: BracketStyle) -> Self {
        self.opts = self.opts.bracket_style(style);
        self
    }

    pub fn brackets_whole_half(self) -> Self {
        self.brackets(BracketStyle::WholeHalf)
    }

    pub fn brackets_run_numbers(self) -> Self {
        self.brackets(BracketStyle::RunNumber)
    }

    pub fn brackets_scale_numbers(self) -> Self {
        self.brackets(BracketStyle::ScaleNumber)
    }

    pub fn animate(mut self) -> Self {
        self.opts = self.opts.animate(true);
        self
    }

    pub fn force_background(mut self) -> Self {
        self.opts = self.opts.force_background(true);
        self
    }

    pub fn colors(mut self, scheme: ColorScheme) -> Self {
        let (odd, even) = scheme.colors();
        self.opts = self.opts.odd_color(odd).even_color(even);
        self
    }

    pub fn color_single_first(self) -> Self {
        self.colors(ColorScheme::SingleFirst)
    }

    pub fn color_single_second(self) -> Self {
        self.colors(ColorScheme::SingleSecond)
    }

    pub fn color_dual(self) -> Self {
        self.colors(ColorScheme::Dual)
    }

    pub fn color_dual_light(self) -> Self {
        self.colors(ColorScheme::DualLight)
    }

    pub fn options(&self) -> HighlighterOptions {
        self.opts.build()
    }

    /// A fresh highlighter bound to the current configuration
    pub fn build(&self) -> Highlighter {
        Highlighter::new(self.opts.build())
    }
}
