//! # Keyboard Configuration
//!
//! Describe a keyboard and its highlighter layers in YAML.
//!
//! Parsing is two-stage: serde fills the kebab-case `Raw*` structs with plain
//! strings and options, then [`KeyboardConfig::from_raw`] resolves pitches,
//! modes and patterns and applies defaults.
//!
//! ## Example
//! ```rust
//! use wholetone::config::KeyboardConfig;
//!
//! let config = KeyboardConfig::parse(
//!     "from: C0\nto: C1\nscale:\n  start: D0\n  mode: dorian\n",
//! )
//! .unwrap();
//! let mut keyboard = config.build();
//! keyboard.set_progress(1.0);
//! assert_eq!(keyboard.notes()[2].bracket_label.as_deref(), Some("1"));
//! ```

use serde::Deserialize;

use crate::error::KeyboardError;
use crate::highlighter::{BracketStyle, ColorScheme, HighlighterOptions, ModeBuilder};
use crate::keyboard::{Keyboard, Settings};
use crate::mode::{Mode, Pattern};
use crate::note::{NoteName, Pitch};

/// Raw keyboard description for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawKeyboardConfig {
    pub from: Option<String>,
    pub to: Option<String>,
    pub settings: Option<RawSettings>,
    pub scale: Option<RawLayer>,
    #[serde(default)]
    pub layers: Vec<RawLayer>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawSettings {
    pub background_highlight: Option<bool>,
    pub note_names: Option<bool>,
    pub sound: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawLayer {
    pub start: Option<String>,
    pub mode: Option<String>,
    pub pattern: Option<RawPattern>,
    pub brackets: Option<BracketStyle>,
    pub colors: Option<ColorScheme>,
    pub animate: Option<bool>,
    /// Draw as a background layer instead of a static one
    #[serde(default)]
    pub background: bool,
    #[serde(default)]
    pub force_background: bool,
}

/// A pattern given by name (`whole-tone`, `dorian`, ...) or as run lengths
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawPattern {
    Named(String),
    Runs(Vec<usize>),
}

/// A validated keyboard description
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardConfig {
    pub from: Pitch,
    pub to: Pitch,
    pub settings: Settings,
    /// Replaces the default whole-tone background when non-empty
    pub background: Vec<HighlighterOptions>,
    pub layers: Vec<HighlighterOptions>,
    pub scale: Option<HighlighterOptions>,
}

impl KeyboardConfig {
    /// Parse and validate a YAML keyboard description
    pub fn parse(yaml: &str) -> Result<Self, KeyboardError> {
        let raw: RawKeyboardConfig =
            serde_yaml::from_str(yaml).map_err(|e| KeyboardError::ConfigError(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawKeyboardConfig) -> Result<Self, KeyboardError> {
        let from = match &raw.from {
            Some(s) => s.parse()?,
            None => Pitch::natural(NoteName::C, 0),
        };
        let to = match &raw.to {
            Some(s) => s.parse()?,
            None => Pitch::natural(NoteName::C, 3),
        };
        if to.index() < from.index() {
            return Err(KeyboardError::ConfigError(format!(
                "range ends at {} before it starts at {}",
                to, from
            )));
        }

        let settings = raw.settings.map(resolve_settings).unwrap_or_default();

        let mut background = Vec::new();
        let mut layers = Vec::new();
        for layer in &raw.layers {
            let opts = resolve_layer(layer, ModeBuilder::new(Pitch::natural(NoteName::C, 0)))?;
            if layer.background {
                background.push(opts);
            } else {
                layers.push(opts);
            }
        }

        let scale = match &raw.scale {
            Some(layer) => {
                let base = ModeBuilder::new(Pitch::natural(NoteName::C, 0))
                    .color_dual()
                    .brackets_run_numbers()
                    .animate();
                Some(resolve_layer(layer, base)?)
            }
            None => None,
        };

        Ok(Self {
            from,
            to,
            settings,
            background,
            layers,
            scale,
        })
    }

    /// Assemble the orchestrated keyboard
    pub fn build(&self) -> Keyboard {
        let mut keyboard = Keyboard::new(self.from, self.to);
        keyboard.set_settings(self.settings);
        if !self.background.is_empty() {
            keyboard.set_background_layers(self.background.iter().cloned().map(Into::into).collect());
        }
        for opts in &self.layers {
            keyboard.add_layer(opts.clone().into());
        }
        if let Some(opts) = &self.scale {
            keyboard.set_scale(opts.clone().into());
        }
        keyboard
    }
}

fn resolve_settings(raw: RawSettings) -> Settings {
    let defaults = Settings::default();
    Settings {
        background_highlight: raw
            .background_highlight
            .unwrap_or(defaults.background_highlight),
        note_names: raw.note_names.unwrap_or(defaults.note_names),
        sound: raw.sound.unwrap_or(defaults.sound),
    }
}

/// Layer fields override whatever `base` already set
fn resolve_layer(raw: &RawLayer, base: ModeBuilder) -> Result<HighlighterOptions, KeyboardError> {
    let mut builder = base;

    if let Some(start) = &raw.start {
        builder = builder.note(start.parse()?);
    }

    match (&raw.mode, &raw.pattern) {
        (Some(_), Some(_)) => {
            return Err(KeyboardError::ConfigError(
                "a layer takes either a mode or a pattern, not both".to_string(),
            ))
        }
        (Some(mode), None) => builder = builder.mode(mode.parse::<Mode>()?),
        (None, Some(pattern)) => builder = builder.pattern(resolve_pattern(pattern)?),
        (None, None) => {}
    }

    if let Some(style) = raw.brackets {
        builder = builder.brackets(style);
    }
    if let Some(scheme) = raw.colors {
        builder = builder.colors(scheme);
    }

    let mut opts = builder.options();
    if let Some(animate) = raw.animate {
        opts.animate = animate;
    }
    opts.force_background |= raw.force_background;
    Ok(opts)
}

fn resolve_pattern(raw: &RawPattern) -> Result<Pattern, KeyboardError> {
    match raw {
        RawPattern::Named(name) => match name.trim().to_ascii_lowercase().as_str() {
            "alternating-whole-tones" | "alternating" => Ok(Pattern::alternating_whole_tones()),
            _ => Ok(Pattern::from_mode(name.parse()?)),
        },
        RawPattern::Runs(runs) => {
            if runs.is_empty() {
                return Err(KeyboardError::ConfigError("pattern is empty".to_string()));
            }
            if runs.contains(&0) {
                return Err(KeyboardError::ConfigError(format!(
                    "pattern {:?} has a run of length 0",
                    runs
                )));
            }
            Ok(Pattern::new(runs.clone()))
        }
    }
}
