//! # Keyboard Orchestration
//!
//! Drives every highlighter layer over one materialized keyboard range as the
//! reveal progress changes, and exposes the runtime controls (scale root,
//! scale mode, settings).
//!
//! ## Re-scan Contract
//! Each time the topmost revealed note changes:
//! 1. Every note's annotations are cleared
//! 2. Every active layer is reset
//! 3. Each layer, in order, is fed the notes from the bottom of the keyboard:
//!    animated layers only up to the topmost revealed note, static layers all
//!    of them
//!
//! Nothing carries over between frames, so scrubbing back and forth always
//! shows exactly what a fresh scan would.
//!
//! ## Layer Order
//! ```text
//! background layers   (only with background highlighting on, or forced)
//! static layers
//! scale layer         (foreground; root and mode can change at runtime)
//! ```
//! Later layers win any annotation field they write.
//!
//! ## Playback
//! The keyboard never plays audio. After a re-scan it returns a
//! [`PlaybackEvent`] when the reveal animation has finished, sound is enabled,
//! and the newly revealed top note is playable.

use log::debug;
use serde::Serialize;

use crate::highlighter::{BracketStyle, Highlighter, ModeBuilder};
use crate::mode::{Mode, Pattern};
use crate::note::{notes_in_range, KeyColor, Note, NoteName, Pitch};

/// Progress below this reveals nothing
const MIN_PROGRESS: f64 = 0.001;

/// Octaves the player shifts every note up by
const PLAYBACK_OCTAVE: i32 = 4;

/// Note length for reveal playback (a sixteenth)
const PLAYBACK_LENGTH: u8 = 16;

/// Global display and sound toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Draw background layers (the whole-tone color wash)
    pub background_highlight: bool,
    /// Label keys with their note names
    pub note_names: bool,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_highlight: false,
            note_names: true,
            sound: true,
        }
    }
}

/// Request to sound one note, produced when a playable note is revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackEvent {
    pub pitch: Pitch,
    pub midi_note: i32,
    /// Note length as a fraction of a whole note (16 = sixteenth)
    pub length: u8,
}

impl PlaybackEvent {
    pub fn for_pitch(pitch: Pitch) -> Self {
        Self {
            pitch,
            midi_note: pitch.index() + 12 * PLAYBACK_OCTAVE,
            length: PLAYBACK_LENGTH,
        }
    }
}

/// Everything a renderer needs to draw one key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyView {
    pub index: i32,
    pub key_color: KeyColor,
    pub highlight_class: Option<String>,
    pub bracket_classes: Option<&'static str>,
    pub bracket_color_class: Option<String>,
    pub bracket_label: Option<String>,
    /// Note name, present only when note names are enabled
    pub label: Option<String>,
    pub playable: bool,
}

/// The default background: alternating whole tones in the light palette
pub fn whole_tone_background() -> Highlighter {
    ModeBuilder::new(Pitch::natural(NoteName::C, 0))
        .alternating_whole_tones()
        .color_dual_light()
        .build()
}

/// Foreground scale layer: dual colors, run-number brackets, animated
pub fn scale_layer(start: Pitch, mode: Mode) -> Highlighter {
    ModeBuilder::new(start)
        .mode(mode)
        .color_dual()
        .brackets_run_numbers()
        .animate()
        .build()
}

/// Top note index of the last drawn frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drawn {
    Never,
    /// `None` when nothing was revealed
    At(Option<usize>),
}

/// An orchestrated keyboard: one note range plus its highlighter layers
#[derive(Debug, Clone)]
pub struct Keyboard {
    from: Pitch,
    to: Pitch,
    notes: Vec<Note>,
    background: Vec<Highlighter>,
    layers: Vec<Highlighter>,
    scale: Option<Highlighter>,
    settings: Settings,
    progress: f64,
    drawn: Drawn,
    revealed: bool,
}

impl Keyboard {
    /// A keyboard over `[from, to)` with the default whole-tone background
    /// and no other layers.
    pub fn new(from: Pitch, to: Pitch) -> Self {
        Self {
            from,
            to,
            notes: notes_in_range(&from, &to),
            background: vec![whole_tone_background()],
            layers: Vec::new(),
            scale: None,
            settings: Settings::default(),
            progress: 0.0,
            drawn: Drawn::Never,
            revealed: false,
        }
    }

    /// Keyboard with a foreground scale layer
    pub fn with_scale(from: Pitch, to: Pitch, start: Pitch, mode: Mode) -> Self {
        let mut keyboard = Self::new(from, to);
        keyboard.scale = Some(scale_layer(start, mode));
        keyboard
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn range(&self) -> (Pitch, Pitch) {
        (self.from, self.to)
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn scale(&self) -> Option<&Highlighter> {
        self.scale.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Replace the background layers (drawn first, see [`Settings`])
    pub fn set_background_layers(&mut self, layers: Vec<Highlighter>) {
        self.background = layers;
        self.redraw();
    }

    pub fn add_background_layer(&mut self, layer: Highlighter) {
        self.background.push(layer);
        self.redraw();
    }

    /// Add a static layer, drawn after the background and before the scale
    pub fn add_layer(&mut self, layer: Highlighter) {
        self.layers.push(layer);
        self.redraw();
    }

    /// Replace the foreground scale layer
    pub fn set_scale(&mut self, layer: Highlighter) {
        self.scale = Some(layer);
        self.redraw();
    }

    /// Re-materialize the notes for a new range
    pub fn set_range(&mut self, from: Pitch, to: Pitch) {
        debug!("keyboard range {}..{}", from, to);
        self.from = from;
        self.to = to;
        self.notes = notes_in_range(&from, &to);
        self.redraw();
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.redraw();
    }

    /// Move the scale layer's root. No-op without a scale layer.
    pub fn set_scale_start(&mut self, start: Pitch) {
        let Some(scale) = self.scale.as_mut() else {
            debug!("no scale layer to move to {}", start);
            return;
        };
        debug!("scale root {} -> {}", scale.options().start, start);
        scale.set_start(start);
        self.redraw();
    }

    /// Move the scale layer's root by `semitones`, respelled with sharps
    pub fn transpose_scale(&mut self, semitones: i32) {
        if let Some(start) = self.scale.as_ref().map(|s| s.options().start) {
            self.set_scale_start(Pitch::at(start.index() + semitones));
        }
    }

    /// Switch the scale layer to another mode. No-op without a scale layer.
    pub fn set_scale_mode(&mut self, mode: Mode) {
        let Some(scale) = self.scale.as_mut() else {
            debug!("no scale layer for mode {}", mode);
            return;
        };
        debug!("scale mode -> {}", mode);
        scale.set_pattern(Pattern::from_mode(mode));
        self.redraw();
    }

    /// Change how the scale layer labels its brackets
    pub fn set_scale_brackets(&mut self, style: BracketStyle) {
        if let Some(scale) = self.scale.as_ref() {
            let mut opts = scale.options().clone();
            opts.bracket_style = style;
            self.scale = Some(Highlighter::new(opts));
            self.redraw();
        }
    }

    /// Mark the intro reveal animation as finished; playback starts after this
    pub fn finish_reveal(&mut self) {
        self.revealed = true;
    }

    /// Update the reveal progress (0.0 to 1.0, values outside are clamped).
    ///
    /// Re-scans only when the topmost revealed note changes, and returns the
    /// note to sound if it should be played.
    pub fn set_progress(&mut self, progress: f64) -> Option<PlaybackEvent> {
        self.progress = progress;
        let top = self.top_index();
        if self.drawn == Drawn::At(top) {
            return None;
        }
        self.rescan(top);

        let note = self.notes.get(top?)?;
        if self.revealed && self.settings.sound && note.playable {
            let event = PlaybackEvent::for_pitch(note.pitch);
            debug!("play {} (midi {})", note.pitch, event.midi_note);
            Some(event)
        } else {
            None
        }
    }

    /// Index of the topmost revealed note at the current progress
    pub fn top_index(&self) -> Option<usize> {
        let progress = self.progress.clamp(0.0, 1.0);
        if progress >= MIN_PROGRESS {
            Some((progress * self.notes.len() as f64).floor() as usize)
        } else {
            None
        }
    }

    /// Render views for every key
    pub fn key_views(&self) -> Vec<KeyView> {
        self.notes
            .iter()
            .map(|note| KeyView {
                index: note.index(),
                key_color: note.pitch.key_color(),
                highlight_class: note.highlight.map(|c| c.tone_class()),
                bracket_classes: note.bracket.map(|b| b.css_classes()),
                bracket_color_class: note.bracket_color.map(|c| c.bracket_class()),
                bracket_label: note.bracket_label.clone(),
                label: self.settings.note_names.then(|| note.pitch.pretty_name()),
                playable: note.playable,
            })
            .collect()
    }

    /// Re-scan at the current progress even if the top note is unchanged
    pub fn redraw(&mut self) {
        let top = self.top_index();
        self.rescan(top);
    }

    fn rescan(&mut self, top: Option<usize>) {
        self.drawn = Drawn::At(top);
        for note in self.notes.iter_mut() {
            note.clear_annotations();
        }

        let show_background = self.settings.background_highlight;
        let mut active: Vec<&mut Highlighter> = self
            .background
            .iter_mut()
            .filter(|layer| show_background || layer.options().force_background)
            .chain(self.layers.iter_mut())
            .chain(self.scale.iter_mut())
            .collect();
        debug!("rescan top={:?} layers={}", top, active.len());

        for layer in active.iter_mut() {
            layer.reset();
        }
        let revealed = top.map_or(0, |t| t.saturating_add(1));
        for layer in active {
            let limit = if layer.options().animate {
                revealed.min(self.notes.len())
            } else {
                self.notes.len()
            };
            layer.feed(&mut self.notes[..limit]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighter::HighlightColor;

    fn pitch(name: &str) -> Pitch {
        name.parse().unwrap()
    }

    fn c_major_keyboard() -> Keyboard {
        Keyboard::with_scale(pitch("C0"), pitch("C3"), pitch("C0"), Mode::Ionian)
    }

    fn highlighted(keyboard: &Keyboard) -> Vec<i32> {
        keyboard
            .notes()
            .iter()
            .filter(|n| n.highlight.is_some())
            .map(|n| n.index())
            .collect()
    }

    #[test]
    fn test_nothing_revealed_at_zero_progress() {
        let mut keyboard = c_major_keyboard();
        assert_eq!(keyboard.set_progress(0.0), None);
        assert_eq!(keyboard.top_index(), None);
        assert!(highlighted(&keyboard).is_empty());
    }

    #[test]
    fn test_progress_reveals_animated_layer() {
        let mut keyboard = c_major_keyboard();
        keyboard.set_progress(0.2); // floor(0.2 * 36) = 7
        assert_eq!(keyboard.top_index(), Some(7));
        assert_eq!(highlighted(&keyboard), vec![0, 2, 4, 5, 7]);

        keyboard.set_progress(1.0);
        assert_eq!(highlighted(&keyboard).len(), 21);

        // Scrubbing back recomputes from scratch
        keyboard.set_progress(0.1); // top = 3
        assert_eq!(highlighted(&keyboard), vec![0, 2]);
        assert!(keyboard.notes()[4].bracket.is_none());
        assert!(!keyboard.notes()[4].playable);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let mut keyboard = c_major_keyboard();
        keyboard.set_progress(f64::INFINITY);
        assert_eq!(keyboard.top_index(), Some(36));
        assert_eq!(highlighted(&keyboard).len(), 21);

        keyboard.set_progress(1e300);
        assert_eq!(keyboard.top_index(), Some(36));

        keyboard.set_progress(-5.0);
        assert_eq!(keyboard.top_index(), None);
        assert!(highlighted(&keyboard).is_empty());

        keyboard.set_progress(f64::NAN);
        assert_eq!(keyboard.top_index(), None);
    }

    #[test]
    fn test_static_layers_ignore_progress() {
        let mut keyboard = Keyboard::new(pitch("C0"), pitch("C1"));
        keyboard.add_layer(ModeBuilder::new(pitch("C0")).ionian().build());
        keyboard.set_progress(0.0);
        assert_eq!(highlighted(&keyboard), vec![0, 2, 4, 5, 7, 9, 11]);
    }

    #[test]
    fn test_background_follows_setting() {
        let mut keyboard = c_major_keyboard();
        keyboard.set_progress(0.0);
        assert!(highlighted(&keyboard).is_empty());

        keyboard.set_settings(Settings {
            background_highlight: true,
            ..Settings::default()
        });
        assert_eq!(highlighted(&keyboard).len(), 36);
        assert_eq!(keyboard.notes()[1].highlight, Some(HighlightColor::Color2Light));
    }

    #[test]
    fn test_forced_background_ignores_setting() {
        let mut keyboard = Keyboard::new(pitch("C0"), pitch("C1"));
        keyboard.set_background_layers(vec![ModeBuilder::new(pitch("C0"))
            .alternating_whole_tones()
            .color_dual()
            .force_background()
            .build()]);
        assert!(!keyboard.settings().background_highlight);
        assert_eq!(highlighted(&keyboard).len(), 12);
    }

    #[test]
    fn test_scale_layer_draws_over_background() {
        let mut keyboard = c_major_keyboard();
        keyboard.set_settings(Settings {
            background_highlight: true,
            ..Settings::default()
        });
        keyboard.set_progress(1.0);
        let notes = keyboard.notes();
        assert_eq!(notes[0].highlight, Some(HighlightColor::Color1));
        assert_eq!(notes[5].highlight, Some(HighlightColor::Color2));
        assert_eq!(notes[6].highlight, Some(HighlightColor::Color1Light));
    }

    #[test]
    fn test_playback_waits_for_reveal() {
        let mut keyboard = c_major_keyboard();
        // top = floor(0.06 * 36) = 2 (D0), playable but intro not finished
        assert_eq!(keyboard.set_progress(0.06), None);

        keyboard.finish_reveal();
        // top = floor(0.12 * 36) = 4 (E0)
        let event = keyboard.set_progress(0.12).expect("E0 should play");
        assert_eq!(event.pitch, pitch("E0"));
        assert_eq!(event.midi_note, 52);
        assert_eq!(event.length, 16);

        // Same top note: no re-scan, no repeat
        assert_eq!(keyboard.set_progress(0.13), None);

        // top = floor(0.09 * 36) = 3 (D#0) is not in the scale
        assert_eq!(keyboard.set_progress(0.09), None);
    }

    #[test]
    fn test_sound_setting_silences_playback() {
        let mut keyboard = c_major_keyboard();
        keyboard.finish_reveal();
        keyboard.set_settings(Settings {
            sound: false,
            ..Settings::default()
        });
        assert_eq!(keyboard.set_progress(0.12), None);
        assert!(keyboard.notes()[4].playable);
    }

    #[test]
    fn test_transpose_scale() {
        let mut keyboard = c_major_keyboard();
        keyboard.set_progress(1.0);
        keyboard.transpose_scale(2);
        assert_eq!(keyboard.scale().unwrap().options().start, pitch("D0"));
        // D major from D0: D E F# G A B C#
        assert_eq!(
            &highlighted(&keyboard)[..7],
            &[2, 4, 6, 7, 9, 11, 13]
        );

        keyboard.transpose_scale(-3);
        assert_eq!(keyboard.scale().unwrap().options().start, pitch("B-1"));
    }

    #[test]
    fn test_change_scale_mode() {
        let mut keyboard = Keyboard::with_scale(pitch("C0"), pitch("C3"), pitch("A0"), Mode::Aeolian);
        keyboard.set_progress(1.0);
        assert_eq!(&highlighted(&keyboard)[..7], &[9, 11, 12, 14, 16, 17, 19]);

        keyboard.set_scale_mode(Mode::Dorian);
        // A dorian: A B C D E F# G
        assert_eq!(&highlighted(&keyboard)[..7], &[9, 11, 12, 14, 16, 18, 19]);
    }

    #[test]
    fn test_scale_controls_without_scale_layer() {
        let mut keyboard = Keyboard::new(pitch("C0"), pitch("C1"));
        keyboard.set_scale_start(pitch("D0"));
        keyboard.transpose_scale(1);
        keyboard.set_scale_mode(Mode::Lydian);
        assert!(keyboard.scale().is_none());
    }

    #[test]
    fn test_set_range_rematerializes() {
        let mut keyboard = c_major_keyboard();
        keyboard.set_progress(1.0);
        keyboard.set_range(pitch("C1"), pitch("C2"));
        assert_eq!(keyboard.notes().len(), 12);
        assert_eq!(keyboard.notes()[0].index(), 12);
        assert_eq!(highlighted(&keyboard), vec![12, 14, 16, 17, 19, 21, 23]);
    }

    #[test]
    fn test_key_views() {
        let mut keyboard = c_major_keyboard();
        keyboard.set_scale_brackets(BracketStyle::WholeHalf);
        keyboard.set_progress(1.0);
        let views = keyboard.key_views();
        assert_eq!(views.len(), 36);

        let c = &views[0];
        assert_eq!(c.key_color, KeyColor::White);
        assert_eq!(c.highlight_class.as_deref(), Some("tone-color-1"));
        assert_eq!(c.bracket_classes, Some("left middle"));
        assert_eq!(c.bracket_color_class.as_deref(), Some("bracket-color-1"));
        assert_eq!(c.bracket_label.as_deref(), Some("r"));
        assert_eq!(c.label.as_deref(), Some("C"));

        let cs = &views[1];
        assert_eq!(cs.key_color, KeyColor::Black);
        assert_eq!(cs.highlight_class, None);
        assert_eq!(cs.label.as_deref(), Some("C♯"));

        keyboard.set_settings(Settings {
            note_names: false,
            ..Settings::default()
        });
        assert!(keyboard.key_views().iter().all(|v| v.label.is_none()));
    }
}
