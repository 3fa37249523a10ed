//! Highlighter engine
//!
//! Owns one [`HighlighterOptions`] and the [`ScanState`] of the scan in
//! progress, and writes annotations onto the notes it is fed.

use log::trace;

use crate::mode::Pattern;
use crate::note::{Note, Pitch};

use super::state::{transition, ScanState};
use super::types::HighlighterOptions;

/// A stateful scanner that highlights a repeating cluster pattern
///
/// Call [`reset`](Highlighter::reset) before every full pass, then
/// [`accept`](Highlighter::accept) each note in ascending order.
///
/// # Example
/// ```
/// use wholetone::{notes_in_range, ModeBuilder, Pitch};
///
/// let c0: Pitch = "C0".parse().unwrap();
/// let mut highlighter = ModeBuilder::new(c0).ionian().build();
/// let mut notes = notes_in_range(&c0, &"C1".parse().unwrap());
///
/// highlighter.scan(&mut notes);
/// let highlighted = notes.iter().filter(|n| n.highlight.is_some()).count();
/// assert_eq!(highlighted, 7);
/// ```
#[derive(Debug, Clone)]
pub struct Highlighter {
    opts: HighlighterOptions,
    state: ScanState,
}

impl Highlighter {
    pub fn new(opts: HighlighterOptions) -> Self {
        Self {
            opts,
            state: ScanState::default(),
        }
    }

    pub fn options(&self) -> &HighlighterOptions {
        &self.opts
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.state, ScanState::Searching { .. })
    }

    /// Change the start pitch used by the next scan
    pub fn set_start(&mut self, start: Pitch) {
        self.opts.start = start;
    }

    /// Change the pattern used by the next scan
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.opts.pattern = pattern;
    }

    /// Return to the initial searching state
    pub fn reset(&mut self) {
        self.state = ScanState::default();
    }

    /// Consume the next note of the sequence, annotating it in place.
    ///
    /// Always clears the note's bracket before (possibly) redrawing it, so a
    /// later highlighter owns the bracket of every note it is fed.
    pub fn accept(&mut self, note: &mut Note) {
        let (next, annotation) = transition(self.state, &self.opts, &note.pitch);
        annotation.apply(note);

        match (&self.state, &next) {
            (ScanState::Searching { .. }, ScanState::Scanning(cycle)) => {
                trace!(
                    "matched start {} at {} (parity {:?})",
                    self.opts.start,
                    note.pitch,
                    cycle.parity
                );
            }
            (ScanState::Scanning(_), ScanState::Searching { .. }) => {
                trace!("pattern cycle complete at {}", note.pitch);
            }
            _ => {}
        }
        self.state = next;
    }

    /// Feed notes in order without resetting
    pub fn feed(&mut self, notes: &mut [Note]) {
        for note in notes.iter_mut() {
            self.accept(note);
        }
    }

    /// Reset, then run one full pass over `notes`
    pub fn scan(&mut self, notes: &mut [Note]) {
        self.reset();
        self.feed(notes);
    }
}

impl From<HighlighterOptions> for Highlighter {
    fn from(opts: HighlighterOptions) -> Self {
        Highlighter::new(opts)
    }
}
