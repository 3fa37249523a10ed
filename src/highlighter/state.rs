//! Scan state machine
//!
//! The highlighter is a pure transition function over [`ScanState`]: given the
//! current state and the next note's pitch it returns the next state and the
//! [`Annotation`] to write onto that note.
//!
//! ```text
//!            start pitch seen
//! Searching ─────────────────▶ Scanning ──┐ every half step
//!     ▲                           │  ▲    │ (highlight on even ones)
//!     │   last run of the cycle   │  └────┘
//!     └───────────────────────────┘
//! ```
//!
//! Inside a cycle, runs alternate parity. A run's first note is highlighted on
//! the half step right after the previous run ended; later notes of the run
//! are highlighted every second half step (one whole tone apart).

use crate::note::{Bracket, Note, Pitch};

use super::types::{BracketStyle, HighlightColor, HighlighterOptions, Parity, Step};

/// Highlighter scan state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the next note spelled like the start pitch.
    ///
    /// `half_steps` carries over from the cycle that just ended; it is zero only
    /// before the first match of a scan, which makes that match the root.
    Searching { half_steps: u32 },
    /// Walking a pattern cycle
    Scanning(Cycle),
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState::Searching { half_steps: 0 }
    }
}

/// Counters for one pass through the cluster pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub parity: Parity,
    /// Next pattern entry to read when a run starts
    pub pattern_index: usize,
    /// Length of the current run
    pub run_length: usize,
    /// Notes highlighted so far in the current run; 0 between runs
    pub run_filled: usize,
    /// Notes highlighted so far in this cycle
    pub scale_number: usize,
    /// Half steps since the current run started
    pub half_steps: u32,
    pub step: Step,
}

/// Writes produced by one transition
///
/// The bracket is always overwritten (cleared when `None`); every other field
/// is only written when set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotation {
    pub bracket: Option<(Bracket, HighlightColor)>,
    pub highlight: Option<HighlightColor>,
    pub label: Option<String>,
    pub playable: bool,
}

impl Annotation {
    pub fn apply(self, note: &mut Note) {
        note.bracket = self.bracket.map(|(bracket, _)| bracket);
        if let Some((_, color)) = self.bracket {
            note.bracket_color = Some(color);
        }
        if let Some(color) = self.highlight {
            note.highlight = Some(color);
        }
        if let Some(label) = self.label {
            note.bracket_label = Some(label);
        }
        if self.playable {
            note.playable = true;
        }
    }

    fn set_bracket(&mut self, opts: &HighlighterOptions, bracket: Bracket, parity: Parity) {
        if opts.bracket_style != BracketStyle::None {
            self.bracket = Some((bracket, opts.color_for(parity)));
        }
    }
}

/// Advance the scan by one note.
pub fn transition(
    state: ScanState,
    opts: &HighlighterOptions,
    pitch: &Pitch,
) -> (ScanState, Annotation) {
    let mut annotation = Annotation::default();

    let next = match state {
        ScanState::Searching { half_steps } => {
            if !pitch.same_spelling(&opts.start) {
                return (state, annotation);
            }
            // Even indices open with the odd color so every octave colors alike
            let parity = if pitch.index().rem_euclid(2) == 0 {
                Parity::Odd
            } else {
                Parity::Even
            };
            let cycle = Cycle {
                parity,
                pattern_index: 0,
                run_length: 0,
                run_filled: 0,
                scale_number: 0,
                half_steps,
                step: if half_steps == 0 { Step::Root } else { Step::Half },
            };
            cycle.start_run(opts, &mut annotation)
        }
        ScanState::Scanning(mut cycle) => {
            cycle.half_steps += 1;
            if cycle.run_filled == 0 {
                cycle.step = Step::Half;
                cycle.start_run(opts, &mut annotation)
            } else {
                annotation.set_bracket(opts, Bracket::Middle, cycle.parity);
                if cycle.half_steps % 2 == 0 {
                    cycle.step = Step::Whole;
                    cycle.highlight(opts, &mut annotation)
                } else {
                    ScanState::Scanning(cycle)
                }
            }
        }
    };

    (next, annotation)
}

impl Cycle {
    fn start_run(mut self, opts: &HighlighterOptions, annotation: &mut Annotation) -> ScanState {
        let bracket = if self.scale_number > 1 {
            Bracket::Middle
        } else {
            Bracket::Left
        };
        annotation.set_bracket(opts, bracket, self.parity);
        self.half_steps = 0;
        self.run_length = opts.pattern.entries()[self.pattern_index];
        self.pattern_index += 1;
        self.highlight(opts, annotation)
    }

    fn highlight(mut self, opts: &HighlighterOptions, annotation: &mut Annotation) -> ScanState {
        self.run_filled += 1;
        self.scale_number += 1;
        if opts.animate {
            annotation.playable = true;
        }
        annotation.highlight = Some(opts.color_for(self.parity));
        annotation.label = match opts.bracket_style {
            BracketStyle::None => None,
            BracketStyle::RunNumber => Some(self.run_filled.to_string()),
            BracketStyle::ScaleNumber => Some(self.scale_number.to_string()),
            BracketStyle::WholeHalf => Some(self.step.label().to_string()),
        };

        if self.run_filled >= self.run_length {
            self.end_run(opts, annotation)
        } else {
            ScanState::Scanning(self)
        }
    }

    fn end_run(mut self, opts: &HighlighterOptions, annotation: &mut Annotation) -> ScanState {
        // Boundaries inside a seven-note scale stay open
        let bracket = if self.scale_number > 1 && self.scale_number < 7 {
            Bracket::Middle
        } else {
            Bracket::Right
        };
        annotation.set_bracket(opts, bracket, self.parity);
        self.parity = self.parity.flip();
        self.run_filled = 0;

        if self.pattern_index >= opts.pattern.len() {
            ScanState::Searching {
                half_steps: self.half_steps,
            }
        } else {
            ScanState::Scanning(self)
        }
    }
}
