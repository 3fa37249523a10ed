//! # Highlighter Module
//!
//! Overlay a repeating "N of one kind, M of another" pattern onto a chromatic
//! run of keyboard notes.
//!
//! ## Purpose
//! A highlighter walks an ascending, chromatic sequence of [`Note`]s one at a
//! time and writes:
//! 1. **Highlight color** - alternating between two colors, one per run
//! 2. **Bracket** - left/middle/right segments grouping each run
//! 3. **Bracket label** - run number, scale number, or whole/half step letter
//! 4. **Playable flag** - marks notes the audio layer may sound (animated only)
//!
//! ## Sub-modules
//! - `types` - Options, colors, bracket styles, parity
//! - `state` - The scan state machine as a pure transition function
//! - `engine` - [`Highlighter`], which owns options plus live scan state
//! - `builder` - [`ModeBuilder`] presets and [`HighlighterOptionsBuilder`]
//!
//! ## Counting
//! Patterns count whole tones, but the input is chromatic. After the start
//! pitch is found, the scan counts half steps: a run's first note is the half
//! step right after the previous run ended, and each later note of the run sits
//! two half steps (one whole tone) past the last. With Ionian `[3, 4]` from C:
//!
//! ```text
//! C  C# D  D# E  F  F# G  G# A  A# B  C
//! 1  .  2  .  3  1  .  2  .  3  .  4  1     run number
//! r     w     w  h     w     w     w  h     whole-half label
//! └─ odd ─────┘  └─ even ──────────┘  └ next cycle
//! ```
//!
//! ## Composition
//! Several highlighters may scan the same notes. They never coordinate: each
//! writes straight onto the shared notes, so the one fed last wins any field it
//! writes. Order background layers first and the foreground scale last.
//!
//! ## Example
//! ```rust
//! use wholetone::{notes_in_range, ModeBuilder, Pitch};
//!
//! let c0: Pitch = "C0".parse().unwrap();
//! let mut notes = notes_in_range(&c0, &"C3".parse().unwrap());
//!
//! let mut background = ModeBuilder::new(c0).alternating_whole_tones().color_dual_light().build();
//! let mut scale = ModeBuilder::new(c0).ionian().color_dual().brackets_run_numbers().build();
//!
//! background.scan(&mut notes);
//! scale.scan(&mut notes);
//!
//! assert_eq!(notes[5].bracket_label.as_deref(), Some("1")); // F opens the run of four
//! ```
//!
//! [`Note`]: crate::note::Note

mod builder;
mod engine;
mod state;
mod types;


pub use builder::{HighlighterOptionsBuilder, ModeBuilder};
pub use engine::Highlighter;
pub use state::{transition, Annotation, Cycle, ScanState};
pub use types::{BracketStyle, ColorScheme, HighlightColor, HighlighterOptions, Parity, Step};
