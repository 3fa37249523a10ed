pub mod config;
pub mod error;
pub mod highlighter;
pub mod keyboard;
pub mod mode;
pub mod note;

pub use config::KeyboardConfig;
pub use error::*;
pub use highlighter::{
    BracketStyle, ColorScheme, HighlightColor, Highlighter, HighlighterOptions,
    HighlighterOptionsBuilder, ModeBuilder,
};
pub use keyboard::{KeyView, Keyboard, PlaybackEvent, Settings};
pub use mode::{Mode, Pattern};
pub use note::{notes_in_range, Accidental, Bracket, KeyColor, Note, NoteName, Pitch};

/// Materialize `[from, to)` and run one full scan of `highlighter` over it.
/// This is the quickest way to see what a single highlighter produces.
///
/// ```
/// use wholetone::{highlight_range, ModeBuilder, Pitch};
///
/// let c0: Pitch = "C0".parse().unwrap();
/// let mut major = ModeBuilder::new(c0).ionian().build();
/// let notes = highlight_range(&c0, &"C1".parse().unwrap(), &mut major);
/// assert_eq!(notes.iter().filter(|n| n.highlight.is_some()).count(), 7);
/// ```
pub fn highlight_range(from: &Pitch, to: &Pitch, highlighter: &mut Highlighter) -> Vec<Note> {
    let mut notes = notes_in_range(from, to);
    highlighter.scan(&mut notes);
    notes
}

/// Build an orchestrated keyboard from a YAML description
pub fn load_keyboard(yaml: &str) -> Result<Keyboard, KeyboardError> {
    Ok(KeyboardConfig::parse(yaml)?.build())
}
