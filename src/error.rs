//! # Error Types
//!
//! This module defines all error types for the keyboard highlighting library.
//!
//! Errors only arise at the text boundary: parsing pitch names, looking up mode
//! names, and loading YAML keyboard descriptions. The highlighter engine itself
//! never fails; a start pitch that never appears simply yields no highlights.
//!
//! ## Error Types
//! - `PitchError` - A pitch name like `"C#0"` could not be parsed
//! - `UnknownMode` - A mode name is not in the scale pattern table
//! - `ConfigError` - A YAML keyboard description is malformed
//!
//! ## Usage
//! ```rust
//! use wholetone::{KeyboardError, Pitch};
//!
//! match "H2".parse::<Pitch>() {
//!     Ok(pitch) => println!("index {}", pitch.index()),
//!     Err(KeyboardError::PitchError { input, message }) => {
//!         eprintln!("bad pitch {}: {}", input, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KeyboardError {
    /// Pitch parse error.
    ///
    /// Occurs when a compact pitch name does not start with a natural letter
    /// or lacks a numeric octave.
    ///
    /// # Example
    /// ```
    /// # use wholetone::KeyboardError;
    /// let err = KeyboardError::PitchError {
    ///     input: "X4".to_string(),
    ///     message: "unknown note letter 'X'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid pitch 'X4': unknown note letter 'X'");
    /// ```
    #[error("Invalid pitch '{input}': {message}")]
    PitchError { input: String, message: String },

    /// Unknown mode name.
    ///
    /// # Example
    /// ```
    /// # use wholetone::KeyboardError;
    /// let err = KeyboardError::UnknownMode("Blues".to_string());
    /// assert_eq!(err.to_string(), "Unknown mode: Blues");
    /// ```
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// Invalid keyboard configuration.
    ///
    /// Occurs when a YAML keyboard description cannot be deserialized or
    /// contains values that cannot drive a highlighter (e.g. an empty pattern).
    #[error("Invalid keyboard config: {0}")]
    ConfigError(String),
}
