//! Error types for the interpreter
//!
//! This module defines [`SyntaxError`], the only error class in the
//! language: an unmatched bracket, raised from jump table construction and
//! rebuild, never from stepping.
//!
//! Running off the end of the program is a normal halt signaled by a
//! boolean, and unrecognized characters are comments, so there is nothing
//! else that can go wrong at runtime.

use crate::program::SourcePosition;
use std::fmt;

/// Which side of a bracket pair was left unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    /// A `[` with no matching `]` before the end of the program.
    UnmatchedOpen,
    /// A `]` with no `[` still open.
    UnmatchedClose,
}

/// An unmatched bracket, positioned at the offending character.
///
/// For a [`BracketKind::UnmatchedClose`] the position is the `]` itself;
/// for a [`BracketKind::UnmatchedOpen`] it is the first `[` that was still
/// open when the scan reached the end of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: BracketKind,
    pub position: SourcePosition,
}

impl SyntaxError {
    pub fn position(&self) -> SourcePosition {
        self.position
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BracketKind::UnmatchedOpen => {
                write!(f, "Unmatched '[' at {}", self.position)
            }
            BracketKind::UnmatchedClose => {
                write!(f, "Unmatched ']' at {}", self.position)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}
