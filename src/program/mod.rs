//! Program storage and bracket jump resolution
//!
//! A [`Program`] is the loaded source: an ordered sequence of lines, each an
//! ordered sequence of single-character commands.  The whole program is
//! treated as one logical command stream, read left-to-right within a line
//! and top-to-bottom across lines.
//!
//! A [`JumpTable`] maps every `[` to its matching `]` and back.  It is built
//! once per load and rebuilt after structural edits; stepping never scans
//! for brackets.
//!
//! # Validation
//!
//! Only brackets are validated.  Any character that is not one of the eight
//! commands or the space separator is a comment and is deliberately never
//! rejected — permissiveness at load time is part of the language contract.

use crate::interpreter::errors::{BracketKind, SyntaxError};
use rustc_hash::FxHashMap;

/// A (line, column) position within a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        SourcePosition { line, column }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The loaded source program.
///
/// Replaced wholesale on every load.  The engine never mutates it; the
/// caller may swap in edited lines mid-run and then request a jump table
/// rebuild.
#[derive(Debug, Clone, Default)]
pub struct Program {
    lines: Vec<Vec<char>>,
}

impl Program {
    pub fn new() -> Self {
        Program { lines: Vec::new() }
    }

    /// Build a program from source lines, one string per line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Program {
            lines: lines
                .into_iter()
                .map(|line| line.as_ref().chars().collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The commands of one line, or `None` past the end of the program.
    pub fn line(&self, index: usize) -> Option<&[char]> {
        self.lines.get(index).map(|l| l.as_slice())
    }

    /// The command at `position`, or `None` when the position is out of
    /// bounds (past the end of its line or past the last line).
    pub fn command_at(&self, position: SourcePosition) -> Option<char> {
        self.lines
            .get(position.line)
            .and_then(|line| line.get(position.column))
            .copied()
    }

    /// All lines, for rendering.
    pub fn lines(&self) -> &[Vec<char>] {
        &self.lines
    }
}

/// Bidirectional map between matching bracket positions.
///
/// Both directions are materialized: the entry for a `[` resolves to its
/// `]` and vice versa, so jump resolution is a single lookup either way.
#[derive(Debug, Clone, Default)]
pub struct JumpTable {
    partners: FxHashMap<SourcePosition, SourcePosition>,
}

impl JumpTable {
    /// Scan `program` and build the table.
    ///
    /// The scan walks every line top-to-bottom and every character
    /// left-to-right, pushing the position of each `[` onto a stack and
    /// popping it when the matching `]` arrives.  A `]` with an empty stack
    /// fails at that `]`; a non-empty stack after the scan fails at the
    /// first (bottom-of-stack) unmatched `[`.
    ///
    /// On failure the partially built table is dropped — the caller keeps
    /// whatever table it already had.
    pub fn build(program: &Program) -> Result<JumpTable, SyntaxError> {
        let mut partners = FxHashMap::default();
        let mut open_stack: Vec<SourcePosition> = Vec::new();

        for (line_number, line) in program.lines().iter().enumerate() {
            for (column, &command) in line.iter().enumerate() {
                let position = SourcePosition::new(line_number, column);
                match command {
                    '[' => open_stack.push(position),
                    ']' => {
                        let open = open_stack.pop().ok_or(SyntaxError {
                            kind: BracketKind::UnmatchedClose,
                            position,
                        })?;
                        partners.insert(open, position);
                        partners.insert(position, open);
                    }
                    _ => {}
                }
            }
        }

        if let Some(&first_unmatched) = open_stack.first() {
            return Err(SyntaxError {
                kind: BracketKind::UnmatchedOpen,
                position: first_unmatched,
            });
        }

        Ok(JumpTable { partners })
    }

    /// The matching bracket for the bracket at `position`.
    pub fn partner(&self, position: SourcePosition) -> Option<SourcePosition> {
        self.partners.get(&position).copied()
    }

    /// Number of bracket positions tracked (twice the number of pairs).
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}
