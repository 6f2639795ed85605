//! # Introduction
//!
//! tapetty executes a minimal tape-based language (Brainfuck without the
//! input command), one step per external tick, and captures a checkpoint of
//! the full engine state before each committed step.  The checkpoint history
//! is then navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source lines → Program → JumpTable → Engine → Checkpoints → TUI
//! ```
//!
//! 1. [`program`] — program storage, source positions, and the bidirectional
//!    bracket jump table (with [`interpreter::errors::SyntaxError`] reporting
//!    for unmatched brackets).
//! 2. [`memory`] — the in-process memory model: an auto-growing
//!    [`memory::tape::Tape`] of 8-bit cells plus the cell pointer.
//! 3. [`interpreter`] — the [`interpreter::engine::Engine`] driven one tick
//!    at a time, and the [`interpreter::scheduler::StepScheduler`] that
//!    throttles top-level commands while letting loop bodies run at full
//!    step rate.
//! 4. [`snapshot`] — checkpoint stack enabling reverse execution.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported commands
//!
//! `>` `<` move the cell pointer, `+` `-` mutate the current cell with 8-bit
//! wraparound, `[` `]` jump conditionally on the current cell, `.` emits the
//! current cell as one output byte, and space is a transparent separator.
//! Every other character is a comment.  The input command `,` is
//! intentionally unimplemented and therefore also a comment.

pub mod interpreter;
pub mod memory;
pub mod program;
pub mod snapshot;
pub mod ui;
