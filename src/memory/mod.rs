//! Memory model for the interpreter
//!
//! This module provides the single memory abstraction of the language:
//! - [`tape`]: an auto-growing sequence of 8-bit cells plus the cell pointer
//!
//! # Cell Semantics
//!
//! Cells are unsigned bytes with wraparound arithmetic (255 + 1 → 0,
//! 0 − 1 → 255).  The tape is conceptually infinite to the right and is
//! materialized lazily: a cell exists only once the pointer has reached it.
//! Nothing is ever trimmed, so a checkpoint of the tape is a checkpoint of
//! every cell the program has touched.

pub mod tape;
