//! Tape machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The stepped, reversible virtual machine
//! - [`scheduler`]: The visual throttle gating external ticks
//! - [`errors`]: Syntax error type (unmatched brackets)
//!
//! # Execution Model
//!
//! The engine is driven one external tick at a time (e.g. once per rendered
//! frame).  The scheduler decides which ticks perform a step; before each
//! committed step a checkpoint is taken to enable time-travel debugging.
//!
//! # Errors
//!
//! The only error class is an unmatched bracket, raised when the jump table
//! is (re)built.  Stepping itself cannot fail: running off the end of the
//! program is a normal halt and unrecognized characters are comments.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod scheduler;
