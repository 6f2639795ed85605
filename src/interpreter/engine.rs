//! The execution engine: a stepped, reversible, throttled tape machine.
//!
//! [`Engine`] composes the program, jump table, tape, execution cursor,
//! step scheduler, output buffer, and checkpoint history into the unit the
//! caller drives one tick at a time.
//!
//! # Lifecycle
//!
//! ```text
//! load(lines) → prepare() → tick()/step() … → step_backward()/reset
//!                  ↑                │
//!                  └── rebuild_jumpmap() ←── caller edits the program
//! ```
//!
//! `load` replaces the program without touching any run state; `prepare`
//! validates brackets and rewinds everything.  `rebuild_jumpmap` exists for
//! structural edits while a run is live: on success only jump resolution
//! changes, on failure the engine parks in a syntax-error state (old table
//! intact) until a later rebuild succeeds.

use crate::interpreter::constants::{DEFAULT_MAX_CHECKPOINTS, DEFAULT_SLOWDOWN};
use crate::interpreter::errors::SyntaxError;
use crate::interpreter::scheduler::StepScheduler;
use crate::memory::tape::Tape;
use crate::program::{JumpTable, Program, SourcePosition};
use crate::snapshot::{Checkpoint, History};

/// Result of one call to [`Engine::step`].
///
/// `position` is the position of the command that was just executed (after
/// separator skipping), so callers can highlight it.  It is `None` exactly
/// when `halted` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub halted: bool,
    pub position: Option<SourcePosition>,
    pub output: Option<u8>,
}

impl StepResult {
    fn halted() -> Self {
        StepResult {
            halted: true,
            position: None,
            output: None,
        }
    }

    fn executed(position: SourcePosition, output: Option<u8>) -> Self {
        StepResult {
            halted: false,
            position: Some(position),
            output,
        }
    }
}

/// The stepped, reversible virtual machine.
pub struct Engine {
    /// Loaded source program
    program: Program,

    /// Bracket partner map, rebuilt on prepare and on structural edits
    jump_table: JumpTable,

    /// Cell memory and cell pointer
    tape: Tape,

    /// Position of the next command, `None` once halted
    cursor: Option<SourcePosition>,

    /// Positions of the `[` commands whose bodies are currently open.
    /// The length is the loop nesting depth used to gate the throttle.
    open_loops: Vec<SourcePosition>,

    /// Visual throttle over external ticks
    scheduler: StepScheduler,

    /// Accumulated output bytes
    output: Vec<u8>,

    /// Checkpoint history for reverse execution
    history: History,

    /// Whether ticks are currently suspended
    paused: bool,

    /// Set when the last prepare/rebuild failed; stepping is parked until a
    /// rebuild succeeds
    syntax_error: Option<SyntaxError>,

    /// External ticks received, including no-op and paused ticks
    ticks_received: u64,

    /// Committed steps since prepare, net of backward steps
    steps_taken: u64,
}

impl Engine {
    /// Create an engine with the given throttle factor and the default
    /// checkpoint capacity.  No program is loaded; the engine reports
    /// halted until `load` + `prepare` succeed.
    pub fn new(slowdown: u32) -> Self {
        Self::with_history_capacity(slowdown, DEFAULT_MAX_CHECKPOINTS)
    }

    /// Create an engine bounding reverse-execution history to
    /// `max_checkpoints` committed steps.
    pub fn with_history_capacity(slowdown: u32, max_checkpoints: usize) -> Self {
        Engine {
            program: Program::new(),
            jump_table: JumpTable::default(),
            tape: Tape::new(),
            cursor: None,
            open_loops: Vec::new(),
            scheduler: StepScheduler::new(slowdown),
            output: Vec::new(),
            history: History::new(max_checkpoints),
            paused: false,
            syntax_error: None,
            ticks_received: 0,
            steps_taken: 0,
        }
    }

    /// Replace the program wholesale.
    ///
    /// Nothing else changes: the jump table is not rebuilt and no run state
    /// is reset.  Follow with `prepare` to start a fresh run, or with
    /// `rebuild_jumpmap` to keep the current run going after a mid-run edit.
    pub fn load<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.program = Program::from_lines(lines);
    }

    /// Validate brackets and reset for a fresh run.
    ///
    /// On success the jump table is installed and the tape, cursor, loop
    /// stack, scheduler phase, output buffer, and history are all rewound.
    /// On failure nothing is reset; the engine parks in the syntax-error
    /// state exposing the offending position.
    pub fn prepare(&mut self) -> Result<(), SyntaxError> {
        match JumpTable::build(&self.program) {
            Ok(table) => {
                self.jump_table = table;
                self.tape = Tape::new();
                self.cursor = Some(SourcePosition::new(0, 0));
                self.open_loops.clear();
                self.scheduler.reset();
                self.output.clear();
                self.history.clear();
                self.syntax_error = None;
                self.steps_taken = 0;
                Ok(())
            }
            Err(err) => {
                self.syntax_error = Some(err);
                Err(err)
            }
        }
    }

    /// Rebuild the jump table after a structural edit, mid-run.
    ///
    /// Success installs the new table between two steps and touches nothing
    /// else: tape, cursor, output, and history all survive, and only future
    /// jumps resolve differently.  Failure keeps the previous table
    /// installed and uncorrupted but parks the engine (ticks and steps are
    /// no-ops) until a rebuild succeeds, so execution never runs against a
    /// half-built table.
    pub fn rebuild_jumpmap(&mut self) -> Result<(), SyntaxError> {
        match JumpTable::build(&self.program) {
            Ok(table) => {
                self.jump_table = table;
                self.syntax_error = None;
                Ok(())
            }
            Err(err) => {
                self.syntax_error = Some(err);
                Err(err)
            }
        }
    }

    /// Record one external tick and, when the scheduler allows it, perform
    /// one step.  Returns `None` for no-op ticks (paused, parked on a
    /// syntax error, or throttled).
    pub fn tick(&mut self) -> Option<StepResult> {
        self.ticks_received += 1;

        if self.paused || self.syntax_error.is_some() {
            return None;
        }

        if self.scheduler.tick(self.open_loops.len()) {
            Some(self.step())
        } else {
            None
        }
    }

    /// Execute exactly one command.
    ///
    /// Transparent separators (spaces, exhausted lines) are skipped first;
    /// the command then executes and the cursor advances, or jumps for a
    /// taken bracket.  A checkpoint of the pre-step state is pushed for
    /// every committed step.  Once the program is exhausted this returns
    /// `halted = true` idempotently, with no side effects.
    pub fn step(&mut self) -> StepResult {
        if self.syntax_error.is_some() {
            return StepResult::halted();
        }

        let Some((position, command)) = self.next_command() else {
            self.cursor = None;
            return StepResult::halted();
        };

        self.checkpoint();

        let mut output = None;
        let mut jumped = false;

        match command {
            '>' => self.tape.move_right(),
            '<' => self.tape.move_left(),
            '+' => self.tape.increment(),
            '-' => self.tape.decrement(),
            '[' => {
                if self.tape.read() == 0 {
                    // Skip the body: resume right after the matching `]`.
                    if let Some(partner) = self.jump_table.partner(position) {
                        self.cursor = self.advance_from(partner);
                        jumped = true;
                    }
                } else if self.open_loops.last() != Some(&position) {
                    // Entering the loop; a re-test after a backward jump
                    // finds itself already on top of the stack.
                    self.open_loops.push(position);
                }
            }
            ']' => {
                if self.tape.read() != 0 {
                    // Jump back onto the `[` itself so the condition is
                    // re-tested on the next step.
                    if let Some(partner) = self.jump_table.partner(position) {
                        self.cursor = Some(partner);
                        jumped = true;
                    }
                } else if self.open_loops.pop().is_some() && self.open_loops.is_empty() {
                    // The outermost loop just closed: the next tick must be
                    // live or the commands after the loop would stall.
                    self.scheduler.force_next_live();
                }
            }
            '.' => {
                let byte = self.tape.read();
                self.output.push(byte);
                output = Some(byte);
            }
            // Anything unrecognized is a comment, including `,`.
            _ => {}
        }

        if !jumped {
            self.cursor = self.advance_from(position);
        }

        self.steps_taken += 1;
        StepResult::executed(position, output)
    }

    /// Suspend stepping.  Ticks are still recorded but perform nothing and
    /// leave the scheduler phase untouched.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// One committed step regardless of throttling, for manual stepping
    /// while paused.
    pub fn step_forward(&mut self) -> StepResult {
        self.step()
    }

    /// Undo the most recent committed step, restoring the tape, cursor,
    /// open loops, and output to their pre-step values.  Returns false when
    /// no history remains.
    pub fn step_backward(&mut self) -> bool {
        let Some(checkpoint) = self.history.pop() else {
            return false;
        };
        self.tape = checkpoint.tape;
        self.cursor = checkpoint.cursor;
        self.open_loops = checkpoint.open_loops;
        self.output = checkpoint.output;
        self.steps_taken = self.steps_taken.saturating_sub(1);
        true
    }

    // ========== Getter methods for the rendering layer ==========

    /// The first `count` materialized tape cells.
    pub fn cells(&self, count: usize) -> &[u8] {
        self.tape.cells(count)
    }

    pub fn cell_pointer(&self) -> usize {
        self.tape.pointer()
    }

    pub fn tape_len(&self) -> usize {
        self.tape.len()
    }

    /// Position of the next command, `None` once halted.
    pub fn cursor(&self) -> Option<SourcePosition> {
        self.cursor
    }

    /// Accumulated output bytes.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Accumulated output as text, with non-UTF-8 bytes replaced.
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn is_halted(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The error the engine is parked on, if the last prepare or rebuild
    /// failed.
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        self.syntax_error.as_ref()
    }

    /// Current loop nesting depth.
    pub fn loop_depth(&self) -> usize {
        self.open_loops.len()
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Committed steps that can still be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn ticks_received(&self) -> u64 {
        self.ticks_received
    }

    pub fn slowdown(&self) -> u32 {
        self.scheduler.slowdown()
    }

    pub fn set_slowdown(&mut self, slowdown: u32) {
        self.scheduler.set_slowdown(slowdown);
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    // ========== Cursor movement ==========

    /// Resolve the cursor to the next executable command, skipping spaces
    /// and line boundaries transparently.  `None` means the program stream
    /// is exhausted.
    fn next_command(&self) -> Option<(SourcePosition, char)> {
        let mut position = self.cursor?;
        loop {
            if position.line >= self.program.line_count() {
                return None;
            }
            match self.program.command_at(position) {
                // Separators are never independently executed.
                Some(' ') => position.column += 1,
                Some(command) => return Some((position, command)),
                // Past the end of this line (or an empty line): fall
                // through to the next one.
                None => position = SourcePosition::new(position.line + 1, 0),
            }
        }
    }

    /// The position after `position` under the line-advance rule: next
    /// column, else next line, else halted (`None`) as of the next call.
    fn advance_from(&self, position: SourcePosition) -> Option<SourcePosition> {
        let line_len = self.program.line(position.line).map_or(0, |line| line.len());
        if position.column + 1 < line_len {
            Some(SourcePosition::new(position.line, position.column + 1))
        } else if position.line + 1 < self.program.line_count() {
            Some(SourcePosition::new(position.line + 1, 0))
        } else {
            None
        }
    }

    /// Push a checkpoint of the pre-step state.
    fn checkpoint(&mut self) {
        self.history.push(Checkpoint {
            tape: self.tape.clone(),
            cursor: self.cursor,
            open_loops: self.open_loops.clone(),
            output: self.output.clone(),
        });
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_SLOWDOWN)
    }
}
