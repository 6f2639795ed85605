//! Main TUI application state and logic

use crate::interpreter::engine::Engine;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Tape,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (top to bottom)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Program,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Tape => FocusedPane::Program,
            FocusedPane::Output => FocusedPane::Tape,
        }
    }
}

/// The main application state
pub struct App {
    /// The engine instance
    pub engine: Engine,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub program_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// How often an external tick is delivered to the engine
    pub tick_interval: Duration,

    /// Last time a tick was delivered
    last_tick: Instant,
}

impl App {
    /// Create a new app driving the given engine.
    pub fn new(engine: Engine) -> Self {
        App {
            engine,
            focused_pane: FocusedPane::Program,
            program_scroll: 0,
            output_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            tick_interval: Duration::from_millis(33),
            last_tick: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Deliver external ticks at a fixed wall-clock rate; the engine
            // decides which of them perform a step.
            if self.last_tick.elapsed() >= self.tick_interval {
                self.last_tick = Instant::now();
                if let Some(result) = self.engine.tick() {
                    if result.halted {
                        self.status_message = "Program halted".to_string();
                    } else if result.output.is_some() {
                        self.output_scroll = usize::MAX;
                    }
                }
            }

            // Poll with a timeout so ticks keep flowing while idle
            if event::poll(Duration::from_millis(15))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Length(1),
            ])
            .split(size);

        super::panes::render_program_pane(
            frame,
            rows[0],
            self.engine.program(),
            self.engine.cursor(),
            self.engine.syntax_error(),
            self.focused_pane == FocusedPane::Program,
            &mut self.program_scroll,
        );

        super::panes::render_tape_pane(
            frame,
            rows[1],
            self.engine.cells(self.engine.tape_len()),
            self.engine.cell_pointer(),
            self.focused_pane == FocusedPane::Tape,
        );

        let output = self.engine.output_string();
        super::panes::render_output_pane(
            frame,
            rows[2],
            &output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_status_bar(
            frame,
            rows[3],
            &self.status_message,
            self.engine.steps_taken(),
            self.engine.loop_depth(),
            self.engine.slowdown(),
            self.engine.syntax_error(),
            self.engine.is_halted(),
            self.engine.is_paused(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.engine.is_paused() {
                    self.engine.resume();
                    self.status_message = "Running".to_string();
                } else {
                    self.engine.pause();
                    self.status_message = "Paused".to_string();
                }
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.engine.pause();
                let n = c as usize - '0' as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.engine.step_forward().halted {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.output_scroll = usize::MAX;
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.engine.pause();
                let result = self.engine.step_forward();
                self.status_message = if result.halted {
                    "Program halted".to_string()
                } else {
                    "Stepped forward 1 step(s)".to_string()
                };
                self.output_scroll = usize::MAX;
            }
            KeyCode::Char('b') | KeyCode::Left => {
                self.engine.pause();
                self.status_message = if self.engine.step_backward() {
                    "Stepped back 1 step(s)".to_string()
                } else {
                    "Already at the beginning".to_string()
                };
                self.output_scroll = usize::MAX;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.status_message = match self.engine.prepare() {
                    Ok(()) => "Reset".to_string(),
                    Err(err) => format!("{}", err),
                };
                self.program_scroll = 0;
                self.output_scroll = usize::MAX;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let slowdown = self.engine.slowdown().saturating_sub(1).max(1);
                self.engine.set_slowdown(slowdown);
                self.status_message = format!("Slowdown 1/{}", slowdown);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let slowdown = (self.engine.slowdown() + 1).min(120);
                self.engine.set_slowdown(slowdown);
                self.status_message = format!("Slowdown 1/{}", slowdown);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.scroll_focused(-1),
            KeyCode::Down => self.scroll_focused(1),
            _ => {}
        }
    }

    fn scroll_focused(&mut self, delta: isize) {
        let scroll = match self.focused_pane {
            FocusedPane::Program => &mut self.program_scroll,
            FocusedPane::Output => &mut self.output_scroll,
            FocusedPane::Tape => return,
        };
        if delta < 0 {
            *scroll = scroll.saturating_sub(delta.unsigned_abs());
        } else {
            *scroll = scroll.saturating_add(delta as usize);
        }
    }
}
