//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, and
//!   the wall-clock tick timer that drives the engine
//! - **[`panes`]** — stateless render functions for each visible pane
//!   (program, tape, output, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`Engine`] and call [`App::run`] to start the event loop.
//!
//! [`Engine`]: crate::interpreter::engine::Engine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
