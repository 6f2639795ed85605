// tapetty: Time-Travel Brainfuck Interpreter with Tape Visualization

mod interpreter;
mod memory;
mod program;
mod snapshot;
mod ui;

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use interpreter::constants::DEFAULT_SLOWDOWN;
use interpreter::engine::Engine;
use ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("tapetty");

    let mut source_file: Option<&str> = None;
    let mut slowdown = DEFAULT_SLOWDOWN;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--slowdown" => {
                i += 1;
                slowdown = match args.get(i).map(|s| s.parse::<u32>()) {
                    Some(Ok(n)) if n >= 1 => n,
                    _ => {
                        eprintln!("Error: --slowdown expects a factor of 1 or more");
                        std::process::exit(1);
                    }
                };
            }
            arg => source_file = Some(arg),
        }
        i += 1;
    }

    let Some(source_file) = source_file else {
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} [--slowdown N] <file.bf>", program_name);
        eprintln!();
        eprintln!("Examples:");
        eprintln!(
            "  {} demos/hello.bf           # Watch hello world run",
            program_name
        );
        eprintln!(
            "  {} --slowdown 1 mine.bf     # No throttle between commands",
            program_name
        );
        std::process::exit(1);
    };

    if !Path::new(source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        eprintln!("Usage: {} [--slowdown N] <file.bf>", program_name);
        std::process::exit(1);
    }

    // Read source code
    let source = fs::read_to_string(source_file)?;

    // Load and validate brackets
    let mut engine = Engine::new(slowdown);
    engine.load(source.lines());
    if let Err(err) = engine.prepare() {
        eprintln!("Syntax error in {}: {}", source_file, err);
        std::process::exit(1);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(engine);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
