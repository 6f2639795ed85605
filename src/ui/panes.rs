//! TUI pane rendering
//!
//! Stateless render functions for the visible panes:
//!
//! - [`render_program_pane`]: the source program with the command about to
//!   execute (or the offending bracket of a syntax error) highlighted
//! - [`render_tape_pane`]: the materialized tape cells with the cell
//!   pointer highlighted
//! - [`render_output_pane`]: accumulated program output
//! - [`render_status_bar`]: execution state and keybindings
//!
//! Each function takes the state it renders by reference; scroll offsets
//! are owned by the caller and adjusted here so the interesting position
//! stays visible while stepping.

use crate::interpreter::errors::SyntaxError;
use crate::program::{Program, SourcePosition};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const COMMAND_CHARS: [char; 7] = ['>', '<', '+', '-', '[', ']', '.'];

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            DEFAULT_THEME.border_focused
        } else {
            DEFAULT_THEME.border_normal
        }))
}

/// Render the program pane with the current command highlighted.
///
/// `highlight` is the command about to execute; a syntax error takes
/// precedence and highlights the offending bracket instead.
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    program: &Program,
    highlight: Option<SourcePosition>,
    error: Option<&SyntaxError>,
    focused: bool,
    scroll: &mut usize,
) {
    let error_position = error.map(|e| e.position());
    let marked = error_position.or(highlight);

    // Keep the marked line inside the visible window.
    let visible_rows = area.height.saturating_sub(2) as usize;
    if let Some(position) = marked {
        if position.line < *scroll {
            *scroll = position.line;
        } else if visible_rows > 0 && position.line >= *scroll + visible_rows {
            *scroll = position.line + 1 - visible_rows;
        }
    }

    let lines: Vec<Line> = program
        .lines()
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_rows.max(1))
        .map(|(line_number, line)| {
            let mut spans = vec![Span::styled(
                format!("{:3} ", line_number),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            for (column, &c) in line.iter().enumerate() {
                let position = SourcePosition::new(line_number, column);
                let mut style = if COMMAND_CHARS.contains(&c) {
                    Style::default().fg(DEFAULT_THEME.fg)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                };
                if error_position == Some(position) {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD);
                } else if marked == Some(position) {
                    style = style
                        .bg(DEFAULT_THEME.current_command_bg)
                        .add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(c.to_string(), style));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(pane_block(" Program ", focused));
    frame.render_widget(paragraph, area);
}

/// Render the tape pane: one box per materialized cell, pointer highlighted.
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    cells: &[u8],
    pointer: usize,
    focused: bool,
) {
    // "[255] " per cell, gap included.
    let cell_width = 6usize;
    let cells_fit = ((area.width.saturating_sub(2) as usize) / cell_width).max(1);
    let window_start = if pointer >= cells_fit {
        pointer + 1 - cells_fit
    } else {
        0
    };

    // The pointer may sit on a cell the program has not materialized yet;
    // render it as the zero it conceptually is.
    let total = cells.len().max(pointer + 1);

    let mut value_spans = Vec::new();
    let mut index_spans = Vec::new();
    for index in window_start..total.min(window_start + cells_fit) {
        let value = cells.get(index).copied().unwrap_or(0);
        let is_pointer = index == pointer;
        let value_style = if is_pointer {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .bg(DEFAULT_THEME.pointer_cell_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.number)
        };
        value_spans.push(Span::styled(format!("[{:3}] ", value), value_style));
        index_spans.push(Span::styled(
            format!("{:^5} ", index),
            if is_pointer {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            },
        ));
    }
    let title = format!(" Tape - pointer {}, {} cell(s) ", pointer, cells.len());
    let paragraph = Paragraph::new(vec![Line::from(value_spans), Line::from(index_spans)])
        .block(pane_block(&title, focused));
    frame.render_widget(paragraph, area);
}

/// Render the output pane with the accumulated output bytes as text.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    output: &str,
    focused: bool,
    scroll: &mut usize,
) {
    let visible_rows = area.height.saturating_sub(2) as usize;
    let total_rows = output.lines().count();
    // usize::MAX is the caller's "follow the tail" request.
    if scroll.saturating_add(visible_rows) > total_rows {
        *scroll = total_rows.saturating_sub(visible_rows);
    }

    let paragraph = Paragraph::new(output.to_string())
        .style(Style::default().fg(DEFAULT_THEME.success))
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .block(pane_block(" Output ", focused));
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom.
#[allow(clippy::too_many_arguments)]
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    steps_taken: u64,
    loop_depth: usize,
    slowdown: u32,
    error: Option<&SyntaxError>,
    halted: bool,
    paused: bool,
) {
    let (state_text, state_bg) = if let Some(err) = error {
        (format!(" {} ", err), DEFAULT_THEME.error)
    } else if halted {
        (" Halted ".to_string(), DEFAULT_THEME.comment)
    } else if paused {
        (" Paused ".to_string(), DEFAULT_THEME.secondary)
    } else {
        (" Running ".to_string(), DEFAULT_THEME.success)
    };

    let spans = vec![
        Span::styled(
            state_text,
            Style::default()
                .bg(state_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" step {} | depth {} | 1/{} ", steps_taken, loop_depth, slowdown),
            Style::default().fg(DEFAULT_THEME.primary),
        ),
        Span::styled(
            " space play/pause | n step | b back | r reset | +/- speed | q quit ",
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!(" {}", message), Style::default().fg(DEFAULT_THEME.fg)),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
