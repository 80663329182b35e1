use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};

use blockfall::config::{Options, GRID_HEIGHT, GRID_WIDTH, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use blockfall::{BlockColor, CellState, Direction, Event, Game, GameState, Grid, Rotation};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";

// ============================================================================
// Color Mapping
// ============================================================================

fn block_color(color: BlockColor) -> Color {
    match color {
        BlockColor::Cyan => Color::Cyan,
        BlockColor::Yellow => Color::Yellow,
        BlockColor::Purple => Color::Magenta,
        BlockColor::Orange => Color::Rgb(255, 165, 0),
        BlockColor::Blue => Color::Blue,
        BlockColor::Green => Color::Green,
        BlockColor::Red => Color::Red,
        BlockColor::Dead => Color::DarkGray,
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, state: &GameState, paused: bool) {
    let area = frame.size();

    render_game(frame, state, area);
    if state.game_over {
        render_game_over(frame, state, area);
    } else if paused {
        render_paused(frame, area);
    }
}

fn render_game(frame: &mut Frame, state: &GameState, area: Rect) {
    let grid_display_width = (GRID_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = GRID_HEIGHT as u16 + 2;
    let side_width = 16;
    let preview_height = PREVIEW_HEIGHT as u16 + 4;
    let total_width = grid_display_width + side_width + 2;
    let total_height = grid_display_height + 3;

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let game_row = vertical[0];

    // Layout: [Grid][Preview / Info]
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(side_width),
    ])
    .split(game_row);

    let side = Layout::vertical([Constraint::Length(preview_height), Constraint::Fill(1)])
        .split(horizontal[1]);

    render_grid(frame, &state.grid, horizontal[0]);
    render_preview(frame, &state.preview, side[0]);
    render_info(frame, state, side[1]);

    let controls_area = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 2,
    };

    if controls_area.y + 1 < area.height {
        let controls = Paragraph::new(vec![Line::from(
            "←→/AD: Move | ↓/S: Drop | ↑/X: Rotate | Z: Rotate back | P: Pause | Q/ESC: Quit",
        )])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, controls_area);
    }
}

fn grid_lines(rows: &[Vec<CellState>]) -> Vec<Line<'static>> {
    rows.iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    CellState::Empty => Span::raw(EMPTY_CHAR),
                    CellState::Filled(block) => {
                        Span::styled(BLOCK_CHAR, Style::default().fg(block_color(block.color)))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_grid(frame: &mut Frame, grid: &Grid, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Hidden spawn rows are never drawn
    frame.render_widget(Paragraph::new(grid_lines(grid.visible_rows())), inner);
}

fn render_preview(frame: &mut Frame, preview: &Grid, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    lines.extend(grid_lines(preview.rows()));

    let width = PREVIEW_WIDTH as u16 * CELL_WIDTH;
    let preview_area = Rect {
        x: inner.x + inner.width.saturating_sub(width) / 2,
        width: width.min(inner.width),
        ..inner
    };
    frame.render_widget(Paragraph::new(lines), preview_area);
}

fn render_info(frame: &mut Frame, state: &GameState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let high_score = state
        .high_score
        .map_or_else(|| "-".to_string(), |score| score.to_string());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", state.score)),
        Line::from(""),
        Line::from(Span::styled("Level", Style::default().fg(Color::Green))),
        Line::from(format!("{}", state.level)),
        Line::from(""),
        Line::from(Span::styled("High", Style::default().fg(Color::Cyan))),
        Line::from(high_score),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, state: &GameState, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", state.score)),
        Line::from(format!("Level: {}", state.level)),
        Line::from(""),
        Line::from(Span::styled(
            "Rotate to play again",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(26, 11, area);
    frame.render_widget(paragraph, popup_area);
}

fn render_paused(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("PAUSED", Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(Span::styled(
            "Press P to continue",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Paused ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(24, 10, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Input
// ============================================================================

enum Command {
    Game(Event),
    TogglePause,
    Quit,
}

fn key_to_command(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Command::Game(Event::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Game(Event::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Command::Game(Event::Move(Direction::Down))
        }
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => {
            Command::Game(Event::Rotate(Rotation::Clockwise))
        }
        KeyCode::Char('z') | KeyCode::Char('Z') => {
            Command::Game(Event::Rotate(Rotation::Anticlockwise))
        }
        _ => return None,
    };
    Some(command)
}

// ============================================================================
// Main Loop
// ============================================================================

fn main() -> Result<()> {
    let options = Options::parse();

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &options);

    // Restore terminal even when the loop failed
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, options: &Options) -> Result<()> {
    let mut game = Game::with_options(options);
    let tick_duration = Duration::from_millis(options.tick_ms);
    let mut last_tick = Instant::now();
    let mut paused = false;

    loop {
        terminal.draw(|frame| render(frame, game.state(), paused))?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key_to_command(key.code) {
                        Some(Command::Quit) => break,
                        Some(Command::TogglePause) if !game.is_game_over() => paused = !paused,
                        Some(Command::Game(event)) if !paused => game.handle(event),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            if !paused {
                game.tick();
            }
            // The journal is only needed by tests and tools; keep it from growing here
            game.take_events();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
