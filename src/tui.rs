//! TUI (Terminal User Interface) module for Wordle Deck
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the latest `GameState` snapshot and turns key presses into
//!   `UserAction`s for the session
//!
//! # Input
//! - While playing: letters, BACKSPACE and ENTER edit and submit the current row
//! - TAB starts over with a new word at any time; after the game ends so does `N`
//! - ESC quits

use crate::cli::KEYBOARD_ROWS;
use crate::deck::Deck;
use crate::game::{GameState, GameStatus, Guess, LetterState, is_game_complete};
use crate::session::{GameInterface, SessionStats, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_HEIGHT: u16 = 5;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Background and foreground for a tile or key.
fn tile_colors(state: Option<LetterState>) -> (Color, Color) {
    match state {
        Some(LetterState::Correct) => (Color::Green, Color::Black),
        Some(LetterState::Present) => (Color::Yellow, Color::Black),
        Some(LetterState::Absent) => (Color::Gray, Color::White),
        Some(LetterState::Empty) | None => (Color::DarkGray, Color::White),
    }
}

/// Translate a key press into a session action.
///
/// Returns `None` for keys that do nothing in the current phase.
fn map_key(key: &KeyEvent, game_over: bool) -> Option<UserAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UserAction::Exit);
    }
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Tab => Some(UserAction::NewGame),
        KeyCode::Char('n' | 'N') if game_over => Some(UserAction::NewGame),
        KeyCode::Char(c) if c.is_ascii_alphabetic() && !game_over => Some(UserAction::Letter(c)),
        KeyCode::Backspace | KeyCode::Delete if !game_over => Some(UserAction::Backspace),
        KeyCode::Enter if !game_over => Some(UserAction::Submit),
        _ => None,
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    snapshot: Option<&'a GameState>,
    deck_name: &'a str,
    message: &'a str,
    input_error: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    snapshot: Option<GameState>,
    deck_name: String,
    message: String,
    input_error: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            snapshot: None,
            deck_name: String::new(),
            message: String::new(),
            input_error: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    ///
    /// Returns an error if rendering fails.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            snapshot: self.snapshot.as_ref(),
            deck_name: &self.deck_name,
            message: &self.message,
            input_error: &self.input_error,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn game_over(&self) -> bool {
        self.snapshot.as_ref().is_some_and(is_game_complete)
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let board_rows = ctx.snapshot.map_or(0, GameState::max_guesses);
        let board_height = u16::try_from(board_rows)
            .unwrap_or(u16::MAX)
            .saturating_mul(ROW_SPACING)
            .saturating_add(2);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),               // Title
                Constraint::Length(board_height),    // Game board
                Constraint::Length(KEYBOARD_HEIGHT), // Keyboard
                Constraint::Min(4),                  // Info panel (takes remaining space)
                Constraint::Length(3),               // Status line
                Constraint::Length(3),               // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.deck_name);
        if let Some(state) = ctx.snapshot {
            Self::render_board(f, chunks[1], state);
            Self::render_keyboard(f, chunks[2], state);
        }
        Self::render_info(f, chunks[3], ctx);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.snapshot.is_some_and(is_game_complete));
    }

    fn render_title(f: &mut Frame, area: Rect, deck_name: &str) {
        let title = if deck_name.is_empty() {
            "WORDLE DECK".to_string()
        } else {
            format!("WORDLE DECK - {deck_name}")
        };
        let paragraph = Paragraph::new(title)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_board(f: &mut Frame, area: Rect, state: &GameState) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        // Calculate how many rows can fit in the available space
        let available_rows = (inner.height / ROW_SPACING) as usize;
        let showing_current_input = !is_game_complete(state);
        let rows_needed = state.guesses().len() + usize::from(showing_current_input);

        // Show the most recent rows when the board does not fit
        let skip_count = rows_needed.saturating_sub(available_rows);

        let mut display_index = 0;
        for guess in state.guesses().iter().skip(skip_count) {
            Self::render_guess_row(f, guess, display_index, inner);
            display_index += 1;
        }

        if showing_current_input {
            Self::render_current_input(
                f,
                display_index,
                inner,
                state.current_guess(),
                state.word_length(),
            );
            display_index += 1;
        }

        for _ in state.guesses().len() + usize::from(showing_current_input)..state.max_guesses() {
            Self::render_current_input(f, display_index, inner, "", state.word_length());
            display_index += 1;
        }
    }

    fn row_y(row_index: usize, area: Rect) -> Option<u16> {
        let offset = u16::try_from(row_index).ok()?.checked_mul(ROW_SPACING)?;
        let y = area.y.checked_add(offset)?;
        (y < area.y + area.height).then_some(y)
    }

    fn render_guess_row(f: &mut Frame, guess: &Guess, row_index: usize, area: Rect) {
        let Some(y) = Self::row_y(row_index, area) else {
            return;
        };

        let mut spans = vec![Span::raw("  ")];
        for letter in guess.letters() {
            let (bg_color, fg_color) = tile_colors(Some(letter.state));
            spans.push(Span::styled(
                format!(" {} ", letter.ch.to_ascii_uppercase()),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_current_input(
        f: &mut Frame,
        row_index: usize,
        area: Rect,
        current_input: &str,
        word_length: usize,
    ) {
        let Some(y) = Self::row_y(row_index, area) else {
            return;
        };

        let mut spans = vec![Span::raw("  ")];
        let mut letters = current_input.chars();
        for _ in 0..word_length {
            let letter = letters.next().map_or(' ', |c| c.to_ascii_uppercase());
            let (bg_color, fg_color) = tile_colors(None);
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_keyboard(f: &mut Frame, area: Rect, state: &GameState) {
        let lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .flat_map(|key| {
                        let (bg_color, fg_color) = tile_colors(state.key_state(key));
                        [
                            Span::styled(
                                format!(" {key} "),
                                Style::default().fg(fg_color).bg(bg_color),
                            ),
                            Span::raw(" "),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(state) = ctx.snapshot {
            match state.status() {
                GameStatus::Won => lines.push(Line::from(vec![Span::styled(
                    format!("✓ Solved: {}", state.target_word().to_uppercase()),
                    SUCCESS_STYLE,
                )])),
                GameStatus::Lost => lines.push(Line::from(vec![Span::styled(
                    format!("The word was {}", state.target_word().to_uppercase()),
                    FAILURE_STYLE,
                )])),
                GameStatus::Playing => {}
            }
        }

        // Messages
        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        // Error messages: rejected guesses first, then bad keys
        if let Some(error) = ctx.snapshot.and_then(GameState::error_message) {
            lines.push(Line::from(vec![Span::styled(error, ERROR_STYLE)]));
        }
        if !ctx.input_error.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.input_error, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, game_over: bool) {
        let text = if game_over {
            "N: New game | ESC: Quit"
        } else {
            "Type letters | ENTER: Submit | BACKSPACE: Delete | TAB: New word | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        // Poll with a timeout so resizes get redrawn
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        let Event::Key(key) = event else {
            debug_log!("handle_input() - Ignoring non-key event: {:?}", event);
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Filter out garbage from terminal focus events (alt-tab)
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        let game_over = self.game_over();
        let action = map_key(&key, game_over);
        if action.is_none()
            && !game_over
            && let KeyCode::Char(c) = key.code
            && !c.is_ascii_alphabetic()
        {
            self.input_error = format!("Only letters are allowed! ('{c}' is not a letter)");
        } else {
            self.input_error.clear();
        }

        debug_log!(
            "handle_input() - key {:?} -> {:?}",
            key.code,
            action
        );
        Ok(action)
    }
}

impl GameInterface for TuiInterface {
    fn display_new_game(&mut self, deck: &Deck, state: &GameState) {
        self.deck_name = deck.name().to_string();
        self.snapshot = Some(state.clone());
        self.message = format!(
            "New game: {} letters, {} guesses",
            state.word_length(),
            state.max_guesses()
        );
        self.input_error.clear();
        self.status = format!("Deck '{}' - {} words", deck.name(), deck.len());
        self.draw_or_log();
    }

    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        self.snapshot = Some(state.clone());
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error: {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_state(&mut self, state: &GameState) {
        self.snapshot = Some(state.clone());
        if !is_game_complete(state) {
            self.status = format!("{} guesses left", state.remaining_guesses());
        }
        self.draw_or_log();
    }

    fn display_result(&mut self, state: &GameState, stats: &SessionStats) {
        self.snapshot = Some(state.clone());
        self.message = match state.status() {
            GameStatus::Won => format!(
                "Solved in {}/{}!",
                state.guesses().len(),
                state.max_guesses()
            ),
            _ => "Out of guesses.".to_string(),
        };
        self.status = format!(
            "Game over - Won {} of {} ({:.0}%)",
            stats.won,
            stats.played(),
            stats.win_rate() * 100.0
        );
        self.draw_or_log();
    }

    fn display_exit_message(&mut self, _stats: &SessionStats) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
