//! # quiz-admin
//!
//! A terminal front-end for a remote quiz service: author multiple-choice
//! questions, list and delete them, and take the quiz with score tallying.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_admin::{App, HttpQuizApi, QuizError, Screen};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let api = HttpQuizApi::new("http://localhost:8080".parse().unwrap())?;
//!
//!     // Take over the terminal until the user quits
//!     quiz_admin::run(App::new(api, Screen::Quiz)).await
//! }
//! ```

pub mod api;
mod app;
pub mod config;
pub mod logging;
pub mod models;
pub mod terminal;
mod ui;
pub mod workflow;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use thiserror::Error;

pub use api::{ApiError, HttpQuizApi, QuizApi};
pub use app::{App, Screen, Toasts};
pub use config::Config;
pub use logging::LoggingError;

/// How long to wait for a key before picking up finished requests.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to set up the API client: {0}")]
    Api(#[from] ApiError),
    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] LoggingError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Start-up sequence of the binary: logging, API client, terminal UI.
pub async fn launch(config: Config) -> Result<(), QuizError> {
    logging::init(&config.log_file, config.log_level.into())?;
    info!("Using quiz API at {}", config.api_url);

    let api = HttpQuizApi::new(config.api_url)?;
    run(App::new(api, config.screen)).await
}

/// Run the application in the terminal until the user quits.
///
/// Must be called from within a tokio runtime: requests run on spawned
/// tasks while this loop keeps drawing.
pub async fn run<A: QuizApi + 'static>(mut app: App<A>) -> Result<(), QuizError> {
    app.start();
    let mut terminal = terminal::TerminalGuard::enter()?;
    let result = run_event_loop(&mut terminal, &mut app);
    info!("Quitting");
    result
}

fn run_event_loop<A: QuizApi + 'static>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<A>,
) -> Result<(), QuizError> {
    while !app.should_quit {
        app.drain_completions();
        app.prune_toasts();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
    }

    Ok(())
}

fn handle_key<A: QuizApi + 'static>(app: &mut App<A>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::F(1) => app.navigate(Screen::Create),
        KeyCode::F(2) => app.navigate(Screen::List),
        KeyCode::F(3) => app.navigate(Screen::Quiz),
        code => match app.screen {
            Screen::Create => handle_form_input(app, code),
            Screen::List => handle_list_input(app, code),
            Screen::Quiz => handle_quiz_input(app, code),
        },
    }
}

fn handle_form_input<A: QuizApi + 'static>(app: &mut App<A>, key: KeyCode) {
    match key {
        KeyCode::Tab | KeyCode::Down => app.form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form_mut().focus_previous(),
        KeyCode::Right => app.form_mut().next_correct(),
        KeyCode::Left => app.form_mut().previous_correct(),
        KeyCode::Backspace => app.form_mut().pop_char(),
        KeyCode::Char(c) => app.form_mut().push_char(c),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc if !app.form().is_submitting() => app.navigate(Screen::Quiz),
        _ => {}
    }
}

fn handle_list_input<A: QuizApi + 'static>(app: &mut App<A>, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.list_mut().select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.list_mut().select_previous(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_listed(),
        KeyCode::Char('r') => app.reload_list(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_quiz_input<A: QuizApi + 'static>(app: &mut App<A>, key: KeyCode) {
    if app.quiz().summary().is_some() {
        app.quiz_mut().dismiss_summary();
        return;
    }

    if app.quiz().pending_delete().is_some() {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.quiz_mut().cancel_delete()
            }
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Down | KeyCode::Char('j') => app.quiz_mut().next_question(),
        KeyCode::Up | KeyCode::Char('k') => app.quiz_mut().previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.quiz_mut().next_choice(),
        KeyCode::Left | KeyCode::Char('h') => app.quiz_mut().previous_choice(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.quiz_mut().select_highlighted();
        }
        KeyCode::Char('s') => app.submit_quiz(),
        KeyCode::Char('d') | KeyCode::Delete => app.quiz_mut().stage_delete_focused(),
        KeyCode::Char('r') => app.reload_quiz(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}
