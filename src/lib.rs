//! # avengers-quiz
//!
//! A ten-question superhero trivia quiz for the terminal, built around a
//! small, UI-independent session state machine.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use avengers_quiz::{Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Built-in questions, default settings
//!     let quiz = Quiz::builtin()?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The state machine can also be driven headlessly:
//!
//! ```rust
//! use avengers_quiz::{QuestionSet, QuizSession};
//!
//! let mut session = QuizSession::new(QuestionSet::builtin().unwrap());
//! session.submit_answer(0);
//! session.advance();
//! assert_eq!(session.score(), 1);
//! ```

mod app;
pub mod config;
mod data;
pub mod gate;
pub mod logging;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::{Stream, StreamExt};
use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

pub use app::App;
pub use config::{QuestionSource, QuizConfig};
pub use data::{load_builtin_questions, load_questions_from_json, LoadError};
pub use gate::{GatePhase, StartGate};
pub use models::{
    option_variant, Advance, AppState, OptionVariant, OptionView, Phase, Question, QuestionError,
    QuestionSet, QuestionView, QuizSession, ScoreSummary, ScoreTier, SessionError,
    SessionSnapshot, SessionState, Submission, MIN_OPTIONS,
};

/// How long the event loop waits for input before redrawing.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz over `questions` with the default start screen and delay.
    pub fn new(questions: QuestionSet) -> Self {
        let config = QuizConfig::default();
        Self {
            app: App::new(questions, config.start_gate, config.loading_delay),
        }
    }

    /// Build a quiz from resolved settings, loading the configured questions.
    pub fn with_config(config: &QuizConfig) -> Result<Self, QuizError> {
        let questions = config.questions.load()?;
        Ok(Self {
            app: App::new(questions, config.start_gate, config.loading_delay),
        })
    }

    /// The quiz with the questions compiled into the binary.
    pub fn builtin() -> Result<Self, QuizError> {
        Ok(Self::new(load_builtin_questions()?))
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use avengers_quiz::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        Ok(Self::new(load_questions_from_json(path)?))
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal, displays the quiz UI, and returns when the
    /// user quits. Must be called inside a tokio runtime so the loading
    /// delay can be scheduled.
    pub async fn run(mut self) -> Result<(), QuizError> {
        info!(questions = self.app.session().total_questions(), "starting quiz UI");
        let mut terminal = terminal::TerminalGuard::enter()?;
        run_event_loop(&mut self.app, EventStream::new(), |app| {
            terminal.draw(|frame| ui::render(frame, app)).map(|_| ())
        })
        .await
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// Redraw on every input event and at least once per tick until the user quits.
async fn run_event_loop<S, D>(app: &mut App, events: S, mut draw: D) -> Result<(), QuizError>
where
    S: Stream<Item = io::Result<Event>>,
    D: FnMut(&App) -> io::Result<()>,
{
    let mut events = std::pin::pin!(events);
    let mut ticker = interval(TICK_RATE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        app.tick();
        draw(app)?;

        tokio::select! {
            _ = ticker.tick() => {}
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) {
                        info!("quit requested");
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Loading => handle_loading_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn is_quit(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        key => is_quit(key),
    }
}

fn handle_loading_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => {
            app.cancel_loading();
            false
        }
        key if is_quit(key) => {
            app.cancel_loading();
            true
        }
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    let answered = app.session().selected_option_index().is_some();
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') if answered => app.next_question(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit_selected();
        }
        KeyCode::Char('n') => app.next_question(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.submit_option(index);
        }
        key => return is_quit(key),
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        key => return is_quit(key),
    }
    false
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use futures_util::stream;

    use super::*;

    fn press(app: &mut App, keys: &[KeyCode]) -> bool {
        let mut quit = false;
        for key in keys {
            app.tick();
            quit = handle_input(app, *key);
        }
        quit
    }

    fn app_without_gate() -> App {
        App::new(QuestionSet::builtin().unwrap(), false, Duration::ZERO)
    }

    #[test]
    fn test_keyboard_walkthrough() {
        let mut app = app_without_gate();
        assert!(!press(&mut app, &[KeyCode::Enter]));
        assert_eq!(app.state, AppState::Quiz);

        // Question 1: Tony Stark is option 1.
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.session().score(), 1);

        // Repeated enter advances, it does not answer again.
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.session().current_index(), 1);
        assert_eq!(app.session().answered_correctly(), &[true]);

        // Question 2: move the cursor to "Estados Unidos".
        press(&mut app, &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Char(' ')]);
        assert_eq!(app.session().score(), 2);

        press(&mut app, &[KeyCode::Char('n'), KeyCode::Char('4'), KeyCode::Char('1')]);
        assert_eq!(app.session().answered_correctly(), &[true, true, false]);
        assert_eq!(app.session().selected_option_index(), Some(3));
    }

    #[test]
    fn test_finish_and_restart_by_keyboard() {
        let mut app = app_without_gate();
        press(&mut app, &[KeyCode::Enter]);
        for _ in 0..10 {
            press(&mut app, &[KeyCode::Char('2'), KeyCode::Enter]);
        }
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.session().score(), 3);

        press(&mut app, &[KeyCode::Char('r')]);
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session().state(), &SessionState::default());
    }

    #[test]
    fn test_quit_from_every_screen() {
        let mut app = app_without_gate();
        assert!(press(&mut app, &[KeyCode::Char('q')]));

        let mut app = app_without_gate();
        assert!(press(&mut app, &[KeyCode::Enter, KeyCode::Char('Q')]));
    }

    #[test]
    fn test_digits_beyond_options_are_ignored() {
        let mut app = app_without_gate();
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('9')]);
        assert!(app.session().answered_correctly().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_cancels_loading() {
        let mut app = App::new(
            QuestionSet::builtin().unwrap(),
            true,
            Duration::from_millis(500),
        );
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.state, AppState::Loading);

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.gate_phase(), GatePhase::Idle);
    }

    fn key_event(code: KeyCode) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_loop_lets_gate_finish_on_current_thread() {
        let mut app = App::new(
            QuestionSet::builtin().unwrap(),
            true,
            Duration::from_millis(10),
        );
        let events = stream::iter([key_event(KeyCode::Enter)])
            .chain(stream::once(async {
                tokio::time::sleep(Duration::from_millis(350)).await;
                key_event(KeyCode::Char('q'))
            }))
            .chain(stream::pending());

        let mut frames = Vec::new();
        run_event_loop(&mut app, events, |app| {
            frames.push(app.state);
            Ok(())
        })
        .await
        .unwrap();

        assert!(frames.contains(&AppState::Loading));
        assert_eq!(app.state, AppState::Quiz);
    }

    #[tokio::test]
    async fn test_event_loop_ends_with_input_stream() {
        let mut app = app_without_gate();
        let events = stream::iter([key_event(KeyCode::Enter), key_event(KeyCode::Enter)]);

        run_event_loop(&mut app, events, |_| Ok(())).await.unwrap();

        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session().score(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = QuizError::from(LoadError::Invalid {
            path: "q.json".into(),
            source: QuestionError::Empty,
        });
        assert_eq!(
            err.to_string(),
            "failed to load questions: invalid questions in q.json: question set must contain at least one question"
        );
    }
}
