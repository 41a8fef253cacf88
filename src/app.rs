use std::time::Duration;

use tracing::debug;

use crate::gate::{GatePhase, StartGate};
use crate::models::{Advance, AppState, QuestionSet, QuizSession, SessionSnapshot, Submission};

pub struct App {
    pub state: AppState,
    session: QuizSession,
    gate: StartGate,
    use_gate: bool,
    /// Highlighted option on the question screen. UI state only.
    cursor: usize,
    result_scroll: usize,
    ticks: usize,
}

impl App {
    pub fn new(questions: QuestionSet, use_gate: bool, loading_delay: Duration) -> Self {
        Self {
            state: AppState::Welcome,
            session: QuizSession::new(questions),
            gate: StartGate::new(loading_delay),
            use_gate,
            cursor: 0,
            result_scroll: 0,
            ticks: 0,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.session)
    }

    pub fn gate_phase(&self) -> GatePhase {
        self.gate.phase()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Monotonic frame counter, drives the loading spinner.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn start_quiz(&mut self) {
        if self.state != AppState::Welcome {
            return;
        }
        if self.use_gate {
            self.gate.start();
            self.state = AppState::Loading;
            self.tick();
        } else {
            self.state = AppState::Quiz;
        }
    }

    /// Called once per event loop iteration.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.state == AppState::Loading && self.gate.poll() == GatePhase::Ready {
            debug!("loading finished, showing first question");
            self.state = AppState::Quiz;
        }
    }

    pub fn cancel_loading(&mut self) {
        if self.state == AppState::Loading {
            self.gate.cancel();
            self.state = AppState::Welcome;
        }
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map(|q| q.options.len())
            .unwrap_or(0)
    }

    fn can_move_cursor(&self) -> bool {
        self.state == AppState::Quiz && self.session.selected_option_index().is_none()
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if self.can_move_cursor() && count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if self.can_move_cursor() && count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Answer with the highlighted option.
    pub fn submit_selected(&mut self) -> Submission {
        self.submit_option(self.cursor)
    }

    /// Answer with option `index`; indexes the question does not have are ignored.
    pub fn submit_option(&mut self, index: usize) -> Submission {
        if self.state != AppState::Quiz || index >= self.option_count() {
            return Submission::Ignored;
        }
        self.cursor = index;
        self.session.submit_answer(index)
    }

    pub fn next_question(&mut self) {
        if self.state != AppState::Quiz {
            return;
        }
        match self.session.advance() {
            Advance::Next { .. } => self.cursor = 0,
            Advance::Completed => {
                self.result_scroll = 0;
                self.state = AppState::Result;
            }
            Advance::Ignored => {}
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.answered_correctly().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.gate.reset();
        self.cursor = 0;
        self.result_scroll = 0;
        self.state = if self.use_gate {
            AppState::Welcome
        } else {
            AppState::Quiz
        };
    }
}
