//! Quiz session state machine.
//!
//! A [`QuizSession`] walks a [`QuestionSet`] exactly once, front to back.
//! All mutable state lives in [`SessionState`], a plain serializable value,
//! so the rendering layer only ever sees a consistent snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use super::question::{Question, QuestionSet};

/// Errors for queries that have no meaningful answer in the current state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("the session is completed, there is no current question")]
    Completed,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The current question is waiting for an answer.
    Unanswered,
    /// The current question has been answered and feedback is showing.
    Answered,
    /// The last question has been answered and advanced past.
    Completed,
}

/// Result of [`QuizSession::submit_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Recorded { correct: bool },
    /// The current question was already answered, or the session is over.
    Ignored,
}

/// Result of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Completed,
    /// Nothing has been answered yet, or the session is over.
    Ignored,
}

/// Mutable part of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub current_index: usize,
    pub selected_option_index: Option<usize>,
    /// One entry per answered question, in question order.
    pub answered_correctly: Vec<bool>,
    pub score: usize,
    pub completed: bool,
}

/// Final (or running) tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
}

impl ScoreSummary {
    pub fn new(score: usize, total: usize) -> Self {
        Self {
            score,
            total,
            percentage: rounded_percent(score, total),
        }
    }
}

/// `round(100 * part / whole)` with halves rounded up.
pub(crate) fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let percent = (200 * part + whole) / (2 * whole);
    u32::try_from(percent).unwrap_or(u32::MAX)
}

/// One linear play-through of a question set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: QuestionSet,
    state: SessionState,
}

impl QuizSession {
    pub fn new(questions: QuestionSet) -> Self {
        info!(total = questions.len(), "quiz session created");
        Self {
            questions,
            state: SessionState::default(),
        }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.completed {
            Phase::Completed
        } else if self.state.selected_option_index.is_some() {
            Phase::Answered
        } else {
            Phase::Unanswered
        }
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// 1-based position of the current question, for display.
    pub fn question_number(&self) -> usize {
        self.state.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_option_index(&self) -> Option<usize> {
        self.state.selected_option_index
    }

    pub fn answered_correctly(&self) -> &[bool] {
        &self.state.answered_correctly
    }

    pub fn score(&self) -> usize {
        self.state.score
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    pub fn is_last_question(&self) -> bool {
        self.state.current_index == self.questions.last_index()
    }

    /// The question being shown.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Completed`] once the session has finished.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        if self.state.completed {
            return Err(SessionError::Completed);
        }
        Ok(&self.questions[self.state.current_index])
    }

    /// Record an answer for the current question.
    ///
    /// Only the first submission per question counts; later calls are ignored.
    pub fn submit_answer(&mut self, option_index: usize) -> Submission {
        if self.state.completed || self.state.selected_option_index.is_some() {
            trace!(option_index, "answer ignored, question already answered");
            return Submission::Ignored;
        }

        let question = &self.questions[self.state.current_index];
        if option_index >= question.options.len() {
            warn!(
                option_index,
                options = question.options.len(),
                "answer outside the option range, scored as incorrect"
            );
        }

        let correct = question.is_correct(option_index);
        self.state.selected_option_index = Some(option_index);
        self.state.answered_correctly.push(correct);
        if correct {
            self.state.score += 1;
        }

        debug!(
            question = question.id,
            option_index,
            correct,
            score = self.state.score,
            "answer recorded"
        );
        Submission::Recorded { correct }
    }

    /// Move past the answered current question.
    pub fn advance(&mut self) -> Advance {
        if self.state.completed || self.state.selected_option_index.is_none() {
            trace!("advance ignored, current question not answered");
            return Advance::Ignored;
        }

        if self.is_last_question() {
            self.state.completed = true;
            let summary = self.score_summary();
            info!(
                score = summary.score,
                total = summary.total,
                percentage = summary.percentage,
                "quiz completed"
            );
            return Advance::Completed;
        }

        self.state.current_index += 1;
        self.state.selected_option_index = None;
        debug!(index = self.state.current_index, "advanced to next question");
        Advance::Next {
            index: self.state.current_index,
        }
    }

    /// Throw away all progress and start over on the same questions.
    pub fn restart(&mut self) {
        self.state = SessionState::default();
        info!("quiz session restarted");
    }

    pub fn score_summary(&self) -> ScoreSummary {
        ScoreSummary::new(self.state.score, self.questions.len())
    }

    /// Progress through the set as a whole percentage, counting the current question.
    pub fn progress_percent(&self) -> u32 {
        if self.state.completed {
            return 100;
        }
        rounded_percent(self.question_number(), self.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::tests::question;

    fn two_questions() -> QuestionSet {
        QuestionSet::new(vec![question(1, &["A", "B"], 0), question(2, &["A", "B"], 1)]).unwrap()
    }

    fn builtin_session() -> QuizSession {
        QuizSession::new(QuestionSet::builtin().unwrap())
    }

    fn assert_invariants(session: &QuizSession) {
        let state = session.state();
        let correct = state.answered_correctly.iter().filter(|c| **c).count();
        assert_eq!(state.score, correct);

        let expected_len = if state.completed {
            session.total_questions()
        } else {
            state.current_index + usize::from(state.selected_option_index.is_some())
        };
        assert_eq!(state.answered_correctly.len(), expected_len);
        assert!(state.current_index < session.total_questions());
    }

    #[test]
    fn test_walkthrough() {
        let mut session = QuizSession::new(two_questions());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_completed());
        assert_eq!(session.phase(), Phase::Unanswered);

        assert_eq!(session.submit_answer(0), Submission::Recorded { correct: true });
        assert_eq!(session.score(), 1);
        assert_eq!(session.answered_correctly(), &[true]);
        assert_eq!(session.phase(), Phase::Answered);

        assert_eq!(session.advance(), Advance::Next { index: 1 });
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_option_index(), None);

        assert_eq!(session.submit_answer(0), Submission::Recorded { correct: false });
        assert_eq!(session.score(), 1);
        assert_eq!(session.answered_correctly(), &[true, false]);

        assert_eq!(session.advance(), Advance::Completed);
        assert!(session.is_completed());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.phase(), Phase::Completed);

        assert_eq!(
            session.score_summary(),
            ScoreSummary {
                score: 1,
                total: 2,
                percentage: 50
            }
        );
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut session = QuizSession::new(two_questions());
        session.submit_answer(1);
        let before = session.state().clone();

        assert_eq!(session.submit_answer(0), Submission::Ignored);
        assert_eq!(session.state(), &before);
        assert_eq!(session.selected_option_index(), Some(1));
    }

    #[test]
    fn test_premature_advance_is_ignored() {
        let mut session = QuizSession::new(two_questions());
        assert_eq!(session.advance(), Advance::Ignored);
        assert_eq!(session.state(), &SessionState::default());
    }

    #[test]
    fn test_completed_session_ignores_input() {
        let mut session = QuizSession::new(two_questions());
        for _ in 0..2 {
            session.submit_answer(0);
            session.advance();
        }
        let finished = session.state().clone();

        assert_eq!(session.submit_answer(1), Submission::Ignored);
        assert_eq!(session.advance(), Advance::Ignored);
        assert_eq!(session.state(), &finished);
        assert_eq!(session.current_question(), Err(SessionError::Completed));
    }

    #[test]
    fn test_out_of_range_answer_counts_as_wrong() {
        let mut session = QuizSession::new(two_questions());
        assert_eq!(session.submit_answer(9), Submission::Recorded { correct: false });
        assert_eq!(session.score(), 0);
        assert_invariants(&session);
    }

    #[test]
    fn test_invariants_hold_for_every_answer_pattern() {
        let set = QuestionSet::builtin().unwrap();
        let total = set.len();

        // Cycle answer choices with a different stride per run.
        for stride in 0..4 {
            let mut session = QuizSession::new(set.clone());
            let mut last_index = 0;

            for step in 0..total {
                assert_invariants(&session);
                session.submit_answer((step * stride + stride) % 4);
                assert_invariants(&session);

                // Repeated presses change nothing.
                let answered = session.state().clone();
                session.submit_answer(step % 4);
                assert_eq!(session.state(), &answered);

                session.advance();
                assert!(session.current_index() >= last_index);
                last_index = session.current_index();
                assert_invariants(&session);
            }

            assert!(session.is_completed());
            assert_eq!(session.answered_correctly().len(), total);
        }
    }

    #[test]
    fn test_exactly_n_pairs_reach_completion() {
        let mut session = builtin_session();
        let total = session.total_questions();

        for pair in 0..total {
            assert!(!session.is_completed(), "completed early after {} pairs", pair);
            let correct = session.current_question().unwrap().correct_option_index;
            session.submit_answer(correct);
            session.advance();
        }

        assert!(session.is_completed());
        assert_eq!(session.score_summary().percentage, 100);
    }

    #[test]
    fn test_restart_matches_fresh_session() {
        let mut session = builtin_session();
        session.submit_answer(2);
        session.advance();
        session.submit_answer(1);

        session.restart();

        let fresh = builtin_session();
        assert_eq!(session.state(), fresh.state());
        assert_eq!(session.questions(), fresh.questions());
        assert_eq!(session.phase(), Phase::Unanswered);
    }

    #[test]
    fn test_restart_after_completion() {
        let mut session = QuizSession::new(two_questions());
        for _ in 0..2 {
            session.submit_answer(1);
            session.advance();
        }
        assert!(session.is_completed());

        session.restart();
        assert_eq!(session.state(), &SessionState::default());
        assert_eq!(session.current_question().unwrap().id, 1);
    }

    #[test]
    fn test_progress_percent() {
        let mut session = builtin_session();
        assert_eq!(session.progress_percent(), 10);
        session.submit_answer(0);
        session.advance();
        assert_eq!(session.progress_percent(), 20);

        let mut short = QuizSession::new(two_questions());
        assert_eq!(short.progress_percent(), 50);
        short.submit_answer(0);
        short.advance();
        short.submit_answer(0);
        short.advance();
        assert_eq!(short.progress_percent(), 100);
    }

    #[test]
    fn test_rounded_percent() {
        assert_eq!(rounded_percent(0, 10), 0);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13); // 12.5 rounds up
        assert_eq!(rounded_percent(10, 10), 100);
        assert_eq!(rounded_percent(0, 0), 0);
    }

    #[test]
    fn test_state_serializes() {
        let mut session = QuizSession::new(two_questions());
        session.submit_answer(0);

        let json = serde_json::to_string(session.state()).unwrap();
        assert!(json.contains("\"answered_correctly\":[true]"));

        let restored: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, session.state());
    }
}
