mod feedback;
pub(crate) mod question;
mod session;

pub use feedback::{
    option_variant, OptionVariant, OptionView, QuestionView, ScoreTier, SessionSnapshot,
};
pub use question::{Question, QuestionError, QuestionSet, MIN_OPTIONS};
pub use session::{Advance, Phase, QuizSession, ScoreSummary, SessionError, SessionState, Submission};

/// Which screen the terminal front end is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Loading,
    Quiz,
    Result,
}
