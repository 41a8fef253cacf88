use std::path::PathBuf;
use std::time::Duration;

use crate::data::{load_builtin_questions, load_questions_from_json, LoadError};
use crate::gate::DEFAULT_LOADING_DELAY;
use crate::models::QuestionSet;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "avengers-quiz.log";

/// Where the questions come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuestionSource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl QuestionSource {
    pub fn load(&self) -> Result<QuestionSet, LoadError> {
        match self {
            Self::Builtin => load_builtin_questions(),
            Self::File(path) => load_questions_from_json(path),
        }
    }
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub questions: QuestionSource,
    pub loading_delay: Duration,
    /// Show the start screen with a loading transition before the first question.
    pub start_gate: bool,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: QuestionSource::Builtin,
            loading_delay: DEFAULT_LOADING_DELAY,
            start_gate: true,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
