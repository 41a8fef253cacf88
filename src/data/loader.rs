use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Question, QuestionError, QuestionSet};

const BUILTIN_QUESTIONS: &str = include_str!("questions.json");
const BUILTIN_SOURCE: &str = "<built-in>";

/// Failure to obtain a usable question set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid questions in {}: {}", path.display(), source)]
    Invalid {
        path: PathBuf,
        #[source]
        source: QuestionError,
    },
}

/// The ten questions compiled into the binary.
pub fn load_builtin_questions() -> Result<QuestionSet, LoadError> {
    parse_questions(BUILTIN_QUESTIONS, Path::new(BUILTIN_SOURCE))
}

/// Read and validate a question file using the same schema as the built-in set.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionSet, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading question file");

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_questions(&json_content, path)
}

fn parse_questions(json: &str, path: &Path) -> Result<QuestionSet, LoadError> {
    let questions: Vec<Question> =
        serde_json::from_str(json).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let set = QuestionSet::new(questions).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!(source = %path.display(), count = set.len(), "questions loaded");
    Ok(set)
}

impl QuestionSet {
    /// The built-in question set.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is malformed.
    pub fn builtin() -> Result<Self, LoadError> {
        load_builtin_questions()
    }
}
