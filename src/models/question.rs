use std::collections::HashSet;
use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of answer options a question may carry.
pub const MIN_OPTIONS: usize = 2;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    /// Who or what the question is about, shown as a badge.
    pub subject_label: String,
    /// Uninterpreted asset reference, resolved by the front end.
    pub image_ref: String,
}

impl Question {
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_option_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_option_index]
    }
}

/// Reasons a question sequence is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question set must contain at least one question")]
    Empty,

    #[error("question {id} has {count} options, at least two are required")]
    TooFewOptions { id: u32, count: usize },

    #[error("question {id} lists the option {option:?} more than once")]
    DuplicateOption { id: u32, option: String },

    #[error("question {id} marks option {index} as correct but only has {count} options")]
    CorrectIndexOutOfRange { id: u32, index: usize, count: usize },

    #[error("question id {id} is used more than once")]
    DuplicateId { id: u32 },
}

/// An ordered, validated, immutable sequence of questions.
///
/// Cloning is cheap: every clone shares the same backing slice, so a
/// restarted session reuses the set it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Arc<[Question]>,
}

impl QuestionSet {
    /// Validate `questions` and wrap them in a set.
    ///
    /// # Errors
    ///
    /// Returns the first [`QuestionError`] found, in question order.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::Empty);
        }

        let mut ids = HashSet::with_capacity(questions.len());
        for question in &questions {
            validate_question(question)?;
            if !ids.insert(question.id) {
                return Err(QuestionError::DuplicateId { id: question.id });
            }
        }

        Ok(Self {
            questions: questions.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl Index<usize> for QuestionSet {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for QuestionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

fn validate_question(question: &Question) -> Result<(), QuestionError> {
    let count = question.options.len();
    if count < MIN_OPTIONS {
        return Err(QuestionError::TooFewOptions {
            id: question.id,
            count,
        });
    }

    if question.correct_option_index >= count {
        return Err(QuestionError::CorrectIndexOutOfRange {
            id: question.id,
            index: question.correct_option_index,
            count,
        });
    }

    let mut seen = HashSet::with_capacity(count);
    for option in &question.options {
        if !seen.insert(option.as_str()) {
            return Err(QuestionError::DuplicateOption {
                id: question.id,
                option: option.clone(),
            });
        }
    }

    Ok(())
}
