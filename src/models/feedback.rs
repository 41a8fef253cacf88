//! Read-only views of a session for the rendering layer.

use serde::Serialize;

use super::session::{Phase, QuizSession, ScoreSummary};

/// How an answer option should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionVariant {
    Neutral,
    Correct,
    Incorrect,
}

/// Presentation of option `index`, given what has been answered so far.
pub fn option_variant(
    show_result: bool,
    index: usize,
    selected: Option<usize>,
    correct: usize,
) -> OptionVariant {
    if !show_result {
        return OptionVariant::Neutral;
    }
    if index == correct {
        OptionVariant::Correct
    } else if selected == Some(index) {
        OptionVariant::Incorrect
    } else {
        OptionVariant::Neutral
    }
}

/// Grade band for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTier {
    Legendary,
    Strong,
    Fair,
    Rookie,
}

impl ScoreTier {
    /// Band for `score` out of `total`, compared on the exact ratio.
    pub fn from_score(score: usize, total: usize) -> Self {
        let reaches = |threshold: usize| 100 * score >= threshold * total;
        if total == 0 {
            Self::Rookie
        } else if reaches(90) {
            Self::Legendary
        } else if reaches(70) {
            Self::Strong
        } else if reaches(50) {
            Self::Fair
        } else {
            Self::Rookie
        }
    }

    pub fn from_summary(summary: &ScoreSummary) -> Self {
        Self::from_score(summary.score, summary.total)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Legendary => "Incredible! You are a true hero!",
            Self::Strong => "Well done! You know the Avengers!",
            Self::Fair => "Good job! Keep studying!",
            Self::Rookie => "Keep trying! Every hero needs training!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    pub variant: OptionVariant,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub prompt: String,
    pub subject_label: String,
    pub image_ref: String,
    pub options: Vec<OptionView>,
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub question_number: usize,
    pub total: usize,
    pub score: usize,
    pub progress_percent: u32,
    /// `None` once the session is completed.
    pub question: Option<QuestionView>,
    pub can_advance: bool,
    /// The next advance leads to the results instead of another question.
    pub advance_shows_results: bool,
}

impl SessionSnapshot {
    pub fn capture(session: &QuizSession) -> Self {
        let phase = session.phase();
        let selected = session.selected_option_index();
        let show_result = phase == Phase::Answered;

        let question = session.current_question().ok().map(|q| QuestionView {
            id: q.id,
            prompt: q.prompt.clone(),
            subject_label: q.subject_label.clone(),
            image_ref: q.image_ref.clone(),
            options: q
                .options
                .iter()
                .enumerate()
                .map(|(index, text)| OptionView {
                    text: text.clone(),
                    variant: option_variant(show_result, index, selected, q.correct_option_index),
                    selected: selected == Some(index),
                })
                .collect(),
        });

        Self {
            phase,
            question_number: session.question_number(),
            total: session.total_questions(),
            score: session.score(),
            progress_percent: session.progress_percent(),
            question,
            can_advance: show_result,
            advance_shows_results: show_result && session.is_last_question(),
        }
    }
}
