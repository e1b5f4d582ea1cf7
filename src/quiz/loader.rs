use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppResult;

use super::{AnswerValue, Question, QuestionType, Quiz};

pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 30;

const PLACEHOLDER_OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];

/// The raw `question` field arrives either as a plain string or as a
/// structured `{ text, options }` object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrompt {
    Text(String),
    Structured {
        text: String,
        #[serde(default)]
        options: Option<Vec<String>>,
    },
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub enum RawQuestionType {
    #[serde(
        rename = "multiple-choice",
        alias = "multiple_choice",
        alias = "multipleChoice",
        alias = "MultipleChoice"
    )]
    MultipleChoice,
    #[serde(rename = "true-false", alias = "true_false", alias = "trueFalse", alias = "TrueFalse")]
    TrueFalse,
    #[serde(
        rename = "short-answer",
        alias = "short_answer",
        alias = "shortAnswer",
        alias = "ShortAnswer"
    )]
    ShortAnswer,
}

impl From<RawQuestionType> for QuestionType {
    fn from(raw: RawQuestionType) -> Self {
        match raw {
            RawQuestionType::MultipleChoice => QuestionType::MultipleChoice,
            RawQuestionType::TrueFalse => QuestionType::TrueFalse,
            RawQuestionType::ShortAnswer => QuestionType::ShortAnswer,
        }
    }
}

/// One item of the question list payload.
#[derive(Clone, Debug, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "question_no")]
    pub number: u32,
    #[serde(rename = "question_type")]
    pub question_type: RawQuestionType,
    pub question: RawPrompt,
    #[serde(rename = "correct_answer")]
    pub correct_answer: AnswerValue,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub points: Option<u32>,
}

/// Quiz metadata from the quiz lookup. All optional: the lookup is
/// allowed to fail without blocking the attempt.
#[derive(Clone, Debug, Default)]
pub struct QuizMeta {
    pub time_limit_minutes: Option<u32>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Normalizes one raw question into the canonical shape, so nothing
/// downstream branches on the raw payload again.
///
/// A string prompt on a multiple choice question is wrapped with the
/// sibling `options` field, or with fixed placeholder options when the
/// payload has none. A structured prompt is used as-is; its missing
/// options are kept missing and flagged at render time.
pub fn normalize_question(raw: RawQuestion) -> Question {
    let question_type = raw.question_type.into();
    let (text, options) = match raw.question {
        RawPrompt::Structured { text, options } => match question_type {
            QuestionType::MultipleChoice => (text, options),
            _ => (text, None),
        },
        RawPrompt::Text(text) => match question_type {
            QuestionType::MultipleChoice => {
                let options = raw
                    .options
                    .filter(|o| !o.is_empty())
                    .unwrap_or_else(|| PLACEHOLDER_OPTIONS.iter().map(|s| s.to_string()).collect());
                (text, Some(options))
            }
            _ => (text, None),
        },
    };
    Question::new(
        raw.number,
        question_type,
        text,
        options,
        raw.correct_answer,
        raw.points.unwrap_or(1),
    )
}

pub fn build_quiz(
    title: String,
    description: String,
    meta: QuizMeta,
    raw_questions: Vec<RawQuestion>,
) -> Quiz {
    let questions: Vec<_> = raw_questions.into_iter().map(normalize_question).collect();
    let total_points = questions.iter().map(Question::points).sum();
    Quiz::new(
        title,
        description,
        meta.time_limit_minutes.unwrap_or(DEFAULT_TIME_LIMIT_MINUTES),
        total_points,
        meta.deadline,
        questions,
    )
}

/// The local quiz file shape used by preview mode.
#[derive(Debug, Deserialize)]
struct RawQuiz {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "timeLimit", default)]
    time_limit: Option<u32>,
    #[serde(default)]
    deadline: Option<DateTime<Utc>>,
    questions: Vec<RawQuestion>,
}

pub fn from_file(path: &Path) -> AppResult<Quiz> {
    let data = std::fs::read_to_string(path)?;
    let raw: RawQuiz = serde_json::from_str(&data)?;
    let meta = QuizMeta { time_limit_minutes: raw.time_limit, deadline: raw.deadline };
    Ok(build_quiz(raw.title, raw.description, meta, raw.questions))
}
