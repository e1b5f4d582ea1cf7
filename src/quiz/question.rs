use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            QuestionType::MultipleChoice => f.write_str("multiple choice"),
            QuestionType::TrueFalse => f.write_str("true/false"),
            QuestionType::ShortAnswer => f.write_str("short answer"),
        }
    }
}

/// An answer encoding as it travels over the wire: an option index for
/// multiple choice, or a string for everything else. The empty string is
/// the "no answer" sentinel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Text(String),
}

impl AnswerValue {
    pub fn empty() -> Self {
        AnswerValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AnswerValue::Text(t) if t.is_empty())
    }

    pub fn as_index(&self) -> Option<i64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(t) => t.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Text(t) => t.clone(),
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_str(&self.as_text())
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    number: u32,
    question_type: QuestionType,
    text: String,
    options: Option<Vec<String>>,
    correct_answer: AnswerValue,
    points: u32,
}

impl Question {
    pub fn new(
        number: u32,
        question_type: QuestionType,
        text: String,
        options: Option<Vec<String>>,
        correct_answer: AnswerValue,
        points: u32,
    ) -> Self {
        Question { number, question_type, text, options, correct_answer, points }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> Option<&Vec<String>> {
        self.options.as_ref()
    }

    pub fn correct_answer(&self) -> &AnswerValue {
        &self.correct_answer
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// A multiple choice question without options cannot be presented.
    /// It is still scored by index, so the rest of the quiz stays usable.
    pub fn is_malformed(&self) -> bool {
        self.question_type == QuestionType::MultipleChoice
            && self.options.as_ref().is_none_or(|o| o.is_empty())
    }

    pub fn is_correct(&self, answer: &AnswerValue) -> bool {
        if answer.is_empty() {
            return false;
        }
        match self.question_type {
            QuestionType::MultipleChoice => {
                match (answer.as_index(), self.correct_answer.as_index()) {
                    (Some(given), Some(expected)) => given == expected,
                    _ => false,
                }
            }
            QuestionType::TrueFalse => {
                answer.as_text().eq_ignore_ascii_case(&self.correct_answer.as_text())
            }
            QuestionType::ShortAnswer => {
                answer.as_text().trim().to_lowercase()
                    == self.correct_answer.as_text().trim().to_lowercase()
            }
        }
    }

    pub fn answer_text(&self, answer: &AnswerValue) -> String {
        match self.question_type {
            QuestionType::MultipleChoice => answer
                .as_index()
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| self.options.as_ref().and_then(|o| o.get(i)))
                .cloned()
                .unwrap_or_else(|| answer.as_text()),
            _ => answer.as_text(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Quiz {
    title: String,
    description: String,
    time_limit_minutes: u32,
    total_points: u32,
    deadline: Option<DateTime<Utc>>,
    questions: Vec<Question>,
}

impl Quiz {
    pub fn new(
        title: String,
        description: String,
        time_limit_minutes: u32,
        total_points: u32,
        deadline: Option<DateTime<Utc>>,
        questions: Vec<Question>,
    ) -> Self {
        Quiz { title, description, time_limit_minutes, total_points, deadline, questions }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn deadline(&self) -> Option<&DateTime<Utc>> {
        self.deadline.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, number: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.number == number)
    }
}
