use std::collections::BTreeMap;

use super::{AnswerValue, Question};

/// The answers collected during one attempt, keyed by question number.
/// One entry per question, last write wins.
#[derive(Clone, Debug, Default)]
pub struct AnswerSheet {
    entries: BTreeMap<u32, AnswerValue>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        AnswerSheet::default()
    }

    /// Idempotent upsert. Value encoding is the caller's responsibility.
    pub fn set(&mut self, number: u32, value: AnswerValue) {
        self.entries.insert(number, value);
    }

    /// The stored value, or the empty sentinel when the question has not
    /// been answered. Never an option type, so callers can render
    /// unconditionally.
    pub fn answer(&self, number: u32) -> AnswerValue {
        self.entries.get(&number).cloned().unwrap_or_else(AnswerValue::empty)
    }

    pub fn is_answered(&self, number: u32) -> bool {
        self.entries.get(&number).is_some_and(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unanswered(&self, questions: &[Question]) -> Vec<u32> {
        questions
            .iter()
            .map(|q| q.number())
            .filter(|n| !self.is_answered(*n))
            .collect()
    }

    /// The snapshot shape posted to the backend: question numbers as keys.
    pub fn to_wire(&self) -> BTreeMap<String, AnswerValue> {
        self.entries.iter().map(|(n, v)| (n.to_string(), v.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionType;

    fn questions(numbers: &[u32]) -> Vec<Question> {
        numbers
            .iter()
            .map(|n| {
                Question::new(*n, QuestionType::ShortAnswer, format!("q{}", n), None, "x".into(), 1)
            })
            .collect()
    }

    #[test]
    fn upsert_keeps_one_entry_per_question() {
        let mut sheet = AnswerSheet::new();
        sheet.set(3, "first".into());
        sheet.set(3, "second".into());
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.answer(3), "second".into());
    }

    #[test]
    fn missing_answers_return_the_empty_sentinel() {
        let sheet = AnswerSheet::new();
        assert_eq!(sheet.answer(7), AnswerValue::empty());
        assert!(sheet.answer(7).is_empty());
    }

    #[test]
    fn unanswered_lists_questions_missing_from_the_sheet() {
        let mut sheet = AnswerSheet::new();
        sheet.set(2, AnswerValue::Number(1));
        let questions = questions(&[1, 2, 3]);
        assert_eq!(sheet.unanswered(&questions), vec![1, 3]);
    }

    #[test]
    fn wire_snapshot_uses_string_keys() {
        let mut sheet = AnswerSheet::new();
        sheet.set(1, AnswerValue::Number(2));
        sheet.set(2, "true".into());
        let wire = sheet.to_wire();
        assert_eq!(wire.get("1"), Some(&AnswerValue::Number(2)));
        assert_eq!(wire.get("2"), Some(&"true".into()));
    }
}
