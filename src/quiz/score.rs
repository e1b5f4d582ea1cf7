use std::time::Duration;

use super::{AnswerSheet, AnswerValue, Quiz};

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionResult {
    pub question_no: u32,
    pub user_answer: AnswerValue,
    pub correct_answer: AnswerValue,
    pub is_correct: bool,
    pub points_earned: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizResult {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub time_spent_seconds: u64,
    pub question_results: Vec<QuestionResult>,
}

impl QuizResult {
    pub fn correct_count(&self) -> usize {
        self.question_results.iter().filter(|r| r.is_correct).count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.question_results.len() - self.correct_count()
    }
}

/// Grades a frozen answer snapshot against the quiz. Pure: repeated calls
/// with the same inputs yield the same result.
pub fn grade(quiz: &Quiz, answers: &AnswerSheet, time_spent: Duration) -> QuizResult {
    let question_results: Vec<_> = quiz
        .questions()
        .iter()
        .map(|question| {
            let user_answer = answers.answer(question.number());
            let is_correct = question.is_correct(&user_answer);
            QuestionResult {
                question_no: question.number(),
                user_answer,
                correct_answer: question.correct_answer().clone(),
                is_correct,
                points_earned: if is_correct { question.points() } else { 0 },
            }
        })
        .collect();

    let total_score = question_results.iter().map(|r| r.points_earned).sum();
    let max_score = quiz.total_points();
    let percentage = if max_score == 0 {
        0
    } else {
        (f64::from(total_score) / f64::from(max_score) * 100.0).round() as u32
    };

    QuizResult {
        total_score,
        max_score,
        percentage,
        time_spent_seconds: time_spent.as_secs_f64().round() as u64,
        question_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Question, QuestionType};

    fn quiz() -> Quiz {
        let questions = vec![
            Question::new(
                1,
                QuestionType::MultipleChoice,
                "Pick one".into(),
                Some(vec!["A".into(), "B".into(), "C".into(), "D".into()]),
                AnswerValue::Number(2),
                1,
            ),
            Question::new(2, QuestionType::TrueFalse, "Really?".into(), None, "True".into(), 1),
        ];
        Quiz::new("Test".into(), String::new(), 30, 2, None, questions)
    }

    #[test]
    fn one_of_two_correct_scores_fifty_percent() {
        let mut answers = AnswerSheet::new();
        answers.set(1, AnswerValue::Number(2));
        answers.set(2, "false".into());

        let result = grade(&quiz(), &answers, Duration::from_secs(90));
        assert_eq!(result.total_score, 1);
        assert_eq!(result.max_score, 2);
        assert_eq!(result.percentage, 50);
        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.incorrect_count(), 1);
        assert_eq!(result.time_spent_seconds, 90);
    }

    #[test]
    fn grading_is_deterministic() {
        let mut answers = AnswerSheet::new();
        answers.set(1, "2".into());

        let first = grade(&quiz(), &answers, Duration::from_secs(10));
        let second = grade(&quiz(), &answers, Duration::from_secs(10));
        assert_eq!(first, second);
    }

    #[test]
    fn unanswered_questions_earn_zero_points() {
        let answers = AnswerSheet::new();
        let result = grade(&quiz(), &answers, Duration::ZERO);
        assert_eq!(result.total_score, 0);
        assert_eq!(result.percentage, 0);
        assert!(result.question_results.iter().all(|r| !r.is_correct));
        assert!(result.question_results.iter().all(|r| r.user_answer.is_empty()));
    }

    #[test]
    fn weighted_questions_sum_their_points() {
        let questions = vec![
            Question::new(1, QuestionType::ShortAnswer, "a".into(), None, "x".into(), 3),
            Question::new(2, QuestionType::ShortAnswer, "b".into(), None, "y".into(), 2),
        ];
        let quiz = Quiz::new("Weighted".into(), String::new(), 30, 5, None, questions);

        let mut answers = AnswerSheet::new();
        answers.set(1, "x".into());
        let result = grade(&quiz, &answers, Duration::ZERO);
        assert_eq!(result.total_score, 3);
        assert_eq!(result.max_score, 5);
        assert_eq!(result.percentage, 60);
    }
}
