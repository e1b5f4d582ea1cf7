use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::AnswerValue;
use crate::quiz::loader::RawQuestion;

/// The bare `{ success, message? }` envelope returned by mutations.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizInfoResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<QuizInfoPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizInfoPayload {
    #[serde(rename = "timeLimit", default)]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

/// The question list carries the quiz title and description alongside
/// the usual envelope fields.
#[derive(Debug, Deserialize)]
pub struct QuestionListResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data: Vec<RawQuestion>,
}

/// The attempt record posted after grading. Field casing is mixed on the
/// wire; keep it exactly as the backend expects it.
#[derive(Clone, Debug, Serialize)]
pub struct AttemptPayload {
    #[serde(rename = "quizId")]
    pub quiz_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub attempt_no: u32,
    pub score: u32,
    pub time_taken: u64,
    pub submitted_at: DateTime<Utc>,
    pub answers: BTreeMap<String, AnswerValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_list_response_parses_the_documented_shape() {
        let response: QuestionListResponse = serde_json::from_str(
            r#"{
                "success": true,
                "title": "Geography",
                "description": "Capitals",
                "data": [
                    {
                        "question_no": 1,
                        "question_type": "multiple-choice",
                        "question": { "text": "Pick one", "options": ["A", "B"] },
                        "correct_answer": 1,
                        "quizId": "q-1"
                    },
                    {
                        "question_no": 2,
                        "question_type": "short-answer",
                        "question": "Capital of France?",
                        "correct_answer": "Paris",
                        "quizId": "q-1"
                    }
                ]
            }"#,
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.title.as_deref(), Some("Geography"));
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].number, 1);
        assert_eq!(response.data[1].correct_answer, "Paris".into());
    }

    #[test]
    fn quiz_info_tolerates_extra_fields_and_missing_limit() {
        let response: QuizInfoResponse =
            serde_json::from_str(r#"{ "success": true, "data": { "createdBy": "someone" } }"#)
                .unwrap();
        let data = response.data.unwrap();
        assert_eq!(data.time_limit, None);
        assert_eq!(data.deadline, None);
    }

    #[test]
    fn attempt_payload_serializes_the_exact_field_names() {
        let mut answers = BTreeMap::new();
        answers.insert("1".to_string(), AnswerValue::Number(2));
        answers.insert("2".to_string(), "true".into());
        let payload = AttemptPayload {
            quiz_id: "q-1".into(),
            user_id: "u-1".into(),
            attempt_no: 1,
            score: 5,
            time_taken: 321,
            submitted_at: Utc::now(),
            answers,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["quizId"], "q-1");
        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["attempt_no"], 1);
        assert_eq!(value["score"], 5);
        assert_eq!(value["time_taken"], 321);
        assert!(value["submitted_at"].is_string());
        assert_eq!(value["answers"]["1"], 2);
        assert_eq!(value["answers"]["2"], "true");
    }
}
