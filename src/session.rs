mod owner;
mod service;
mod status;
pub mod timer;

pub use service::AttemptService;
pub use status::{SessionStatus, SubmitOutcome, TickOutcome};

use tokio::sync::mpsc::channel;

use crate::api::QuizBackend;
use crate::quiz::Quiz;

pub enum AttemptSource {
    Remote { quiz_id: String, user_id: String },
    /// A non-persisted dry run: the timer stays inert and nothing is
    /// posted to the backend.
    Preview { quiz: Quiz },
}

pub fn create_session<B>(backend: B, source: AttemptSource) -> AttemptService
where
    B: QuizBackend + Send + 'static,
{
    let (job_sender, job_receiver) = channel(1000);

    owner::create_session(backend, source, job_receiver);

    AttemptService::new(job_sender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QuizBackend;
    use crate::api::payload::{AttemptPayload, QuestionListResponse, QuizInfoPayload};
    use crate::error::AppResult;
    use crate::quiz::loader::{RawPrompt, RawQuestion, RawQuestionType};

    struct OkBackend;

    impl QuizBackend for OkBackend {
        async fn fetch_quiz(&self, _quiz_id: &str) -> AppResult<QuizInfoPayload> {
            Ok(QuizInfoPayload { time_limit: Some(1), deadline: None })
        }

        async fn fetch_questions(&self, _quiz_id: &str) -> AppResult<QuestionListResponse> {
            Ok(QuestionListResponse {
                success: true,
                message: None,
                title: Some("Wired".into()),
                description: None,
                data: vec![RawQuestion {
                    number: 1,
                    question_type: RawQuestionType::ShortAnswer,
                    question: RawPrompt::Text("Capital of France?".into()),
                    correct_answer: "Paris".into(),
                    options: None,
                    points: None,
                }],
            })
        }

        async fn create_attempt(&self, _attempt: &AttemptPayload) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn service_drives_a_full_attempt() {
        let service = create_session(
            OkBackend,
            AttemptSource::Remote { quiz_id: "q-1".into(), user_id: "u-1".into() },
        );
        service.load().await.unwrap();
        assert!(service.status().await.is_running());

        service.set_answer(1, "paris".into()).await.unwrap();
        assert!(service.unanswered().await.is_empty());

        assert_eq!(service.submit(false).await, SubmitOutcome::Completed);
        let result = service.result().await.unwrap();
        assert_eq!(result.total_score, 1);
        assert_eq!(result.percentage, 100);
        service.close().await;
    }
}
