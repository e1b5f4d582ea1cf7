use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{AppResult, Error};

use super::payload::{
    AttemptPayload, QuestionListResponse, QuizInfoPayload, QuizInfoResponse, StatusEnvelope,
};

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("QUIZ_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("QUIZ_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        ApiConfig { base_url, timeout }
    }
}

/// The seam between the attempt session and the backend, so the session
/// owner can be driven by an in-memory backend in tests.
pub trait QuizBackend {
    fn fetch_quiz(&self, quiz_id: &str) -> impl Future<Output = AppResult<QuizInfoPayload>> + Send;
    fn fetch_questions(
        &self,
        quiz_id: &str,
    ) -> impl Future<Output = AppResult<QuestionListResponse>> + Send;
    fn create_attempt(&self, attempt: &AttemptPayload)
    -> impl Future<Output = AppResult<()>> + Send;
}

#[derive(Clone, Debug)]
pub struct QuizApi {
    client: reqwest::Client,
    base_url: String,
}

impl QuizApi {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(QuizApi { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }
}

impl QuizBackend for QuizApi {
    async fn fetch_quiz(&self, quiz_id: &str) -> AppResult<QuizInfoPayload> {
        let url = format!("{}/quiz/{}", self.base_url, quiz_id);
        debug!(%url, "fetching quiz metadata");
        let response: QuizInfoResponse =
            self.client.get(&url).send().await?.error_for_status()?.json().await?;
        if !response.success {
            return Err(Error::Backend(
                response.message.unwrap_or_else(|| "quiz lookup failed".into()),
            ));
        }
        Ok(response.data.unwrap_or_default())
    }

    async fn fetch_questions(&self, quiz_id: &str) -> AppResult<QuestionListResponse> {
        let url = format!("{}/quiz/question/{}", self.base_url, quiz_id);
        debug!(%url, "fetching question list");
        let response: QuestionListResponse =
            self.client.get(&url).send().await?.error_for_status()?.json().await?;
        if !response.success {
            return Err(Error::Backend(
                response.message.unwrap_or_else(|| "question lookup failed".into()),
            ));
        }
        Ok(response)
    }

    async fn create_attempt(&self, attempt: &AttemptPayload) -> AppResult<()> {
        let url = format!("{}/quiz/attempt/create", self.base_url);
        debug!(%url, score = attempt.score, "posting attempt");
        let response: StatusEnvelope =
            self.client.post(&url).json(attempt).send().await?.error_for_status()?.json().await?;
        if response.success {
            Ok(())
        } else {
            Err(Error::Backend(
                response.message.unwrap_or_else(|| "the attempt was not accepted".into()),
            ))
        }
    }
}
