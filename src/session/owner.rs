use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info, warn};

use crate::api::QuizBackend;
use crate::api::payload::AttemptPayload;
use crate::error::{AppResult, Error};
use crate::quiz::loader::{QuizMeta, build_quiz};
use crate::quiz::{AnswerSheet, AnswerValue, Quiz, QuizResult, grade};

use super::service::SessionJob;
use super::{AttemptSource, SessionStatus, SubmitOutcome, TickOutcome};

pub(super) fn create_session<B>(
    backend: B,
    source: AttemptSource,
    job_receiver: Receiver<SessionJob>,
) where
    B: QuizBackend + Send + 'static,
{
    tokio::task::spawn(async move {
        let preview = matches!(source, AttemptSource::Preview { .. });
        let owner = AttemptOwner { backend, source, session: AttemptSession::new(preview) };
        owner.handle_jobs(job_receiver).await
    });
}

#[derive(Debug)]
struct AttemptSession {
    quiz: Option<Quiz>,
    answers: AnswerSheet,
    started_at: Instant,
    remaining_seconds: u64,
    /// Monotonic: flips false to true on the first submission and never
    /// reverts, which makes a late timer tick a no-op.
    submitted: bool,
    preview: bool,
    status: SessionStatus,
    result: Option<QuizResult>,
}

impl AttemptSession {
    fn new(preview: bool) -> Self {
        AttemptSession {
            quiz: None,
            answers: AnswerSheet::new(),
            started_at: Instant::now(),
            remaining_seconds: 0,
            submitted: false,
            preview,
            status: SessionStatus::Loading,
            result: None,
        }
    }
}

struct AttemptOwner<B> {
    backend: B,
    source: AttemptSource,
    session: AttemptSession,
}

impl<B: QuizBackend> AttemptOwner<B> {
    async fn handle_jobs(mut self, mut job_receiver: Receiver<SessionJob>) {
        while let Some(job) = job_receiver.recv().await {
            match job {
                SessionJob::Load(sender)                     => sender.send(self.load().await).unwrap(),
                SessionJob::Status(sender)                   => sender.send(self.status()).unwrap(),
                SessionJob::Quiz(sender)                     => sender.send(self.session.quiz.clone()).unwrap(),
                SessionJob::SetAnswer(number, value, sender) => sender.send(self.set_answer(number, value)).unwrap(),
                SessionJob::Answer(number, sender)           => sender.send(self.session.answers.answer(number)).unwrap(),
                SessionJob::Unanswered(sender)               => sender.send(self.unanswered()).unwrap(),
                SessionJob::Tick(sender)                     => sender.send(self.tick().await).unwrap(),
                SessionJob::Submit(auto, sender)             => sender.send(self.submit(auto).await).unwrap(),
                SessionJob::ConfirmSubmit(proceed, sender)   => sender.send(self.confirm_submit(proceed).await).unwrap(),
                SessionJob::Result(sender)                   => sender.send(self.session.result.clone()).unwrap(),
                SessionJob::Close                            => break,
            }
        }
        debug!("attempt session closed");
    }

    fn status(&self) -> SessionStatus {
        match &self.session.status {
            SessionStatus::Running { .. } => {
                SessionStatus::Running { remaining_seconds: self.session.remaining_seconds }
            }
            other => other.clone(),
        }
    }

    fn unanswered(&self) -> Vec<u32> {
        match &self.session.quiz {
            Some(quiz) => self.session.answers.unanswered(quiz.questions()),
            None => Vec::new(),
        }
    }

    async fn load(&mut self) -> AppResult<()> {
        if !self.session.status.is_loading() {
            return Err(Error::Message("the quiz is already loaded".into()));
        }
        let quiz = match &self.source {
            AttemptSource::Preview { quiz } => quiz.clone(),
            AttemptSource::Remote { quiz_id, .. } => {
                let meta = match self.backend.fetch_quiz(quiz_id).await {
                    Ok(info) => {
                        QuizMeta { time_limit_minutes: info.time_limit, deadline: info.deadline }
                    }
                    Err(e) => {
                        warn!(error = %e, "quiz metadata fetch failed, using defaults");
                        QuizMeta::default()
                    }
                };
                let list = self.backend.fetch_questions(quiz_id).await?;
                build_quiz(
                    list.title.unwrap_or_default(),
                    list.description.unwrap_or_default(),
                    meta,
                    list.data,
                )
            }
        };
        info!(title = quiz.title(), questions = quiz.question_count(), "quiz loaded");
        self.session.remaining_seconds = u64::from(quiz.time_limit_minutes()) * 60;
        self.session.started_at = Instant::now();
        self.session.quiz = Some(quiz);
        self.session.status =
            SessionStatus::Running { remaining_seconds: self.session.remaining_seconds };
        Ok(())
    }

    fn set_answer(&mut self, number: u32, value: AnswerValue) -> Result<String, String> {
        if !self.session.status.is_running() {
            return Err("Answers can only be changed while the attempt is running.".into());
        }
        let Some(quiz) = &self.session.quiz else {
            return Err("No quiz loaded.".into());
        };
        let Some(question) = quiz.question(number) else {
            return Err(format!("There is no question {}.", number));
        };
        let display = question.answer_text(&value);
        self.session.answers.set(number, value);
        Ok(display)
    }

    /// One countdown step. Ticks that arrive once `submitted` is set, or
    /// in any state outside the running/confirmation phase, do nothing.
    async fn tick(&mut self) -> TickOutcome {
        if self.session.submitted || self.session.preview {
            return TickOutcome::Stop;
        }
        match self.session.status {
            SessionStatus::Running { .. } | SessionStatus::AwaitingConfirmation { .. } => {}
            _ => return TickOutcome::Stop,
        }
        if self.session.remaining_seconds > 1 {
            self.session.remaining_seconds -= 1;
            TickOutcome::Running { remaining_seconds: self.session.remaining_seconds }
        } else {
            self.session.remaining_seconds = 0;
            info!("time limit reached, forcing submission");
            TickOutcome::Expired(self.submit(true).await)
        }
    }

    /// The submission gate: auto-submission and fully answered sheets go
    /// straight through, anything else asks for confirmation first.
    async fn submit(&mut self, auto: bool) -> SubmitOutcome {
        match self.session.status {
            SessionStatus::Running { .. }
            | SessionStatus::AwaitingConfirmation { .. }
            | SessionStatus::Failed { .. } => {}
            _ => return SubmitOutcome::NotRunning,
        }
        if self.session.preview {
            self.session.submitted = true;
            self.session.status = SessionStatus::Completed;
            return SubmitOutcome::PreviewDone;
        }
        let retry = matches!(self.session.status, SessionStatus::Failed { .. });
        let unanswered = self.unanswered();
        if !auto && !retry && !unanswered.is_empty() {
            self.session.status =
                SessionStatus::AwaitingConfirmation { unanswered: unanswered.clone() };
            return SubmitOutcome::NeedsConfirmation(unanswered);
        }
        self.do_submit().await
    }

    async fn confirm_submit(&mut self, proceed: bool) -> SubmitOutcome {
        if !matches!(self.session.status, SessionStatus::AwaitingConfirmation { .. }) {
            return SubmitOutcome::NotRunning;
        }
        if proceed {
            self.do_submit().await
        } else {
            self.session.status =
                SessionStatus::Running { remaining_seconds: self.session.remaining_seconds };
            SubmitOutcome::Cancelled
        }
    }

    async fn do_submit(&mut self) -> SubmitOutcome {
        let Some(quiz) = &self.session.quiz else {
            return SubmitOutcome::NotRunning;
        };
        self.session.submitted = true;
        self.session.status = SessionStatus::Submitting;

        let result = grade(quiz, &self.session.answers, self.session.started_at.elapsed());
        let AttemptSource::Remote { quiz_id, user_id } = &self.source else {
            self.session.status = SessionStatus::Completed;
            return SubmitOutcome::PreviewDone;
        };
        let payload = AttemptPayload {
            quiz_id: quiz_id.clone(),
            user_id: user_id.clone(),
            attempt_no: 1,
            score: result.total_score,
            time_taken: result.time_spent_seconds,
            submitted_at: Utc::now(),
            answers: self.session.answers.to_wire(),
        };
        match self.backend.create_attempt(&payload).await {
            Ok(()) => {
                info!(score = result.total_score, max = result.max_score, "attempt recorded");
                self.session.result = Some(result);
                self.session.status = SessionStatus::Completed;
                SubmitOutcome::Completed
            }
            Err(e) => {
                let message = e.to_string();
                error!(error = %message, "attempt submission failed");
                self.session.status = SessionStatus::Failed { message: message.clone() };
                SubmitOutcome::Failed(message)
            }
        }
    }
}
