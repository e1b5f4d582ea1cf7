use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as Return};

use crate::error::AppResult;
use crate::quiz::{AnswerValue, Quiz, QuizResult};

use super::{SessionStatus, SubmitOutcome, TickOutcome};

pub enum SessionJob {
    Load(Return<AppResult<()>>),
    Status(Return<SessionStatus>),
    Quiz(Return<Option<Quiz>>),
    SetAnswer(u32, AnswerValue, Return<Result<String, String>>),
    Answer(u32, Return<AnswerValue>),
    Unanswered(Return<Vec<u32>>),
    Tick(Return<TickOutcome>),
    Submit(bool, Return<SubmitOutcome>),
    ConfirmSubmit(bool, Return<SubmitOutcome>),
    Result(Return<Option<QuizResult>>),
    Close,
}

#[derive(Debug, Clone)]
pub struct AttemptService {
    job_channel: Sender<SessionJob>,
}

impl AttemptService {
    pub(super) fn new(job_channel: Sender<SessionJob>) -> Self {
        AttemptService { job_channel }
    }

    pub async fn load(&self) -> AppResult<()> {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Load(send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn status(&self) -> SessionStatus {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Status(send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn quiz(&self) -> Option<Quiz> {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Quiz(send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn set_answer(&self, number: u32, value: AnswerValue) -> Result<String, String> {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::SetAnswer(number, value, send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn answer(&self, number: u32) -> AnswerValue {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Answer(number, send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn unanswered(&self) -> Vec<u32> {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Unanswered(send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    /// One countdown step. Returns `Stop` once the session stops
    /// accepting ticks, even if a late tick fires after submission.
    pub async fn tick(&self) -> TickOutcome {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Tick(send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn submit(&self, auto: bool) -> SubmitOutcome {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Submit(auto, send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn confirm_submit(&self, proceed: bool) -> SubmitOutcome {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::ConfirmSubmit(proceed, send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn result(&self) -> Option<QuizResult> {
        let (send, recv) = oneshot::channel();
        self.job_channel.send(SessionJob::Result(send)).await.expect("Send failed");
        recv.await.expect("Receive failed")
    }

    pub async fn close(&self) {
        self.job_channel.send(SessionJob::Close).await.expect("Send failed");
    }
}
