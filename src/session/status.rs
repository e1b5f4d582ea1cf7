/// The attempt session as a tagged union instead of loose booleans.
/// `Failed` is retryable: the answers are kept and `submit` may be
/// issued again.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionStatus {
    Loading,
    Running { remaining_seconds: u64 },
    AwaitingConfirmation { unanswered: Vec<u32> },
    Submitting,
    Completed,
    Failed { message: String },
}

impl SessionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, SessionStatus::Running { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Unanswered questions remain; the caller must confirm.
    NeedsConfirmation(Vec<u32>),
    /// The attempt was graded and accepted by the backend.
    Completed,
    /// Preview runs complete without grading or posting.
    PreviewDone,
    /// Confirmation was declined; the session keeps running.
    Cancelled,
    /// The backend rejected the attempt or was unreachable. Retryable.
    Failed(String),
    /// Submission is not valid in the current session state.
    NotRunning,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Running { remaining_seconds: u64 },
    /// The countdown hit zero and forced a submission.
    Expired(SubmitOutcome),
    /// The session no longer accepts ticks; the timer task should exit.
    Stop,
}
