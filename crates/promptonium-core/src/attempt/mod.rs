//! A single timed attempt at a challenge.
//!
//! [`AttemptFlow`] is the clock-free state machine; [`AttemptRunner`] drives
//! it on a tokio task with a one-second interval and the evaluation delay.

mod cancel;
mod flow;
mod runner;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use cancel::CancelToken;
pub use flow::{AttemptFlow, AttemptState, IgnoreReason, PendingSubmission, SubmitTrigger};
pub use runner::{AttemptCommand, AttemptHandle, AttemptOutcome, AttemptRunner, RunnerOptions};

use crate::scoring::SubmissionResult;

/// Handed to the completion callback and the session once per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub attempt_id: Uuid,
    pub challenge_id: String,
    /// Prompt text as submitted.
    pub prompt: String,
    pub result: SubmissionResult,
    pub time_taken_secs: u32,
}
