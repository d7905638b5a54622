use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attempt::{IgnoreReason, SubmitTrigger};
use crate::scoring::ResultKind;

/// Every state change in the system produces an Event.
/// The presentation layer renders them; the session logs completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    AttemptStarted {
        attempt_id: Uuid,
        challenge_id: String,
        time_limit_secs: u32,
        at: DateTime<Utc>,
    },
    TimerTicked {
        attempt_id: Uuid,
        remaining_secs: u32,
        /// `m:ss`
        display: String,
        at: DateTime<Utc>,
    },
    SubmissionStarted {
        attempt_id: Uuid,
        trigger: SubmitTrigger,
        remaining_secs: u32,
        prompt_words: u32,
        at: DateTime<Utc>,
    },
    /// A submit request was a no-op.
    SubmissionIgnored {
        attempt_id: Uuid,
        reason: IgnoreReason,
        at: DateTime<Utc>,
    },
    SubmissionCompleted {
        attempt_id: Uuid,
        challenge_id: String,
        kind: ResultKind,
        total_score: f64,
        time_taken_secs: u32,
        at: DateTime<Utc>,
    },
    /// The attempt view was left before a result was shown.
    AttemptAbandoned {
        attempt_id: Uuid,
        remaining_secs: u32,
        /// An evaluation was in flight and has been dropped.
        submission_cancelled: bool,
        at: DateTime<Utc>,
    },
    SessionEnded {
        at: DateTime<Utc>,
    },
    AttemptRecorded {
        username: String,
        challenge_id: String,
        total_score: f64,
        at: DateTime<Utc>,
    },
}
