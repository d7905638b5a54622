//! Attempt state machine.
//!
//! Owns the countdown, the prompt text and the submission gate for one
//! attempt. Like the countdown it has no clock of its own: the driver calls
//! `tick()` once per second and `complete()` when the evaluation delay ends.
//!
//! ## State Transitions
//!
//! ```text
//! Ready -> Active -> Submitting -> Completed
//!            \           \
//!             +-----------+----> Abandoned
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CompletionEvent;
use crate::catalog::Challenge;
use crate::events::Event;
use crate::scoring::{text::word_count, SubmissionResult};
use crate::timer::{Countdown, Tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptState {
    Ready,
    Active,
    Submitting,
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitTrigger {
    Manual,
    Timeout,
}

/// Why a manual submit was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    EmptyPrompt,
    SubmissionPending,
    NotActive,
}

/// Prompt frozen at the moment a submission started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSubmission {
    pub trigger: SubmitTrigger,
    pub prompt: String,
    pub remaining_secs: u32,
}

#[derive(Debug, Clone)]
pub struct AttemptFlow {
    id: Uuid,
    challenge: Challenge,
    countdown: Countdown,
    prompt: String,
    state: AttemptState,
    pending: Option<PendingSubmission>,
    result: Option<SubmissionResult>,
}

impl AttemptFlow {
    pub fn new(challenge: Challenge) -> Self {
        let countdown = Countdown::new(challenge.time_limit_secs);
        Self {
            id: Uuid::new_v4(),
            challenge,
            countdown,
            prompt: String::new(),
            state: AttemptState::Ready,
            pending: None,
            result: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    pub fn display(&self) -> String {
        self.countdown.display()
    }

    /// True while the countdown should receive ticks.
    pub fn is_counting(&self) -> bool {
        self.state == AttemptState::Active && self.countdown.is_running()
    }

    pub fn pending(&self) -> Option<&PendingSubmission> {
        self.pending.as_ref()
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    /// The completion record, once a result has been applied.
    pub fn completion(&self) -> Option<CompletionEvent> {
        let result = self.result.as_ref()?;
        Some(CompletionEvent {
            attempt_id: self.id,
            challenge_id: self.challenge.id.clone(),
            prompt: self.prompt.clone(),
            time_taken_secs: self.countdown.elapsed_secs(),
            result: result.clone(),
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state != AttemptState::Ready {
            return None;
        }
        self.countdown.start();
        self.state = AttemptState::Active;
        Some(Event::AttemptStarted {
            attempt_id: self.id,
            challenge_id: self.challenge.id.clone(),
            time_limit_secs: self.countdown.limit_secs(),
            at: Utc::now(),
        })
    }

    /// Replace the prompt text. Only while the attempt is active.
    pub fn set_prompt(&mut self, text: impl Into<String>) -> bool {
        if matches!(self.state, AttemptState::Ready | AttemptState::Active) {
            self.prompt = text.into();
            true
        } else {
            false
        }
    }

    /// Manual submit. Returns `SubmissionStarted` or `SubmissionIgnored`.
    pub fn submit(&mut self) -> Event {
        let reason = match self.state {
            AttemptState::Submitting => Some(IgnoreReason::SubmissionPending),
            AttemptState::Active if !self.countdown.is_running() => Some(IgnoreReason::NotActive),
            AttemptState::Active if self.prompt.trim().is_empty() => Some(IgnoreReason::EmptyPrompt),
            AttemptState::Active => None,
            _ => Some(IgnoreReason::NotActive),
        };
        match reason {
            Some(reason) => Event::SubmissionIgnored {
                attempt_id: self.id,
                reason,
                at: Utc::now(),
            },
            None => self.begin_submission(SubmitTrigger::Manual),
        }
    }

    /// One elapsed second. Expiry starts a timeout submission with whatever
    /// prompt text is present, empty included.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != AttemptState::Active {
            return None;
        }
        match self.countdown.tick() {
            Tick::Ignored => None,
            Tick::Remaining(remaining_secs) => Some(Event::TimerTicked {
                attempt_id: self.id,
                remaining_secs,
                display: self.countdown.display(),
                at: Utc::now(),
            }),
            Tick::Expired => Some(self.begin_submission(SubmitTrigger::Timeout)),
        }
    }

    /// Apply an evaluation result. A no-op unless a submission is pending.
    pub fn complete(&mut self, result: SubmissionResult) -> Option<Event> {
        if self.state != AttemptState::Submitting {
            return None;
        }
        self.state = AttemptState::Completed;
        self.pending = None;
        let event = Event::SubmissionCompleted {
            attempt_id: self.id,
            challenge_id: self.challenge.id.clone(),
            kind: result.kind(),
            total_score: result.total_score(),
            time_taken_secs: self.countdown.elapsed_secs(),
            at: Utc::now(),
        };
        self.result = Some(result);
        Some(event)
    }

    /// Leave the attempt view: stops the countdown and drops any pending
    /// submission.
    pub fn leave(&mut self) -> Option<Event> {
        match self.state {
            AttemptState::Ready | AttemptState::Active | AttemptState::Submitting => {
                self.countdown.stop();
                self.state = AttemptState::Abandoned;
                let submission_cancelled = self.pending.take().is_some();
                Some(Event::AttemptAbandoned {
                    attempt_id: self.id,
                    remaining_secs: self.countdown.remaining_secs(),
                    submission_cancelled,
                    at: Utc::now(),
                })
            }
            AttemptState::Completed | AttemptState::Abandoned => None,
        }
    }

    fn begin_submission(&mut self, trigger: SubmitTrigger) -> Event {
        self.countdown.stop();
        self.state = AttemptState::Submitting;
        let remaining_secs = self.countdown.remaining_secs();
        let prompt_words = word_count(&self.prompt);
        self.pending = Some(PendingSubmission {
            trigger,
            prompt: self.prompt.clone(),
            remaining_secs,
        });
        Event::SubmissionStarted {
            attempt_id: self.id,
            trigger,
            remaining_secs,
            prompt_words,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::scoring::{Evaluator, ResultKind, SimulatedEvaluator};

    fn flow_with_limit(limit: u32) -> AttemptFlow {
        let mut challenge = Catalog::builtin().get("professional_email").unwrap().clone();
        challenge.time_limit_secs = limit;
        AttemptFlow::new(challenge)
    }

    fn result_for(flow: &AttemptFlow) -> SubmissionResult {
        let prompt = flow.pending().unwrap().prompt.clone();
        SimulatedEvaluator::seeded(5).evaluate(&prompt, flow.challenge())
    }

    #[test]
    fn start_initializes_countdown_to_limit() {
        for challenge in Catalog::builtin().all() {
            let mut flow = AttemptFlow::new(challenge.clone());
            assert!(matches!(flow.start(), Some(Event::AttemptStarted { .. })));
            assert_eq!(flow.remaining_secs(), challenge.time_limit_secs);
            assert!(flow.is_counting());
            assert!(flow.start().is_none());
        }
    }

    #[test]
    fn tick_decrements_by_one() {
        let mut flow = flow_with_limit(300);
        flow.start();
        for expected in (297..300).rev() {
            match flow.tick() {
                Some(Event::TimerTicked { remaining_secs, .. }) => assert_eq!(remaining_secs, expected),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn expiry_submits_once_with_current_prompt() {
        let mut flow = flow_with_limit(2);
        flow.start();
        flow.set_prompt("half finished");
        flow.tick();
        match flow.tick() {
            Some(Event::SubmissionStarted { trigger, remaining_secs, .. }) => {
                assert_eq!(trigger, SubmitTrigger::Timeout);
                assert_eq!(remaining_secs, 0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(flow.pending().unwrap().prompt, "half finished");
        assert!(flow.tick().is_none());
        assert_eq!(flow.state(), AttemptState::Submitting);
    }

    #[test]
    fn expiry_submits_empty_prompt() {
        let mut flow = flow_with_limit(1);
        flow.start();
        assert!(matches!(
            flow.tick(),
            Some(Event::SubmissionStarted { trigger: SubmitTrigger::Timeout, prompt_words: 0, .. })
        ));
        assert_eq!(flow.pending().unwrap().prompt, "");
    }

    #[test]
    fn manual_submit_rejects_blank_prompt() {
        let mut flow = flow_with_limit(60);
        flow.start();
        flow.set_prompt("   \t");
        assert!(matches!(
            flow.submit(),
            Event::SubmissionIgnored { reason: IgnoreReason::EmptyPrompt, .. }
        ));
        assert_eq!(flow.state(), AttemptState::Active);
        assert!(flow.is_counting());
    }

    #[test]
    fn duplicate_submit_is_ignored_while_pending() {
        let mut flow = flow_with_limit(60);
        flow.start();
        flow.set_prompt("Draft a follow-up email");
        assert!(matches!(flow.submit(), Event::SubmissionStarted { trigger: SubmitTrigger::Manual, .. }));
        assert!(matches!(
            flow.submit(),
            Event::SubmissionIgnored { reason: IgnoreReason::SubmissionPending, .. }
        ));
        assert!(!flow.set_prompt("changed"));
        assert_eq!(flow.pending().unwrap().prompt, "Draft a follow-up email");
    }

    #[test]
    fn countdown_freezes_after_manual_submit() {
        let mut flow = flow_with_limit(300);
        flow.start();
        for _ in 0..50 {
            flow.tick();
        }
        flow.set_prompt("Draft a follow-up email with action items");
        flow.submit();
        assert!(flow.tick().is_none());
        let result = result_for(&flow);
        assert!(matches!(flow.complete(result), Some(Event::SubmissionCompleted { time_taken_secs: 50, .. })));
        assert!(flow.tick().is_none());
        assert_eq!(flow.remaining_secs(), 250);
        assert_eq!(flow.completion().unwrap().result.kind(), ResultKind::Scored);
    }

    #[test]
    fn leave_stops_everything() {
        let mut flow = flow_with_limit(30);
        flow.start();
        flow.tick();
        assert!(matches!(
            flow.leave(),
            Some(Event::AttemptAbandoned { remaining_secs: 29, submission_cancelled: false, .. })
        ));
        assert!(flow.tick().is_none());
        assert_eq!(flow.remaining_secs(), 29);
        assert!(flow.leave().is_none());
        assert!(matches!(
            flow.submit(),
            Event::SubmissionIgnored { reason: IgnoreReason::NotActive, .. }
        ));
    }

    #[test]
    fn result_after_leave_is_not_applied() {
        let mut flow = flow_with_limit(30);
        flow.start();
        flow.set_prompt("something");
        flow.submit();
        let result = result_for(&flow);
        assert!(matches!(
            flow.leave(),
            Some(Event::AttemptAbandoned { submission_cancelled: true, .. })
        ));
        assert!(flow.complete(result).is_none());
        assert!(flow.result().is_none());
        assert!(flow.completion().is_none());
    }
}
