//! Async driver for one attempt.
//!
//! One tokio task per attempt owns the [`AttemptFlow`], a one-second interval
//! and the evaluation delay. Commands arrive over a channel; leaving the
//! attempt (or dropping its handle) cancels the task, which stops both the
//! interval and any in-flight evaluation.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::cancel::CancelToken;
use super::flow::AttemptFlow;
use super::CompletionEvent;
use crate::catalog::Challenge;
use crate::config::TimerConfig;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::scoring::{evaluate_submission, Evaluator, SubmissionResult};

const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerOptions {
    /// Length of one countdown second.
    pub tick: Duration,
    /// Artificial evaluation latency.
    pub submission_delay: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            submission_delay: Duration::from_millis(2000),
        }
    }
}

impl From<&TimerConfig> for RunnerOptions {
    fn from(cfg: &TimerConfig) -> Self {
        Self {
            tick: Duration::from_millis(cfg.tick_interval_ms.max(1)),
            submission_delay: Duration::from_millis(cfg.submission_delay_ms),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AttemptCommand {
    SetPrompt(String),
    Submit,
}

#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    Completed(CompletionEvent),
    Abandoned {
        remaining_secs: u32,
        submission_cancelled: bool,
    },
}

impl AttemptOutcome {
    pub fn completion(&self) -> Option<&CompletionEvent> {
        match self {
            AttemptOutcome::Completed(done) => Some(done),
            AttemptOutcome::Abandoned { .. } => None,
        }
    }
}

type CompletionCallback = Box<dyn FnOnce(CompletionEvent) + Send>;

pub struct AttemptRunner {
    flow: AttemptFlow,
    evaluator: Box<dyn Evaluator>,
    options: RunnerOptions,
    on_complete: Option<CompletionCallback>,
    events: Option<mpsc::UnboundedSender<Event>>,
}

impl AttemptRunner {
    pub fn new(challenge: Challenge, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            flow: AttemptFlow::new(challenge),
            evaluator,
            options: RunnerOptions::default(),
            on_complete: None,
            events: None,
        }
    }

    /// A zero tick is raised to one millisecond.
    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = RunnerOptions {
            tick: options.tick.max(MIN_TICK),
            ..options
        };
        self
    }

    /// Called exactly once if the attempt completes; never if it is left.
    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce(CompletionEvent) + Send + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Stream every event of the attempt to `tx`.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<Event>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Start the countdown on the current tokio runtime.
    pub fn spawn(self) -> AttemptHandle {
        let id = self.flow.id();
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelToken::new();
        let task = tokio::spawn(self.run(rx, cancel.clone()));
        AttemptHandle {
            id,
            commands: tx,
            cancel,
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<AttemptCommand>,
        cancel: CancelToken,
    ) -> AttemptOutcome {
        let tick = self.options.tick;
        let mut ticker = time::interval_at(Instant::now() + tick, tick);
        let delay = time::sleep(Duration::ZERO);
        tokio::pin!(delay);
        let mut pending: Option<SubmissionResult> = None;

        if let Some(event) = self.flow.start() {
            info!(
                attempt_id = %self.flow.id(),
                challenge = %self.flow.challenge().id,
                time_limit_secs = self.flow.remaining_secs(),
                "attempt started"
            );
            self.emit(event);
        }

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    return self.abandon(&mut pending);
                }

                () = &mut delay, if pending.is_some() => {
                    if let Some(result) = pending.take() {
                        if let Some(outcome) = self.finish(result) {
                            return outcome;
                        }
                    }
                }

                _ = ticker.tick(), if self.flow.is_counting() => {
                    if let Some(event) = self.flow.tick() {
                        let started = matches!(event, Event::SubmissionStarted { .. });
                        if let Event::TimerTicked { remaining_secs, .. } = &event {
                            debug!(attempt_id = %self.flow.id(), remaining_secs, "tick");
                        }
                        self.emit(event);
                        if started {
                            info!(attempt_id = %self.flow.id(), "time expired, submitting");
                            pending = Some(self.evaluate_pending());
                            delay.as_mut().reset(Instant::now() + self.options.submission_delay);
                        }
                    }
                }

                cmd = commands.recv() => match cmd {
                    Some(AttemptCommand::SetPrompt(text)) => {
                        self.flow.set_prompt(text);
                    }
                    Some(AttemptCommand::Submit) => {
                        let event = self.flow.submit();
                        let started = matches!(event, Event::SubmissionStarted { .. });
                        if let Event::SubmissionIgnored { reason, .. } = &event {
                            debug!(attempt_id = %self.flow.id(), ?reason, "submission ignored");
                        }
                        self.emit(event);
                        if started {
                            info!(
                                attempt_id = %self.flow.id(),
                                remaining_secs = self.flow.remaining_secs(),
                                "manual submission"
                            );
                            pending = Some(self.evaluate_pending());
                            delay.as_mut().reset(Instant::now() + self.options.submission_delay);
                        }
                    }
                    // Every handle is gone; nobody can observe the attempt.
                    None => return self.abandon(&mut pending),
                },
            }
        }
    }

    /// Score the frozen prompt now; the result is released after the delay.
    fn evaluate_pending(&mut self) -> SubmissionResult {
        let prompt = self
            .flow
            .pending()
            .map(|p| p.prompt.clone())
            .unwrap_or_default();
        evaluate_submission(self.evaluator.as_mut(), &prompt, self.flow.challenge())
    }

    fn finish(&mut self, result: SubmissionResult) -> Option<AttemptOutcome> {
        let event = self.flow.complete(result)?;
        self.emit(event);
        let done = self.flow.completion()?;
        info!(
            attempt_id = %done.attempt_id,
            challenge = %done.challenge_id,
            total_score = done.result.total_score(),
            time_taken_secs = done.time_taken_secs,
            "attempt completed"
        );
        if let Some(callback) = self.on_complete.take() {
            callback(done.clone());
        }
        Some(AttemptOutcome::Completed(done))
    }

    fn abandon(&mut self, pending: &mut Option<SubmissionResult>) -> AttemptOutcome {
        pending.take();
        let remaining_secs = self.flow.remaining_secs();
        let mut submission_cancelled = false;
        if let Some(event) = self.flow.leave() {
            if let Event::AttemptAbandoned {
                submission_cancelled: cancelled,
                ..
            } = &event
            {
                submission_cancelled = *cancelled;
            }
            info!(
                attempt_id = %self.flow.id(),
                remaining_secs,
                submission_cancelled,
                "attempt abandoned"
            );
            self.emit(event);
        }
        AttemptOutcome::Abandoned {
            remaining_secs,
            submission_cancelled,
        }
    }

    fn emit(&self, event: Event) {
        if let Some(tx) = &self.events {
            // A closed receiver means the view is gone.
            let _ = tx.send(event);
        }
    }
}

/// Control surface of a running attempt.
///
/// Dropping the handle before the attempt finishes leaves the attempt.
pub struct AttemptHandle {
    id: Uuid,
    commands: mpsc::UnboundedSender<AttemptCommand>,
    cancel: CancelToken,
    task: Option<JoinHandle<AttemptOutcome>>,
}

impl AttemptHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Replace the prompt text. Returns false once the attempt has ended.
    pub fn set_prompt(&self, text: impl Into<String>) -> bool {
        self.commands
            .send(AttemptCommand::SetPrompt(text.into()))
            .is_ok()
    }

    /// Request a manual submission. Ignored (with an event) when the prompt
    /// is blank or a submission is already pending.
    pub fn submit(&self) -> bool {
        self.commands.send(AttemptCommand::Submit).is_ok()
    }

    /// Leave the attempt: stops the countdown and cancels any pending
    /// evaluation.
    pub fn leave(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Wait for the attempt to complete or be left, keeping the handle.
    ///
    /// Cancel-safe: dropping the future leaves the attempt running. Errors
    /// once the outcome has already been taken.
    pub async fn wait(&mut self) -> Result<AttemptOutcome> {
        let outcome = match self.task.as_mut() {
            Some(task) => task.await?,
            None => return Err(CoreError::AttemptTask("attempt already joined".into())),
        };
        self.task = None;
        Ok(outcome)
    }

    /// Wait for the attempt to complete or be left.
    pub async fn join(mut self) -> Result<AttemptOutcome> {
        self.wait().await
    }
}

impl Drop for AttemptHandle {
    fn drop(&mut self) {
        if !self.is_finished() {
            self.cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::attempt::{IgnoreReason, SubmitTrigger};
    use crate::catalog::Catalog;
    use crate::scoring::{
        ResultKind, SimulatedEvaluator, COMPLIANCE_RANGE, EFFICIENCY_RANGE, SEMANTIC_RANGE,
        STYLE_RANGE,
    };

    fn challenge(limit: u32) -> Challenge {
        let mut c = Catalog::builtin().get("professional_email").unwrap().clone();
        c.time_limit_secs = limit;
        c
    }

    fn runner(limit: u32) -> (AttemptRunner, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = AttemptRunner::new(challenge(limit), Box::new(SimulatedEvaluator::seeded(11)))
            .with_events(tx);
        (runner, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    fn ticks(events: &[Event]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::TimerTicked { remaining_secs, .. } => Some(*remaining_secs),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn manual_submission_end_to_end() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let (runner, mut rx) = runner(300);
        let handle = runner
            .on_complete(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .spawn();

        handle.set_prompt("Draft a follow-up email with action items");
        time::sleep(Duration::from_millis(50_500)).await;
        handle.submit();

        let outcome = handle.join().await.unwrap();
        let done = outcome.completion().expect("completed");
        assert_eq!(done.challenge_id, "professional_email");
        assert_eq!(done.time_taken_secs, 50);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let r = &done.result;
        assert_eq!(r.kind(), ResultKind::Scored);
        assert!(SEMANTIC_RANGE.contains(&r.semantic_accuracy()));
        assert!(COMPLIANCE_RANGE.contains(&r.task_compliance()));
        assert!(STYLE_RANGE.contains(&r.style_match()));
        assert!(EFFICIENCY_RANGE.contains(&r.efficiency()));
        assert_eq!(r.detailed_metrics().prompt_length, 7);
        assert_eq!(done.prompt, "Draft a follow-up email with action items");

        let events = drain(&mut rx);
        assert_eq!(ticks(&events), (250..300).rev().collect::<Vec<_>>());
        let started = events
            .iter()
            .position(|e| matches!(e, Event::SubmissionStarted { trigger: SubmitTrigger::Manual, remaining_secs: 250, .. }))
            .expect("submission started");
        assert!(ticks(&events[started..]).is_empty());
        assert!(matches!(events.last(), Some(Event::SubmissionCompleted { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn result_waits_for_submission_delay() {
        let (runner, mut rx) = runner(300);
        let handle = runner.spawn();
        handle.set_prompt("hello there");
        handle.submit();
        time::sleep(Duration::from_millis(1_900)).await;
        assert!(!drain(&mut rx)
            .iter()
            .any(|e| matches!(e, Event::SubmissionCompleted { .. })));
        time::sleep(Duration::from_millis(200)).await;
        assert!(handle.is_finished());
        assert!(matches!(handle.join().await.unwrap(), AttemptOutcome::Completed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_submits_current_prompt_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let (runner, mut rx) = runner(3);
        let handle = runner
            .on_complete(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .spawn();
        handle.set_prompt("unfinished thought");

        let outcome = handle.join().await.unwrap();
        let done = outcome.completion().expect("completed");
        assert_eq!(done.result.kind(), ResultKind::Scored);
        assert_eq!(done.time_taken_secs, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let events = drain(&mut rx);
        let starts: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::SubmissionStarted { .. }))
            .collect();
        assert_eq!(starts.len(), 1);
        assert!(matches!(
            starts[0],
            Event::SubmissionStarted { trigger: SubmitTrigger::Timeout, prompt_words: 2, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_with_empty_prompt_is_incomplete() {
        let (runner, _rx) = runner(2);
        let outcome = runner.spawn().join().await.unwrap();
        let done = outcome.completion().expect("completed");
        assert_eq!(done.result.kind(), ResultKind::Incomplete);
        assert_eq!(done.result.total_score(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_and_duplicate_submissions_are_ignored() {
        let (runner, mut rx) = runner(300);
        let handle = runner.spawn();
        handle.set_prompt("   ");
        handle.submit();
        handle.set_prompt("real prompt");
        handle.submit();
        handle.submit();
        let outcome = handle.join().await.unwrap();
        assert!(outcome.completion().is_some());

        let reasons: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                Event::SubmissionIgnored { reason, .. } => Some(reason),
                _ => None,
            })
            .collect();
        assert_eq!(
            reasons,
            vec![IgnoreReason::EmptyPrompt, IgnoreReason::SubmissionPending]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_stops_the_countdown() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let (runner, mut rx) = runner(300);
        let handle = runner
            .on_complete(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .spawn();
        handle.set_prompt("will not be sent");
        time::sleep(Duration::from_millis(10_500)).await;
        handle.leave();

        match handle.join().await.unwrap() {
            AttemptOutcome::Abandoned { remaining_secs, submission_cancelled } => {
                assert_eq!(remaining_secs, 290);
                assert!(!submission_cancelled);
            }
            other => panic!("unexpected {other:?}"),
        }

        time::sleep(Duration::from_secs(600)).await;
        let events = drain(&mut rx);
        assert_eq!(ticks(&events).last(), Some(&290));
        assert!(matches!(events.last(), Some(Event::AttemptAbandoned { .. })));
        assert!(!events.iter().any(|e| matches!(e, Event::SubmissionStarted { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_cancels_pending_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let (runner, mut rx) = runner(300);
        let handle = runner
            .on_complete(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .spawn();
        handle.set_prompt("in flight");
        handle.submit();
        time::sleep(Duration::from_millis(1_000)).await;
        handle.leave();

        match handle.join().await.unwrap() {
            AttemptOutcome::Abandoned { submission_cancelled, .. } => assert!(submission_cancelled),
            other => panic!("unexpected {other:?}"),
        }
        time::sleep(Duration::from_secs(5)).await;
        assert!(!drain(&mut rx)
            .iter()
            .any(|e| matches!(e, Event::SubmissionCompleted { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_leaves_the_attempt() {
        let (runner, mut rx) = runner(300);
        let handle = runner.spawn();
        time::sleep(Duration::from_millis(2_500)).await;
        drop(handle);
        time::sleep(Duration::from_secs(10)).await;
        let events = drain(&mut rx);
        assert_eq!(ticks(&events), vec![299, 298]);
        assert!(matches!(events.last(), Some(Event::AttemptAbandoned { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_can_be_raced_and_resumed() {
        let (runner, _rx) = runner(300);
        let mut handle = runner.spawn();
        handle.set_prompt("still typing");

        let raced = tokio::select! {
            _ = handle.wait() => false,
            () = time::sleep(Duration::from_millis(5_500)) => true,
        };
        assert!(raced);
        assert!(!handle.is_finished());

        handle.leave();
        match handle.wait().await.unwrap() {
            AttemptOutcome::Abandoned { remaining_secs, .. } => assert_eq!(remaining_secs, 295),
            other => panic!("unexpected {other:?}"),
        }
        assert!(handle.wait().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_is_clamped() {
        let (runner, _rx) = runner(3);
        let runner = runner.with_options(RunnerOptions {
            tick: Duration::ZERO,
            submission_delay: Duration::ZERO,
        });
        assert_eq!(runner.options.tick, Duration::from_millis(1));

        let outcome = runner.spawn().join().await.unwrap();
        let done = outcome.completion().expect("completed");
        assert_eq!(done.time_taken_secs, 3);
        assert_eq!(done.result.kind(), ResultKind::Incomplete);
    }
}
