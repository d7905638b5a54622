use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use clap::Args;
use promptonium_core::attempt::{AttemptOutcome, AttemptRunner, RunnerOptions};
use promptonium_core::{Catalog, CompletionEvent, Config, EvaluatorKind, ModelKind, SessionManager};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::warn;

#[derive(Args)]
pub struct AttemptArgs {
    /// Challenge ID (e.g. "professional_email")
    pub challenge_id: String,
    /// Prompt text typed at the start of the attempt
    #[arg(long)]
    pub prompt: Option<String>,
    /// Submit manually after this many countdown seconds
    #[arg(long)]
    pub submit_after: Option<u32>,
    /// Leave the attempt after this many countdown seconds
    #[arg(long)]
    pub leave_after: Option<u32>,
    /// Model the result is attributed to (openai, claude, gemini)
    #[arg(long)]
    pub model: Option<ModelKind>,
    /// Scoring strategy (simulated, heuristic)
    #[arg(long)]
    pub evaluator: Option<EvaluatorKind>,
    /// RNG seed for the simulated evaluator
    #[arg(long)]
    pub seed: Option<u64>,
    /// Length of one countdown second in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// Evaluation delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

fn print_line<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!(error = %e, "failed to serialize output"),
    }
}

pub fn run(args: AttemptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = Catalog::builtin();
    let challenge = catalog.get(&args.challenge_id)?.clone();

    let mut options = RunnerOptions::from(&config.timer);
    if let Some(ms) = args.tick_ms {
        options.tick = Duration::from_millis(ms.max(1));
    }
    if let Some(ms) = args.delay_ms {
        options.submission_delay = Duration::from_millis(ms);
    }
    let model = args.model.unwrap_or(config.scoring.model);
    let evaluator = args
        .evaluator
        .unwrap_or(config.scoring.evaluator)
        .build(model, args.seed.or(config.scoring.seed));

    let (done_tx, done_rx) = std_mpsc::channel::<CompletionEvent>();
    let runner = AttemptRunner::new(challenge, evaluator)
        .with_options(options)
        .on_complete(move |done| {
            let _ = done_tx.send(done);
        });

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(drive(runner, &args, options))?;

    match &outcome {
        AttemptOutcome::Completed(done) => {
            print_line(&json!({ "outcome": "completed", "completion": done }));
        }
        AttemptOutcome::Abandoned {
            remaining_secs,
            submission_cancelled,
        } => {
            print_line(&json!({
                "outcome": "abandoned",
                "remaining_secs": remaining_secs,
                "submission_cancelled": submission_cancelled,
            }));
        }
    }

    // The callback fires at most once, and only for completed attempts.
    if let Ok(done) = done_rx.try_recv() {
        let mut sessions = SessionManager::new();
        sessions.login("demo_user", "")?;
        let recorded = sessions.record_completion(&done, &catalog)?;
        print_line(&recorded);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Submit,
    Leave,
}

async fn drive(
    runner: AttemptRunner,
    args: &AttemptArgs,
    options: RunnerOptions,
) -> Result<AttemptOutcome, Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let start = Instant::now();
    let mut handle = runner.with_events(tx).spawn();

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print_line(&event);
        }
    });

    if let Some(prompt) = &args.prompt {
        handle.set_prompt(prompt.clone());
    }

    // Half a tick past the boundary so the action lands between two ticks.
    let at = |secs: u32| start + options.tick * secs + options.tick / 2;
    let mut actions: Vec<(Instant, Action)> = Vec::new();
    if let Some(secs) = args.submit_after {
        actions.push((at(secs), Action::Submit));
    }
    if let Some(secs) = args.leave_after {
        actions.push((at(secs), Action::Leave));
    }
    actions.sort_by_key(|(deadline, _)| *deadline);

    let mut finished = None;
    for (deadline, action) in actions {
        tokio::select! {
            outcome = handle.wait() => {
                finished = Some(outcome?);
            }
            () = time::sleep_until(deadline) => {}
        }
        if finished.is_some() {
            break;
        }
        match action {
            Action::Submit => {
                handle.submit();
            }
            Action::Leave => handle.leave(),
        }
    }

    let outcome = match finished {
        Some(outcome) => outcome,
        None => handle.join().await?,
    };
    printer.await?;
    Ok(outcome)
}
