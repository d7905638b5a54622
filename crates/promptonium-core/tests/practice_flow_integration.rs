//! Integration tests for the full practice flow: catalog, timed attempt,
//! scoring, session logging and analytics.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use promptonium_core::history::{seeded_achievements, seeded_sample, AttemptRecord};
use promptonium_core::leaderboard::{self, Timeframe};
use promptonium_core::progress::ProgressReport;
use promptonium_core::scoring::HeuristicEvaluator;
use promptonium_core::{
    AttemptOutcome, AttemptRunner, Catalog, CompletionEvent, ModelKind, ResultKind, RunnerOptions,
    SessionManager,
};

#[tokio::test(start_paused = true)]
async fn test_attempt_completion_is_logged_to_session() {
    let catalog = Catalog::builtin();
    let challenge = catalog.get("technical_explanation").unwrap().clone();
    let seen: Arc<Mutex<Vec<CompletionEvent>>> = Arc::default();
    let sink = seen.clone();

    let handle = AttemptRunner::new(challenge, Box::new(HeuristicEvaluator::new(ModelKind::Gemini)))
        .with_options(RunnerOptions {
            tick: Duration::from_secs(1),
            submission_delay: Duration::from_millis(500),
        })
        .on_complete(move |done| sink.lock().unwrap().push(done))
        .spawn();

    handle.set_prompt("Explain blockchain to a 10-year-old with a notebook analogy");
    tokio::time::sleep(Duration::from_millis(30_500)).await;
    handle.submit();

    let outcome = handle.join().await.unwrap();
    let done = match outcome {
        AttemptOutcome::Completed(done) => done,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(done.time_taken_secs, 30);
    assert_eq!(done.result.kind(), ResultKind::Scored);
    assert_eq!(done.result.model(), ModelKind::Gemini);
    assert_eq!(seen.lock().unwrap().as_slice(), std::slice::from_ref(&done));

    let mut sessions = SessionManager::new();
    sessions.login("demo_user", "pw").unwrap();
    sessions.record_completion(&done, &catalog).unwrap();
    let user = &sessions.current().unwrap().user;
    assert_eq!(user.recent_attempts[0].challenge_title, "Explain Blockchain Simply");
    assert_eq!(user.challenges_completed, 13);

    let records = vec![AttemptRecord::from_completion(&done, "demo_user")];
    let board = leaderboard::rank(&records, Some("technical_explanation"), Timeframe::ThisWeek, 10, Utc::now());
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "demo_user");
    assert_eq!(board[0].score, done.result.total_score());
}

#[test]
fn test_sample_history_feeds_leaderboard_and_progress() {
    let catalog = Catalog::builtin();
    let now = Utc::now();
    let records = seeded_sample(42, 75, &catalog, now);

    let board = leaderboard::rank(&records, None, Timeframe::AllTime, 10, now);
    assert!(!board.is_empty());
    assert!(board.windows(2).all(|w| w[0].score >= w[1].score));

    let week = leaderboard::rank(&records, None, Timeframe::ThisWeek, 100, now);
    let all = leaderboard::rank(&records, None, Timeframe::AllTime, 100, now);
    assert!(week.len() <= all.len());

    let demo_attempts = records.iter().filter(|r| r.username == "demo_user").count();
    let awards = seeded_achievements(42, now);
    let report = ProgressReport::build("demo_user", &records, &awards, &catalog);
    assert!(!report.achievements.is_empty());
    assert_eq!(report.recent.len(), demo_attempts.min(10));
    let by_model: u32 = report.by_model.values().map(|a| a.attempts).sum();
    assert_eq!(by_model as usize, demo_attempts);
}
