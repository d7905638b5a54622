//! Attempt history.
//!
//! There is no database; the leaderboard and progress views run over a
//! generated history. Generation is seeded so the same config always yields
//! the same boards.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::attempt::CompletionEvent;
use crate::catalog::Catalog;
use crate::scoring::{ModelKind, SubScores};

/// Usernames the sample history is spread across.
pub const SAMPLE_USERS: [&str; 8] = [
    "demo_user",
    "alice_ai",
    "bob_prompter",
    "carol_creative",
    "david_dev",
    "emma_expert",
    "frank_beginner",
    "grace_guru",
];

const SAMPLE_FEEDBACK: [&str; 8] = [
    "Great semantic accuracy! Your prompt was very clear and specific.",
    "Good task compliance - you included the required keywords effectively.",
    "Excellent style matching! The tone was perfect for the target audience.",
    "Consider being more specific about the desired format and structure.",
    "Try to be more concise while maintaining all the necessary details.",
    "Perfect efficiency! You achieved great results with a well-crafted prompt.",
    "The AI response closely matched the target style and content.",
    "Good use of examples and context to guide the AI's response.",
];

/// Achievements handed out in the sample history, as `(kind, name)`.
pub const SAMPLE_ACHIEVEMENTS: [(&str, &str); 5] = [
    ("first_attempt", "First Steps"),
    ("perfect_score", "Perfectionist"),
    ("speed_demon", "Speed Demon"),
    ("consistency", "Consistency Master"),
    ("multi_model", "Model Explorer"),
];

/// Only this many leading users receive sample achievements.
const ACHIEVEMENT_USERS: usize = 4;

/// One finished attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub username: String,
    pub challenge_id: String,
    pub model: ModelKind,
    pub prompt: String,
    #[serde(flatten)]
    pub scores: SubScores,
    pub total_score: f64,
    pub time_taken_secs: u32,
    pub feedback: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// History entry for an attempt that just completed.
    pub fn from_completion(done: &CompletionEvent, username: &str) -> Self {
        let result = &done.result;
        Self {
            username: username.to_string(),
            challenge_id: done.challenge_id.clone(),
            model: result.model(),
            prompt: done.prompt.clone(),
            scores: *result.scores(),
            total_score: result.total_score(),
            time_taken_secs: done.time_taken_secs,
            feedback: result.feedback().to_vec(),
            created_at: result.evaluated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub username: String,
    pub kind: String,
    pub name: String,
    pub earned_at: DateTime<Utc>,
}

fn sample_prompt<R: Rng + ?Sized>(rng: &mut R, challenge_id: &str) -> String {
    let choices: &[&str] = match challenge_id {
        "professional_email" => &[
            "Write a professional follow-up email after yesterday's meeting about the marketing campaign, including action items and next steps.",
            "Create a formal business email following up on our discussion about the project timeline and deliverables.",
            "Compose a professional follow-up message mentioning the action items we discussed in our meeting.",
        ],
        "creative_story" => &[
            "Write a compelling mystery story opening with a detective investigating something suspicious at a lighthouse.",
            "Create a suspenseful mystery opening featuring a detective and an abandoned location with mysterious circumstances.",
            "Generate a gripping mystery story beginning with a detective discovering something strange and unexplained.",
        ],
        "technical_explanation" => &[
            "Explain blockchain technology to a 10-year-old using simple words and easy-to-understand analogies like notebooks or trading cards.",
            "Create a simple explanation of blockchain for children using everyday examples they can relate to.",
            "Write an easy explanation of blockchain technology using simple language and familiar comparisons.",
        ],
        _ => &[],
    };
    match choices.choose(rng) {
        Some(prompt) => (*prompt).to_string(),
        None => format!(
            "Create a response for the {challenge_id} challenge following all the specified requirements and constraints."
        ),
    }
}

/// Generate `count` attempts spread over `users`, the catalog's challenges
/// and every model, timestamped within the 30 days before `now`.
///
/// Each attempt draws a base score in `65..95` and jitters the sub-scores
/// by ±10, ±15, ±10 and ±20 respectively, clamped to `0..=100`.
pub fn generate_sample_attempts<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    users: &[&str],
    count: usize,
    now: DateTime<Utc>,
) -> Vec<AttemptRecord> {
    if users.is_empty() || catalog.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let username = users[rng.gen_range(0..users.len())];
        let challenge = &catalog.all()[rng.gen_range(0..catalog.len())];
        let model = ModelKind::ALL[rng.gen_range(0..ModelKind::ALL.len())];
        let prompt = sample_prompt(rng, &challenge.id);

        let base: f64 = rng.gen_range(65.0..95.0);
        let scores = SubScores::new(
            base + rng.gen_range(-10.0..=10.0),
            base + rng.gen_range(-15.0..=15.0),
            base + rng.gen_range(-10.0..=10.0),
            base + rng.gen_range(-20.0..=20.0),
        );

        let time_taken_secs = rng.gen_range(60..=400);
        let feedback_count = rng.gen_range(2..=4);
        let feedback = SAMPLE_FEEDBACK
            .choose_multiple(rng, feedback_count)
            .map(|s| (*s).to_string())
            .collect();
        let created_at = now
            - Duration::days(rng.gen_range(0..30))
            - Duration::hours(rng.gen_range(0..24));

        out.push(AttemptRecord {
            username: username.to_string(),
            challenge_id: challenge.id.clone(),
            model,
            prompt,
            total_score: scores.total(),
            scores,
            time_taken_secs,
            feedback,
            created_at,
        });
    }
    out
}

/// Award one to three distinct [`SAMPLE_ACHIEVEMENTS`] to each of the first
/// four `users`, earned between 1 and 20 days before `now`.
pub fn generate_sample_achievements<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[&str],
    now: DateTime<Utc>,
) -> Vec<AchievementRecord> {
    let mut out = Vec::new();
    for username in users.iter().take(ACHIEVEMENT_USERS) {
        let count = rng.gen_range(1..=3);
        for (kind, name) in SAMPLE_ACHIEVEMENTS.choose_multiple(rng, count) {
            out.push(AchievementRecord {
                username: (*username).to_string(),
                kind: (*kind).to_string(),
                name: (*name).to_string(),
                earned_at: now - Duration::days(rng.gen_range(1..=20)),
            });
        }
    }
    out
}

/// Deterministic achievements over [`SAMPLE_USERS`] for a given seed.
pub fn seeded_achievements(seed: u64, now: DateTime<Utc>) -> Vec<AchievementRecord> {
    let mut rng = Mcg128Xsl64::seed_from_u64(seed);
    generate_sample_achievements(&mut rng, &SAMPLE_USERS, now)
}

/// Deterministic history over [`SAMPLE_USERS`] for a given seed.
pub fn seeded_sample(seed: u64, count: usize, catalog: &Catalog, now: DateTime<Utc>) -> Vec<AttemptRecord> {
    let mut rng = Mcg128Xsl64::seed_from_u64(seed);
    generate_sample_attempts(&mut rng, catalog, &SAMPLE_USERS, count, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(seed: u64, count: usize) -> Vec<AttemptRecord> {
        seeded_sample(seed, count, &Catalog::builtin(), Utc::now())
    }

    #[test]
    fn generates_requested_count_within_bounds() {
        let now = Utc::now();
        let mut rng = Mcg128Xsl64::seed_from_u64(42);
        let records = generate_sample_attempts(&mut rng, &Catalog::builtin(), &SAMPLE_USERS, 200, now);
        assert_eq!(records.len(), 200);
        for r in &records {
            assert!((60..=400).contains(&r.time_taken_secs));
            assert!((2..=4).contains(&r.feedback.len()));
            assert!(r.created_at <= now);
            assert!(now - r.created_at < Duration::days(31));
            for s in [
                r.scores.semantic_accuracy,
                r.scores.task_compliance,
                r.scores.style_match,
                r.scores.efficiency,
            ] {
                assert!((0.0..=100.0).contains(&s));
            }
            assert!((r.total_score - r.scores.total()).abs() < 1e-9);
            assert!(SAMPLE_USERS.contains(&r.username.as_str()));
        }
    }

    #[test]
    fn same_seed_same_history() {
        let a: Vec<_> = sample(7, 30).into_iter().map(|r| (r.username, r.challenge_id, r.time_taken_secs)).collect();
        let b: Vec<_> = sample(7, 30).into_iter().map(|r| (r.username, r.challenge_id, r.time_taken_secs)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn known_challenges_get_matching_prompts() {
        for r in sample(3, 100) {
            match r.challenge_id.as_str() {
                "creative_story" => assert!(r.prompt.contains("mystery")),
                "technical_explanation" => assert!(r.prompt.contains("blockchain")),
                "professional_email" => assert!(r.prompt.contains("email") || r.prompt.contains("message")),
                other => assert!(r.prompt.contains(other)),
            }
        }
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        assert!(generate_sample_attempts(&mut rng, &Catalog::builtin(), &[], 10, Utc::now()).is_empty());
        assert!(generate_sample_attempts(&mut rng, &Catalog::from_challenges(vec![]), &SAMPLE_USERS, 10, Utc::now()).is_empty());
    }

    #[test]
    fn achievements_go_to_the_first_four_users() {
        let now = Utc::now();
        let awards = seeded_achievements(42, now);
        assert!((4..=12).contains(&awards.len()));
        for a in &awards {
            assert!(SAMPLE_USERS[..4].contains(&a.username.as_str()));
            assert!(SAMPLE_ACHIEVEMENTS.iter().any(|(kind, name)| *kind == a.kind && *name == a.name));
            let age = now - a.earned_at;
            assert!(age >= Duration::days(1) && age <= Duration::days(20));
        }
        for user in &SAMPLE_USERS[..4] {
            let mine: Vec<_> = awards.iter().filter(|a| a.username == *user).map(|a| &a.kind).collect();
            assert!((1..=3).contains(&mine.len()));
            let mut distinct = mine.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(distinct.len(), mine.len());
        }
        assert_eq!(awards, seeded_achievements(42, now));
    }

    #[test]
    fn completion_becomes_a_record() {
        use crate::scoring::{Evaluator, SimulatedEvaluator};

        let catalog = Catalog::builtin();
        let challenge = catalog.get("creative_story").unwrap();
        let result = SimulatedEvaluator::seeded(9).with_model(ModelKind::Claude).evaluate("a dark and stormy night", challenge);
        let done = CompletionEvent {
            attempt_id: uuid::Uuid::new_v4(),
            challenge_id: "creative_story".into(),
            prompt: "a dark and stormy night".into(),
            result: result.clone(),
            time_taken_secs: 95,
        };

        let record = AttemptRecord::from_completion(&done, "alice_ai");
        assert_eq!(record.username, "alice_ai");
        assert_eq!(record.challenge_id, "creative_story");
        assert_eq!(record.model, ModelKind::Claude);
        assert_eq!(record.prompt, "a dark and stormy night");
        assert_eq!(record.total_score, result.total_score());
        assert_eq!(&record.scores, result.scores());
        assert_eq!(record.time_taken_secs, 95);
        assert_eq!(record.feedback, result.feedback());
        assert_eq!(record.created_at, result.evaluated_at());
    }
}
