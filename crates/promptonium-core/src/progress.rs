//! Per-user progress report.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Difficulty};
use crate::history::{AchievementRecord, AttemptRecord};
use crate::scoring::ModelKind;
use crate::session::Achievement;

/// Recent attempts shown in the report.
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub challenge_id: String,
    pub challenge_title: String,
    pub total_score: f64,
    pub time_taken_secs: u32,
    pub model: ModelKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub average_score: f64,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    pub average_score: f64,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub username: String,
    /// Sum of all attempt totals.
    pub total_score: f64,
    /// Distinct challenges attempted.
    pub challenges_completed: u32,
    /// Newest first.
    pub recent: Vec<RecentEntry>,
    pub by_difficulty: BTreeMap<Difficulty, Aggregate>,
    pub by_model: BTreeMap<ModelKind, Aggregate>,
    /// Oldest day first.
    pub daily: Vec<DailyScore>,
    /// Oldest first.
    pub achievements: Vec<Achievement>,
}

#[derive(Default)]
struct Acc {
    sum: f64,
    n: u32,
}

impl Acc {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.n += 1;
    }

    fn finish(&self) -> Aggregate {
        Aggregate {
            average_score: if self.n == 0 { 0.0 } else { self.sum / self.n as f64 },
            attempts: self.n,
        }
    }
}

impl ProgressReport {
    /// Aggregate `username`'s records and achievements. Records for
    /// challenges missing from the catalog still count toward totals and
    /// model stats.
    pub fn build(
        username: &str,
        records: &[AttemptRecord],
        awards: &[AchievementRecord],
        catalog: &Catalog,
    ) -> Self {
        let mut mine: Vec<&AttemptRecord> = records.iter().filter(|r| r.username == username).collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total_score = mine.iter().map(|r| r.total_score).sum();
        let challenges_completed = mine
            .iter()
            .map(|r| r.challenge_id.as_str())
            .collect::<HashSet<_>>()
            .len() as u32;

        let recent = mine
            .iter()
            .take(RECENT_LIMIT)
            .map(|r| RecentEntry {
                challenge_id: r.challenge_id.clone(),
                challenge_title: catalog
                    .get(&r.challenge_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|_| r.challenge_id.clone()),
                total_score: r.total_score,
                time_taken_secs: r.time_taken_secs,
                model: r.model,
                created_at: r.created_at,
            })
            .collect();

        let mut difficulty: BTreeMap<Difficulty, Acc> = BTreeMap::new();
        let mut model: BTreeMap<ModelKind, Acc> = BTreeMap::new();
        let mut days: BTreeMap<NaiveDate, Acc> = BTreeMap::new();
        for r in &mine {
            if let Ok(challenge) = catalog.get(&r.challenge_id) {
                difficulty.entry(challenge.difficulty).or_default().push(r.total_score);
            }
            model.entry(r.model).or_default().push(r.total_score);
            days.entry(r.created_at.date_naive()).or_default().push(r.total_score);
        }

        let mut achievements: Vec<Achievement> = awards
            .iter()
            .filter(|a| a.username == username)
            .map(|a| Achievement {
                name: a.name.clone(),
                earned_at: a.earned_at,
            })
            .collect();
        achievements.sort_by_key(|a| a.earned_at);

        Self {
            username: username.to_string(),
            total_score,
            challenges_completed,
            recent,
            by_difficulty: difficulty.iter().map(|(k, v)| (*k, v.finish())).collect(),
            by_model: model.iter().map(|(k, v)| (*k, v.finish())).collect(),
            daily: days
                .iter()
                .map(|(date, acc)| {
                    let agg = acc.finish();
                    DailyScore {
                        date: *date,
                        average_score: agg.average_score,
                        attempts: agg.attempts,
                    }
                })
                .collect(),
            achievements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}
