//! Leaderboards over attempt history.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::history::AttemptRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    AllTime,
    ThisWeek,
    ThisMonth,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::AllTime => "all_time",
            Timeframe::ThisWeek => "this_week",
            Timeframe::ThisMonth => "this_month",
        }
    }

    /// Earliest timestamp included, or `None` for all time.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Timeframe::AllTime => None,
            Timeframe::ThisWeek => Some(now - Duration::days(7)),
            Timeframe::ThisMonth => Some(now - Duration::days(30)),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_time" | "all" => Ok(Timeframe::AllTime),
            "this_week" | "week" => Ok(Timeframe::ThisWeek),
            "this_month" | "month" => Ok(Timeframe::ThisMonth),
            other => Err(ValidationError::UnknownVariant {
                kind: "timeframe",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    /// Best total score.
    pub score: f64,
    /// Fastest completion, independent of which attempt scored best.
    pub time_taken_secs: u32,
    /// Most recent attempt counted.
    pub timestamp: DateTime<Utc>,
}

/// Rank users by best score (desc), then best time (asc).
///
/// `challenge_id` of `None` ranks across all challenges.
pub fn rank(
    records: &[AttemptRecord],
    challenge_id: Option<&str>,
    timeframe: Timeframe,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    let cutoff = timeframe.cutoff(now);
    let mut best: HashMap<&str, (f64, u32, DateTime<Utc>)> = HashMap::new();

    for r in records {
        if challenge_id.is_some_and(|id| id != r.challenge_id) {
            continue;
        }
        if cutoff.is_some_and(|c| r.created_at < c) {
            continue;
        }
        best.entry(r.username.as_str())
            .and_modify(|(score, time, at)| {
                *score = score.max(r.total_score);
                *time = (*time).min(r.time_taken_secs);
                *at = (*at).max(r.created_at);
            })
            .or_insert((r.total_score, r.time_taken_secs, r.created_at));
    }

    let mut rows: Vec<_> = best.into_iter().collect();
    rows.sort_by(|(ua, (sa, ta, _)), (ub, (sb, tb, _))| {
        sb.partial_cmp(sa)
            .unwrap_or(Ordering::Equal)
            .then(ta.cmp(tb))
            .then(ua.cmp(ub))
    });

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (username, (score, time_taken_secs, timestamp)))| LeaderboardEntry {
            rank: i as u32 + 1,
            username: username.to_string(),
            score,
            time_taken_secs,
            timestamp,
        })
        .collect()
}

/// The fixed five-entry board shown when no history is available.
pub fn demo() -> Vec<LeaderboardEntry> {
    let now = Utc::now();
    [
        ("PromptMaster", 98.0, 145),
        ("AIWhisperer", 96.0, 210),
        ("demo_user", 94.0, 180),
        ("TechWriter", 92.0, 165),
        ("CreativeAI", 90.0, 220),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (username, score, time_taken_secs))| LeaderboardEntry {
        rank: i as u32 + 1,
        username: username.to_string(),
        score,
        time_taken_secs,
        timestamp: now,
    })
    .collect()
}
