use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::ModelKind;

/// Fixed weights of the four sub-scores in the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub semantic_accuracy: f64,
    pub task_compliance: f64,
    pub style_match: f64,
    pub efficiency: f64,
}

pub const WEIGHTS: ScoreWeights = ScoreWeights {
    semantic_accuracy: 0.4,
    task_compliance: 0.3,
    style_match: 0.2,
    efficiency: 0.1,
};

/// The four sub-scores. Each is clamped to `0.0..=100.0` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub semantic_accuracy: f64,
    pub task_compliance: f64,
    pub style_match: f64,
    pub efficiency: f64,
}

impl SubScores {
    pub fn new(semantic_accuracy: f64, task_compliance: f64, style_match: f64, efficiency: f64) -> Self {
        Self {
            semantic_accuracy: clamp_score(semantic_accuracy),
            task_compliance: clamp_score(task_compliance),
            style_match: clamp_score(style_match),
            efficiency: clamp_score(efficiency),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Weighted total using [`WEIGHTS`].
    pub fn total(&self) -> f64 {
        self.semantic_accuracy * WEIGHTS.semantic_accuracy
            + self.task_compliance * WEIGHTS.task_compliance
            + self.style_match * WEIGHTS.style_match
            + self.efficiency * WEIGHTS.efficiency
    }
}

fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// The prompt was evaluated.
    Scored,
    /// Time ran out with no prompt text; nothing was evaluated.
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetrics {
    /// Words in the model response.
    pub response_length: u32,
    /// Words in the submitted prompt.
    pub prompt_length: u32,
    pub readability_grade: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,
}

/// Result-screen badges, awarded cumulatively by total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBadge {
    Star,
    Award,
    Check,
}

impl ScoreBadge {
    pub fn for_total(total: f64) -> Vec<ScoreBadge> {
        let mut badges = Vec::new();
        if total >= 90.0 {
            badges.push(ScoreBadge::Star);
        }
        if total >= 80.0 {
            badges.push(ScoreBadge::Award);
        }
        if total >= 70.0 {
            badges.push(ScoreBadge::Check);
        }
        badges
    }
}

/// Scored outcome of one submission.
///
/// Built once by an evaluator and read-only afterwards; the total is always
/// derived from the sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    kind: ResultKind,
    #[serde(flatten)]
    scores: SubScores,
    total_score: f64,
    badges: Vec<ScoreBadge>,
    feedback: Vec<String>,
    detailed_metrics: DetailedMetrics,
    model: ModelKind,
    ai_response: String,
    evaluated_at: DateTime<Utc>,
}

impl SubmissionResult {
    pub fn scored(
        scores: SubScores,
        feedback: Vec<String>,
        detailed_metrics: DetailedMetrics,
        model: ModelKind,
        ai_response: String,
    ) -> Self {
        let total_score = scores.total();
        Self {
            kind: ResultKind::Scored,
            total_score,
            badges: ScoreBadge::for_total(total_score),
            scores,
            feedback,
            detailed_metrics,
            model,
            ai_response,
            evaluated_at: Utc::now(),
        }
    }

    /// Result for an attempt that timed out with an empty prompt.
    pub fn incomplete(model: ModelKind) -> Self {
        let scores = SubScores::zero();
        Self {
            kind: ResultKind::Incomplete,
            total_score: scores.total(),
            badges: Vec::new(),
            scores,
            feedback: vec![
                "Time ran out before a prompt was written. Nothing was sent to the model.".into(),
            ],
            detailed_metrics: DetailedMetrics {
                response_length: 0,
                prompt_length: 0,
                readability_grade: 0.0,
                complexity_score: None,
            },
            model,
            ai_response: String::new(),
            evaluated_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn scores(&self) -> &SubScores {
        &self.scores
    }

    pub fn semantic_accuracy(&self) -> f64 {
        self.scores.semantic_accuracy
    }

    pub fn task_compliance(&self) -> f64 {
        self.scores.task_compliance
    }

    pub fn style_match(&self) -> f64 {
        self.scores.style_match
    }

    pub fn efficiency(&self) -> f64 {
        self.scores.efficiency
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    pub fn detailed_metrics(&self) -> &DetailedMetrics {
        &self.detailed_metrics
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn ai_response(&self) -> &str {
        &self.ai_response
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    pub fn badges(&self) -> &[ScoreBadge] {
        &self.badges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_uses_fixed_weights() {
        let s = SubScores::new(90.0, 80.0, 70.0, 60.0);
        assert!((s.total() - (36.0 + 24.0 + 14.0 + 6.0)).abs() < 1e-9);
    }

    #[test]
    fn sub_scores_are_clamped() {
        let s = SubScores::new(120.0, -5.0, f64::NAN, 50.0);
        assert_eq!(s.semantic_accuracy, 100.0);
        assert_eq!(s.task_compliance, 0.0);
        assert_eq!(s.style_match, 0.0);
        assert_eq!(s.efficiency, 50.0);
    }

    #[test]
    fn badges_are_cumulative() {
        assert_eq!(
            ScoreBadge::for_total(92.0),
            vec![ScoreBadge::Star, ScoreBadge::Award, ScoreBadge::Check]
        );
        assert_eq!(ScoreBadge::for_total(75.0), vec![ScoreBadge::Check]);
        assert!(ScoreBadge::for_total(69.9).is_empty());
    }

    #[test]
    fn incomplete_result_is_zeroed() {
        let r = SubmissionResult::incomplete(ModelKind::OpenAi);
        assert_eq!(r.kind(), ResultKind::Incomplete);
        assert_eq!(r.total_score(), 0.0);
        assert_eq!(r.detailed_metrics().prompt_length, 0);
        assert_eq!(r.feedback().len(), 1);
        assert!(r.badges().is_empty());
    }

    #[test]
    fn serialized_result_flattens_scores() {
        let r = SubmissionResult::scored(
            SubScores::new(90.0, 90.0, 90.0, 90.0),
            vec![],
            DetailedMetrics {
                response_length: 150,
                prompt_length: 3,
                readability_grade: 8.5,
                complexity_score: None,
            },
            ModelKind::Claude,
            "ok".into(),
        );
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["kind"], "scored");
        assert_eq!(json["semantic_accuracy"], 90.0);
        assert_eq!(json["model"], "claude");
        assert_eq!(json["badges"], serde_json::json!(["star", "award", "check"]));
        assert!(json["detailed_metrics"].get("complexity_score").is_none());
    }
}
