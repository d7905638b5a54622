//! Submission scoring.
//!
//! An [`Evaluator`] turns a prompt into a [`SubmissionResult`]. Two are
//! provided:
//!
//! - [`SimulatedEvaluator`]: base score plus seeded jitter, independent of
//!   the prompt's content
//! - [`HeuristicEvaluator`]: deterministic rule checks against the
//!   challenge's constraints and reference answer
//!
//! Both report the total as `0.4 * semantic + 0.3 * compliance +
//! 0.2 * style + 0.1 * efficiency`.

mod heuristic;
mod model;
mod result;
mod simulator;
pub mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use heuristic::HeuristicEvaluator;
pub use model::ModelKind;
pub use result::{
    DetailedMetrics, ResultKind, ScoreBadge, ScoreWeights, SubScores, SubmissionResult, WEIGHTS,
};
pub use simulator::{
    SimulatedEvaluator, COMPLIANCE_RANGE, EFFICIENCY_RANGE, SEMANTIC_RANGE, STYLE_RANGE,
};

use crate::catalog::Challenge;
use crate::error::ValidationError;

/// Scores one prompt against one challenge.
///
/// Implementations may assume the prompt is non-empty after trimming;
/// [`evaluate_submission`] handles the empty case.
pub trait Evaluator: Send {
    fn evaluate(&mut self, prompt: &str, challenge: &Challenge) -> SubmissionResult;

    /// Model the produced results are attributed to.
    fn model(&self) -> ModelKind;
}

/// Score a submission, turning an empty (after trim) prompt into an
/// [`ResultKind::Incomplete`] result instead of calling the evaluator.
pub fn evaluate_submission(
    evaluator: &mut dyn Evaluator,
    prompt: &str,
    challenge: &Challenge,
) -> SubmissionResult {
    if prompt.trim().is_empty() {
        SubmissionResult::incomplete(evaluator.model())
    } else {
        evaluator.evaluate(prompt, challenge)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Simulated,
    Heuristic,
}

impl EvaluatorKind {
    /// Build an evaluator. `seed` only affects the simulated evaluator;
    /// `None` seeds from OS entropy.
    pub fn build(self, model: ModelKind, seed: Option<u64>) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::Simulated => {
                let sim = match seed {
                    Some(seed) => SimulatedEvaluator::seeded(seed),
                    None => SimulatedEvaluator::from_entropy(),
                };
                Box::new(sim.with_model(model))
            }
            EvaluatorKind::Heuristic => Box::new(HeuristicEvaluator::new(model)),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Simulated => f.write_str("simulated"),
            EvaluatorKind::Heuristic => f.write_str("heuristic"),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(EvaluatorKind::Simulated),
            "heuristic" => Ok(EvaluatorKind::Heuristic),
            other => Err(ValidationError::UnknownVariant {
                kind: "evaluator",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn blank_prompt_is_incomplete() {
        let catalog = Catalog::builtin();
        let challenge = catalog.get("creative_story").unwrap();
        let mut eval = EvaluatorKind::Simulated.build(ModelKind::Claude, Some(1));
        let r = evaluate_submission(eval.as_mut(), "   \n", challenge);
        assert_eq!(r.kind(), ResultKind::Incomplete);
        assert_eq!(r.model(), ModelKind::Claude);
        assert_eq!(r.total_score(), 0.0);
    }

    #[test]
    fn non_blank_prompt_is_scored() {
        let catalog = Catalog::builtin();
        let challenge = catalog.get("creative_story").unwrap();
        let mut eval = EvaluatorKind::Heuristic.build(ModelKind::OpenAi, None);
        let r = evaluate_submission(eval.as_mut(), "a detective mystery opening", challenge);
        assert_eq!(r.kind(), ResultKind::Scored);
    }

    #[test]
    fn evaluator_kind_parses() {
        assert_eq!("Heuristic".parse::<EvaluatorKind>(), Ok(EvaluatorKind::Heuristic));
        assert!("ml".parse::<EvaluatorKind>().is_err());
    }
}
