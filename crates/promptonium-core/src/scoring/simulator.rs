//! Randomized scoring simulator.
//!
//! Scores do not depend on the prompt or the challenge constraints: each
//! sub-score is a fixed base plus bounded jitter drawn from the injected RNG.

use std::ops::Range;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use super::model::{prompt_head, ModelKind};
use super::result::{DetailedMetrics, SubScores, SubmissionResult};
use super::text::word_count;
use super::Evaluator;
use crate::catalog::Challenge;

pub const SEMANTIC_RANGE: Range<f64> = 85.0..95.0;
pub const COMPLIANCE_RANGE: Range<f64> = 88.0..96.0;
pub const STYLE_RANGE: Range<f64> = 82.0..94.0;
pub const EFFICIENCY_RANGE: Range<f64> = 75.0..90.0;

/// Placeholder response length reported by the simulator.
pub const SIMULATED_RESPONSE_LENGTH: u32 = 150;
/// Placeholder readability grade reported by the simulator.
pub const SIMULATED_READABILITY_GRADE: f64 = 8.5;

const CANNED_FEEDBACK: [&str; 4] = [
    "Great semantic accuracy! Your prompt was very clear and specific.",
    "Good task compliance - you included the required keywords.",
    "Consider being more specific about the desired tone and style.",
    "Try to be more concise while maintaining clarity.",
];

pub struct SimulatedEvaluator<R = Mcg128Xsl64> {
    rng: R,
    model: ModelKind,
}

impl SimulatedEvaluator<Mcg128Xsl64> {
    /// Deterministic simulator for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Mcg128Xsl64::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(Mcg128Xsl64::from_entropy())
    }
}

impl<R: Rng> SimulatedEvaluator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            model: ModelKind::default(),
        }
    }

    pub fn with_model(mut self, model: ModelKind) -> Self {
        self.model = model;
        self
    }

    fn draw(&mut self) -> SubScores {
        SubScores::new(
            self.rng.gen_range(SEMANTIC_RANGE),
            self.rng.gen_range(COMPLIANCE_RANGE),
            self.rng.gen_range(STYLE_RANGE),
            self.rng.gen_range(EFFICIENCY_RANGE),
        )
    }
}

impl<R: Rng + Send> Evaluator for SimulatedEvaluator<R> {
    fn evaluate(&mut self, prompt: &str, _challenge: &Challenge) -> SubmissionResult {
        let scores = self.draw();
        let ai_response = format!(
            "This is a sample AI response generated for the prompt: \"{}...\". The AI has \
             followed your instructions and created content that matches the requirements \
             specified in the challenge.",
            prompt_head(prompt)
        );
        SubmissionResult::scored(
            scores,
            CANNED_FEEDBACK.iter().map(|s| (*s).to_string()).collect(),
            DetailedMetrics {
                response_length: SIMULATED_RESPONSE_LENGTH,
                prompt_length: word_count(prompt),
                readability_grade: SIMULATED_READABILITY_GRADE,
                complexity_score: None,
            },
            self.model,
            ai_response,
        )
    }

    fn model(&self) -> ModelKind {
        self.model
    }
}
