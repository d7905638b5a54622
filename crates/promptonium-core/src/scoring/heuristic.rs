//! Rule-based evaluator.
//!
//! Scores the canned model response against the challenge's constraints the
//! same way a real grader would score a real response: keyword and length
//! checks for compliance, indicator words for style, bag-of-words similarity
//! to the reference answer for semantics. Fully deterministic.

use std::collections::HashMap;

use super::model::ModelKind;
use super::result::{DetailedMetrics, SubScores, SubmissionResult};
use super::text::{complexity_score, flesch_kincaid_grade, word_count};
use super::Evaluator;
use crate::catalog::{Challenge, Constraints, OutputFormat, TargetStyle};

/// Used when there is no reference answer to compare against.
const SEMANTIC_FALLBACK: f64 = 75.0;

const FORMAL_INDICATORS: [&str; 5] = ["please", "kindly", "respectfully", "sincerely", "therefore"];
const INFORMAL_INDICATORS: [&str; 6] = ["hey", "gonna", "wanna", "cool", "awesome", "yeah"];

const PROFESSIONAL_WORDS: &[&str] = &["professional", "business", "formal", "corporate"];
const FRIENDLY_WORDS: &[&str] = &["friendly", "warm", "welcoming", "pleasant"];
const CONFIDENT_WORDS: &[&str] = &["confident", "strong", "assured", "certain"];
const HELPFUL_WORDS: &[&str] = &["helpful", "supportive", "assistance", "guide"];

fn tone_keywords(tone: &str) -> Option<&'static [&'static str]> {
    match tone {
        "professional" => Some(PROFESSIONAL_WORDS),
        "friendly" => Some(FRIENDLY_WORDS),
        "confident" => Some(CONFIDENT_WORDS),
        "helpful" => Some(HELPFUL_WORDS),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    model: ModelKind,
}

impl HeuristicEvaluator {
    pub fn new(model: ModelKind) -> Self {
        Self { model }
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&mut self, prompt: &str, challenge: &Challenge) -> SubmissionResult {
        let response = self.model.mock_response(prompt);

        let semantic = semantic_accuracy(&response, &challenge.target_response);
        let compliance = task_compliance(&response, &challenge.constraints);
        let style = style_match(&response, &challenge.constraints.target_style);
        let efficiency = efficiency(prompt, semantic);
        let scores = SubScores::new(semantic, compliance, style, efficiency);

        let metrics = DetailedMetrics {
            response_length: word_count(&response),
            prompt_length: word_count(prompt),
            readability_grade: flesch_kincaid_grade(&response),
            complexity_score: Some(complexity_score(prompt)),
        };

        SubmissionResult::scored(scores, feedback(&scores), metrics, self.model, response)
    }

    fn model(&self) -> ModelKind {
        self.model
    }
}

fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut tf = HashMap::new();
    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        *tf.entry(token.to_lowercase()).or_insert(0.0) += 1.0;
    }
    tf
}

/// Cosine similarity of term-frequency vectors, scaled to 0..=100.
pub fn semantic_accuracy(response: &str, target: &str) -> f64 {
    if target.trim().is_empty() {
        return SEMANTIC_FALLBACK;
    }
    let a = term_frequencies(response);
    let b = term_frequencies(target);
    let dot: f64 = a
        .iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum();
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b) * 100.0).clamp(0.0, 100.0)
}

pub fn task_compliance(response: &str, constraints: &Constraints) -> f64 {
    let mut score = 100.0;
    let lower = response.to_lowercase();

    let words = word_count(response);
    if words > constraints.max_words {
        let excess = (words - constraints.max_words) as f64;
        score -= (excess * 2.0).min(30.0);
    }

    for keyword in &constraints.required_keywords {
        if !lower.contains(&keyword.to_lowercase()) {
            score -= 15.0;
        }
    }

    match constraints.format {
        Some(OutputFormat::BulletPoints) if !has_bullets(response) => score -= 25.0,
        Some(OutputFormat::NumberedList) if !has_numbering(response) => score -= 25.0,
        _ => {}
    }

    f64::max(0.0, score)
}

fn has_bullets(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(2)
        .any(|w| matches!(w[0], '•' | '-' | '*') && w[1].is_whitespace())
}

fn has_numbering(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && w[1] == '.' && w[2].is_whitespace())
}

pub fn style_match(response: &str, style: &TargetStyle) -> f64 {
    if style.is_empty() {
        return 100.0;
    }
    let lower = response.to_lowercase();
    let mut score = 100.0;

    if let Some(formality) = style.formality.as_deref() {
        let formal = FORMAL_INDICATORS.iter().filter(|w| lower.contains(*w)).count();
        let informal = INFORMAL_INDICATORS.iter().filter(|w| lower.contains(*w)).count();
        match formality {
            "formal" if informal > formal => score -= 25.0,
            "informal" if formal > informal => score -= 25.0,
            _ => {}
        }
    }

    if let Some(words) = style.tone.as_deref().and_then(tone_keywords) {
        if !words.iter().any(|w| lower.contains(w)) {
            score -= 15.0;
        }
    }

    f64::max(0.0, score)
}

/// Quality achieved per ten words of prompt.
pub fn efficiency(prompt: &str, semantic: f64) -> f64 {
    let words = word_count(prompt) as f64;
    if words == 0.0 {
        return 0.0;
    }
    let quality = semantic / 100.0;
    (quality / f64::max(words / 10.0, 1.0) * 100.0).min(100.0)
}

pub fn feedback(scores: &SubScores) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();

    if scores.semantic_accuracy < 70.0 {
        out.push("Consider adding more specific details to your prompt to better guide the AI toward your target response.");
    } else if scores.semantic_accuracy > 85.0 {
        out.push("Excellent semantic accuracy! Your prompt effectively guided the AI to the desired meaning.");
    }

    if scores.task_compliance < 80.0 {
        out.push("Your prompt may be missing some constraints. Try being more explicit about requirements like word count, format, or required elements.");
    } else if scores.task_compliance > 90.0 {
        out.push("Perfect task compliance! You clearly specified all requirements.");
    }

    if scores.style_match < 70.0 {
        out.push("The AI's tone doesn't match your target style. Try adding phrases like 'in a professional tone' or 'write casually' to your prompt.");
    } else if scores.style_match > 85.0 {
        out.push("Great style matching! The AI captured the desired tone perfectly.");
    }

    if scores.efficiency < 60.0 {
        out.push("Your prompt might be too long or too short. Try to be concise but specific.");
    } else if scores.efficiency > 80.0 {
        out.push("Excellent efficiency! You achieved great results with a well-crafted prompt.");
    }

    let total = scores.total();
    if total > 90.0 {
        out.push("Outstanding performance! You're mastering the art of prompt engineering.");
    } else if total > 80.0 {
        out.push("Great job! You're developing strong prompt engineering skills.");
    }

    if out.is_empty() {
        out.push("Good attempt! Keep practicing to improve your prompt engineering skills.");
    }
    out.into_iter().map(String::from).collect()
}
