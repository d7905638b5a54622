use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(CatalogError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Target style attributes. Every attribute is optional; challenges only set
/// the ones they care about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pacing: Option<String>,
    /// Target reading grade level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_level: Option<u8>,
}

impl TargetStyle {
    pub fn is_empty(&self) -> bool {
        self.formality.is_none()
            && self.tone.is_none()
            && self.pacing.is_none()
            && self.reading_level.is_none()
    }
}

/// Shape the model's answer is expected to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Email,
    Narrative,
    Explanation,
    BusinessProposal,
    SocialMedia,
    CustomerService,
    Recipe,
    Documentation,
    BulletPoints,
    NumberedList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub max_words: u32,
    #[serde(default)]
    pub required_keywords: Vec<String>,
    #[serde(default)]
    pub target_style: TargetStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// A predefined writing task. Immutable once loaded into a [`super::Catalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Time limit in seconds.
    pub time_limit_secs: u32,
    pub constraints: Constraints,
    /// Reference answer the heuristic evaluator compares against.
    #[serde(default)]
    pub target_response: String,
}
