use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Model a prompt is (nominally) sent to. No model is ever called; the kind
/// only picks the canned response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ModelKind {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "claude")]
    Claude,
    #[serde(rename = "gemini")]
    Gemini,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::OpenAi, ModelKind::Claude, ModelKind::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::OpenAi => "openai",
            ModelKind::Claude => "claude",
            ModelKind::Gemini => "gemini",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::OpenAi => "OpenAI GPT",
            ModelKind::Claude => "Anthropic Claude",
            ModelKind::Gemini => "Google Gemini",
        }
    }

    /// Canned response quoting the first 50 characters of the prompt.
    pub fn mock_response(&self, prompt: &str) -> String {
        let head = prompt_head(prompt);
        match self {
            ModelKind::OpenAi => format!(
                "OpenAI GPT response to: '{head}...' - This is a comprehensive response that \
                 follows your prompt instructions carefully."
            ),
            ModelKind::Claude => format!(
                "Claude response to: '{head}...' - I'll provide a thoughtful and detailed \
                 response based on your specific requirements."
            ),
            ModelKind::Gemini => format!(
                "Gemini response to: '{head}...' - Here's my response following the guidelines \
                 and constraints you've specified."
            ),
        }
    }
}

pub(crate) fn prompt_head(prompt: &str) -> String {
    prompt.chars().take(50).collect()
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ModelKind::OpenAi),
            "claude" => Ok(ModelKind::Claude),
            "gemini" => Ok(ModelKind::Gemini),
            other => Err(ValidationError::UnknownVariant {
                kind: "model",
                value: other.to_string(),
            }),
        }
    }
}
