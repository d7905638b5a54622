//! Challenge catalog.
//!
//! An ordered, read-only list of challenge definitions. The catalog is built
//! once and shared by reference; nothing mutates a challenge after load.

mod builtin;
mod challenge;

pub use challenge::{Challenge, Constraints, Difficulty, OutputFormat, TargetStyle};

use crate::error::CatalogError;

#[derive(Debug, Clone)]
pub struct Catalog {
    challenges: Vec<Challenge>,
}

impl Catalog {
    /// The built-in challenge library, in display order.
    pub fn builtin() -> Self {
        Self {
            challenges: builtin::challenges(),
        }
    }

    pub fn from_challenges(challenges: Vec<Challenge>) -> Self {
        Self { challenges }
    }

    pub fn all(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Challenge, CatalogError> {
        self.challenges
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::UnknownChallenge(id.to_string()))
    }

    /// Challenges of one difficulty, keeping catalog order.
    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &Challenge> {
        self.challenges
            .iter()
            .filter(move |c| c.difficulty == difficulty)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
