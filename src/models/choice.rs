use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// A candidate answer as returned by `GET /questions/{id}/choices`.
///
/// `is_correct` is absent when the backend does not expose it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub choice_text: String,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl Choice {
    /// Only an explicit `true` counts; a missing flag is treated as wrong.
    pub fn is_correct(&self) -> bool {
        self.is_correct == Some(true)
    }
}

/// Body of `POST /questions/{id}/choices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewChoice {
    pub choice_text: String,
    pub is_correct: bool,
}
