//! Records exchanged with the quiz API.

mod choice;
mod question;

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

pub use choice::{Choice, NewChoice};
pub use question::{created_question_id, NewQuestion, Question, QuizQuestion};

/// Identifiers arrive as JSON strings from some backends and as numbers
/// from others. Both are normalised to a string.
pub(crate) fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a string or numeric id, got {value}")))
}
