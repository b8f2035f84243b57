use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{deserialize_id, id_from_value, Choice};

/// A question as returned by `GET /questions`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub question_text: String,
}

/// Body of `POST /questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    pub question_text: String,
}

/// A question together with the choices fetched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: String,
    pub question_text: String,
    pub choices: Vec<Choice>,
}

impl QuizQuestion {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text,
            choices,
        }
    }

    /// First choice whose text is exactly `text`, in server order.
    pub fn choice_by_text(&self, text: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.choice_text == text)
    }
}

/// Extracts the identifier from a `POST /questions` response body.
///
/// `question_id` is preferred, `id` is accepted as a fallback. Empty
/// identifiers are treated as missing.
pub fn created_question_id(body: &Value) -> Option<String> {
    ["question_id", "id"]
        .iter()
        .filter_map(|key| body.get(key))
        .filter_map(id_from_value)
        .find(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_question_accepts_numeric_id() {
        let questions: Vec<Question> = serde_json::from_value(json!([
            { "id": "q-1", "question_text": "What is ownership?" },
            { "id": 7, "question_text": "What is a lifetime?" }
        ]))
        .unwrap();

        assert_eq!(questions[0].id, "q-1");
        assert_eq!(questions[1].id, "7");
        assert_eq!(questions[1].question_text, "What is a lifetime?");
    }

    #[test]
    fn test_question_rejects_object_id() {
        let result: Result<Question, _> =
            serde_json::from_value(json!({ "id": {}, "question_text": "?" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_created_question_id() {
        assert_eq!(
            created_question_id(&json!({ "question_id": "abc" })),
            Some("abc".to_string())
        );
        assert_eq!(created_question_id(&json!({ "id": 12 })), Some("12".to_string()));
        assert_eq!(
            created_question_id(&json!({ "question_id": "", "id": "fallback" })),
            Some("fallback".to_string())
        );
        assert_eq!(created_question_id(&json!({ "question_id": "" })), None);
        assert_eq!(created_question_id(&json!({ "message": "ok" })), None);
        assert_eq!(created_question_id(&Value::Null), None);
    }

    #[test]
    fn test_new_question_body() {
        let body = serde_json::to_value(NewQuestion {
            question_text: "Why borrow?".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "question_text": "Why borrow?" }));
    }
}
