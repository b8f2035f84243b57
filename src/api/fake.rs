//! In-memory [`QuizApi`] that records every call, for workflow tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use reqwest::{Method, StatusCode};
use tokio::sync::Barrier;

use crate::models::{Choice, NewChoice, NewQuestion, Question};

use super::{ApiError, QuizApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListQuestions,
    CreateQuestion(String),
    DeleteQuestion(String),
    ListChoices(String),
    CreateChoice {
        question_id: String,
        choice_text: String,
        is_correct: bool,
    },
}

#[derive(Default)]
struct FakeState {
    questions: Vec<(Question, Vec<Choice>)>,
    calls: Vec<Call>,
    next_id: usize,
    fail_list: bool,
    fail_create_question: bool,
    omit_created_id: bool,
    fail_delete: bool,
    fail_choices_for: HashSet<String>,
    fail_create_choice_at: Option<usize>,
    choices_created: usize,
    choices_gate: Option<Arc<Barrier>>,
}

#[derive(Default)]
pub struct FakeQuizApi {
    state: Mutex<FakeState>,
}

fn server_error(method: Method, path: String) -> ApiError {
    ApiError::status(method, path, StatusCode::INTERNAL_SERVER_ERROR)
}

impl FakeQuizApi {
    /// Seeds questions given as `(id, text, [(choice text, correct)])`.
    pub fn with_questions(questions: Vec<(&str, &str, Vec<(&str, bool)>)>) -> Self {
        let api = Self::default();
        {
            let mut state = api.lock();
            for (id, text, choices) in questions {
                let choices = choices
                    .into_iter()
                    .enumerate()
                    .map(|(index, (choice_text, correct))| Choice {
                        id: format!("{id}-c{index}"),
                        choice_text: choice_text.to_string(),
                        is_correct: Some(correct),
                    })
                    .collect();
                state.questions.push((
                    Question {
                        id: id.to_string(),
                        question_text: text.to_string(),
                    },
                    choices,
                ));
            }
        }
        api
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn choices_of(&self, question_id: &str) -> Vec<Choice> {
        self.lock()
            .questions
            .iter()
            .find(|(question, _)| question.id == question_id)
            .map(|(_, choices)| choices.clone())
            .unwrap_or_default()
    }

    pub fn fail_list_questions(&self) {
        self.lock().fail_list = true;
    }

    pub fn fail_create_question(&self) {
        self.lock().fail_create_question = true;
    }

    pub fn omit_created_id(&self) {
        self.lock().omit_created_id = true;
    }

    pub fn fail_delete(&self) {
        self.lock().fail_delete = true;
    }

    pub fn fail_choices_for(&self, question_id: &str) {
        self.lock().fail_choices_for.insert(question_id.to_string());
    }

    /// Holds every choice fetch until `fetches` of them are waiting at once.
    pub fn gate_choices(&self, fetches: usize) {
        self.lock().choices_gate = Some(Arc::new(Barrier::new(fetches)));
    }

    /// Fails the `index`th choice creation (0-based, counted across calls).
    pub fn fail_create_choice_at(&self, index: usize) {
        self.lock().fail_create_choice_at = Some(index);
    }
}

impl QuizApi for FakeQuizApi {
    async fn list_questions(&self) -> Result<Vec<Question>, ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::ListQuestions);
        if state.fail_list {
            return Err(server_error(Method::GET, "/questions".to_string()));
        }
        Ok(state
            .questions
            .iter()
            .map(|(question, _)| question.clone())
            .collect())
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<String, ApiError> {
        let mut state = self.lock();
        state
            .calls
            .push(Call::CreateQuestion(question.question_text.clone()));
        if state.fail_create_question {
            return Err(server_error(Method::POST, "/questions".to_string()));
        }
        if state.omit_created_id {
            return Err(ApiError::MissingId);
        }
        state.next_id += 1;
        let id = format!("new-{}", state.next_id);
        state.questions.push((
            Question {
                id: id.clone(),
                question_text: question.question_text.clone(),
            },
            Vec::new(),
        ));
        Ok(id)
    }

    async fn delete_question(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteQuestion(id.to_string()));
        if state.fail_delete {
            return Err(server_error(Method::DELETE, format!("/questions/{id}")));
        }
        let before = state.questions.len();
        state.questions.retain(|(question, _)| question.id != id);
        if state.questions.len() == before {
            return Err(ApiError::status(
                Method::DELETE,
                format!("/questions/{id}"),
                StatusCode::NOT_FOUND,
            ));
        }
        Ok(())
    }

    async fn list_choices(&self, question_id: &str) -> Result<Vec<Choice>, ApiError> {
        let gate = {
            let mut state = self.lock();
            state.calls.push(Call::ListChoices(question_id.to_string()));
            state.choices_gate.clone()
        };
        if let Some(gate) = gate {
            gate.wait().await;
        }

        let state = self.lock();
        if state.fail_choices_for.contains(question_id) {
            return Err(server_error(
                Method::GET,
                format!("/questions/{question_id}/choices"),
            ));
        }
        state
            .questions
            .iter()
            .find(|(question, _)| question.id == question_id)
            .map(|(_, choices)| choices.clone())
            .ok_or_else(|| {
                ApiError::status(
                    Method::GET,
                    format!("/questions/{question_id}/choices"),
                    StatusCode::NOT_FOUND,
                )
            })
    }

    async fn create_choice(&self, question_id: &str, choice: &NewChoice) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(Call::CreateChoice {
            question_id: question_id.to_string(),
            choice_text: choice.choice_text.clone(),
            is_correct: choice.is_correct,
        });
        let index = state.choices_created;
        state.choices_created += 1;
        if state.fail_create_choice_at == Some(index) {
            return Err(server_error(
                Method::POST,
                format!("/questions/{question_id}/choices"),
            ));
        }
        let Some((_, choices)) = state
            .questions
            .iter_mut()
            .find(|(question, _)| question.id == question_id)
        else {
            return Err(ApiError::status(
                Method::POST,
                format!("/questions/{question_id}/choices"),
                StatusCode::NOT_FOUND,
            ));
        };
        let id = format!("{question_id}-c{}", choices.len());
        choices.push(Choice {
            id,
            choice_text: choice.choice_text.clone(),
            is_correct: Some(choice.is_correct),
        });
        Ok(())
    }
}
