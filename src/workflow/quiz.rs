//! Quiz taking: load and enrich, answer tracking, scoring, and
//! delete-with-confirmation.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use futures_util::future::join_all;
use log::{error, info, warn};

use crate::api::{ApiError, QuizApi};
use crate::models::{Question, QuizQuestion};

use super::{Effect, LoadTracker, Notice, Notifier, Ticket, ValidationError};

/// Fetches every question and then, concurrently, the choices of each.
pub async fn load_quiz<A: QuizApi>(api: &A) -> Result<Vec<QuizQuestion>, ApiError> {
    let questions = api.list_questions().await?;
    Ok(enrich(api, questions).await)
}

/// Attaches choices to each question, keeping the question order.
///
/// A failed fetch leaves that question with no choices and does not affect
/// the others.
pub async fn enrich<A: QuizApi>(api: &A, questions: Vec<Question>) -> Vec<QuizQuestion> {
    join_all(
        questions
            .into_iter()
            .map(|question| enrich_one(api, question)),
    )
    .await
}

async fn enrich_one<A: QuizApi>(api: &A, question: Question) -> QuizQuestion {
    let choices = match api.list_choices(&question.id).await {
        Ok(choices) => choices,
        Err(err) => {
            warn!("Choices for question {} unavailable: {err}", question.id);
            Vec::new()
        }
    };
    QuizQuestion::new(question, choices)
}

/// Result of a scored submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} out of {}", self.correct, self.total)
    }
}

/// Counts questions whose selected text matches a choice flagged correct.
///
/// With duplicate choice texts the first one in server order decides.
pub fn score(questions: &[QuizQuestion], answers: &HashMap<String, String>) -> Score {
    let correct = questions
        .iter()
        .filter(|question| {
            answers
                .get(&question.id)
                .and_then(|selected| question.choice_by_text(selected))
                .is_some_and(|choice| choice.is_correct())
        })
        .count();

    Score {
        correct,
        total: questions.len(),
    }
}

/// State of the quiz screen.
#[derive(Debug, Default)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: HashMap<String, String>,
    pending_delete: Option<String>,
    summary: Option<Score>,
    loads: LoadTracker,
    cursor: usize,
    choice_cursor: usize,
}

impl QuizSession {
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn is_loading(&self) -> bool {
        self.loads.is_loading()
    }

    pub fn reload(&mut self) -> Effect {
        Effect::LoadQuiz(self.loads.issue())
    }

    pub fn on_loaded(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<QuizQuestion>, ApiError>,
        notifier: &mut impl Notifier,
    ) {
        if !self.loads.settle(ticket) {
            return;
        }

        match result {
            Ok(questions) => {
                info!("Loaded {} quiz questions", questions.len());
                self.questions = questions;
            }
            Err(err) => {
                error!("Loading quiz failed: {err}");
                self.questions.clear();
                notifier.notify(Notice::error("Could not load the questions"));
            }
        }
        self.cursor = self.cursor.min(self.questions.len().saturating_sub(1));
        self.choice_cursor = self.selected_choice_index().unwrap_or(0);
        if self.pending_delete_question().is_none() {
            self.pending_delete = None;
        }
    }

    /// Index of the question under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the highlighted choice of the question under the cursor.
    pub fn choice_cursor(&self) -> usize {
        self.choice_cursor
    }

    pub fn focused_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.cursor)
    }

    fn selected_choice_index(&self) -> Option<usize> {
        let question = self.focused_question()?;
        let selected = self.answers.get(&question.id)?;
        question
            .choices
            .iter()
            .position(|choice| &choice.choice_text == selected)
    }

    pub fn next_question(&mut self) {
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
            self.choice_cursor = self.selected_choice_index().unwrap_or(0);
        }
    }

    pub fn previous_question(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.choice_cursor = self.selected_choice_index().unwrap_or(0);
        }
    }

    pub fn next_choice(&mut self) {
        let count = self.focused_question().map_or(0, |q| q.choices.len());
        if count > 0 {
            self.choice_cursor = (self.choice_cursor + 1) % count;
        }
    }

    pub fn previous_choice(&mut self) {
        let count = self.focused_question().map_or(0, |q| q.choices.len());
        if count > 0 {
            self.choice_cursor = (self.choice_cursor + count - 1) % count;
        }
    }

    /// Records `choice_text` as the answer to `question_id`, replacing any
    /// earlier selection. Unknown questions or choices are ignored.
    pub fn select_answer(&mut self, question_id: &str, choice_text: &str) -> bool {
        let known = self
            .questions
            .iter()
            .find(|question| question.id == question_id)
            .is_some_and(|question| question.choice_by_text(choice_text).is_some());
        if known {
            self.answers
                .insert(question_id.to_string(), choice_text.to_string());
        }
        known
    }

    /// Selects the highlighted choice of the focused question.
    pub fn select_highlighted(&mut self) -> bool {
        let Some(question) = self.focused_question() else {
            return false;
        };
        let Some(choice) = question.choices.get(self.choice_cursor) else {
            return false;
        };
        let (id, text) = (question.id.clone(), choice.choice_text.clone());
        self.select_answer(&id, &text)
    }

    pub fn selection(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| self.answers.contains_key(&question.id))
            .count()
    }

    /// Scores the quiz if every question has an answer.
    ///
    /// On success the selections are cleared and the score is kept as the
    /// summary until dismissed.
    pub fn submit(&mut self, notifier: &mut impl Notifier) -> Option<Score> {
        let unanswered = self.questions.len() - self.answered_count();
        if unanswered > 0 {
            notifier.notify(Notice::error(
                ValidationError::Unanswered(unanswered).to_string(),
            ));
            return None;
        }

        let result = score(&self.questions, &self.answers);
        info!("Quiz submitted: {result}");
        self.answers.clear();
        self.choice_cursor = 0;
        self.summary = Some(result);
        Some(result)
    }

    pub fn summary(&self) -> Option<Score> {
        self.summary
    }

    pub fn dismiss_summary(&mut self) {
        self.summary = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Question text of the pending delete target, for the prompt.
    pub fn pending_delete_question(&self) -> Option<&QuizQuestion> {
        let id = self.pending_delete.as_deref()?;
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn stage_delete(&mut self, question_id: &str) {
        self.pending_delete = Some(question_id.to_string());
    }

    pub fn stage_delete_focused(&mut self) {
        if let Some(id) = self.focused_question().map(|question| question.id.clone()) {
            self.pending_delete = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Clears the pending target and returns the delete to issue.
    pub fn confirm_delete(&mut self) -> Option<Effect> {
        self.pending_delete.take().map(Effect::DeleteQuizQuestion)
    }

    /// Returns the reload to run when the delete succeeded.
    pub fn on_deleted(
        &mut self,
        id: &str,
        result: Result<(), ApiError>,
        notifier: &mut impl Notifier,
    ) -> Option<Effect> {
        match result {
            Ok(()) => {
                info!("Deleted question {id}");
                notifier.notify(Notice::success("Question deleted"));
                Some(self.reload())
            }
            Err(err) => {
                error!("Deleting question {id} failed: {err}");
                notifier.notify(Notice::error("Could not delete the question"));
                None
            }
        }
    }
}
