//! Question listing with delete-and-reload.

use log::{error, info, warn};

use crate::api::ApiError;
use crate::models::Question;

use super::{Effect, LoadTracker, Notice, Notifier, Ticket};

/// State of the listing screen.
#[derive(Debug, Default)]
pub struct QuestionList {
    questions: Vec<Question>,
    selected: usize,
    loads: LoadTracker,
}

impl QuestionList {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Rows with their 1-based display number, in server order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Question)> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| (index + 1, question))
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loads.is_loading()
    }

    pub fn select_next(&mut self) {
        if !self.questions.is_empty() {
            self.selected = (self.selected + 1).min(self.questions.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn reload(&mut self) -> Effect {
        Effect::ListQuestions(self.loads.issue())
    }

    pub fn on_listed(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Question>, ApiError>,
        notifier: &mut impl Notifier,
    ) {
        if !self.loads.settle(ticket) {
            return;
        }

        match result {
            Ok(questions) => {
                self.questions = questions;
                self.selected = self.selected.min(self.questions.len().saturating_sub(1));
            }
            Err(err) => {
                error!("Loading question list failed: {err}");
                notifier.notify(Notice::error("Could not load questions"));
            }
        }
    }

    pub fn delete(&self, id: &str) -> Effect {
        Effect::DeleteListed(id.to_string())
    }

    pub fn delete_selected(&self) -> Option<Effect> {
        self.questions
            .get(self.selected)
            .map(|question| self.delete(&question.id))
    }

    /// The list is always re-fetched, whatever the delete returned.
    pub fn on_deleted(
        &mut self,
        id: &str,
        result: Result<(), ApiError>,
        notifier: &mut impl Notifier,
    ) -> Effect {
        match result {
            Ok(()) => {
                info!("Deleted question {id}");
                notifier.notify(Notice::success("Question deleted"));
            }
            Err(err) => {
                warn!("Deleting question {id} failed: {err}");
                notifier.notify(Notice::error("Could not delete the question"));
            }
        }
        self.reload()
    }
}
