//! Screen controllers.
//!
//! Each controller owns the ephemeral state of one screen and exposes
//! transition methods. Transitions that need the network return an
//! [`Effect`]; the app runs it with [`perform`] on a spawned task and feeds
//! the resulting [`Completion`] back to the controller.

pub mod creation;
pub mod listing;
mod notice;
pub mod quiz;
mod validation;

use log::debug;

use crate::api::{ApiError, QuizApi};
use crate::models::{Question, QuizQuestion};

pub use notice::{Level, Notice, Notifier};
pub use validation::ValidationError;

use creation::QuestionDraft;

/// Identifies one load request of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Hands out load tickets and remembers the newest one.
///
/// Completions carrying an older ticket are stale: a later load was issued
/// after them and its result must not be overwritten.
#[derive(Debug, Default)]
pub struct LoadTracker {
    latest: u64,
    pending: bool,
}

impl LoadTracker {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        self.pending = true;
        Ticket(self.latest)
    }

    /// Returns true if `ticket` is the newest one, marking the load settled.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if ticket.0 != self.latest {
            debug!("Discarding stale load #{} (latest is #{})", ticket.0, self.latest);
            return false;
        }
        self.pending = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }
}

/// A network operation requested by a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListQuestions(Ticket),
    LoadQuiz(Ticket),
    CreateQuestion(QuestionDraft),
    DeleteListed(String),
    DeleteQuizQuestion(String),
}

/// Outcome of an [`Effect`].
#[derive(Debug)]
pub enum Completion {
    QuestionsListed(Ticket, Result<Vec<Question>, ApiError>),
    QuizLoaded(Ticket, Result<Vec<QuizQuestion>, ApiError>),
    QuestionCreated(Result<String, ApiError>),
    ListedDeleted(String, Result<(), ApiError>),
    QuizQuestionDeleted(String, Result<(), ApiError>),
}

pub async fn perform<A: QuizApi>(api: &A, effect: Effect) -> Completion {
    match effect {
        Effect::ListQuestions(ticket) => {
            Completion::QuestionsListed(ticket, api.list_questions().await)
        }
        Effect::LoadQuiz(ticket) => Completion::QuizLoaded(ticket, quiz::load_quiz(api).await),
        Effect::CreateQuestion(draft) => {
            Completion::QuestionCreated(creation::save_draft(api, &draft).await)
        }
        Effect::DeleteListed(id) => {
            let result = api.delete_question(&id).await;
            Completion::ListedDeleted(id, result)
        }
        Effect::DeleteQuizQuestion(id) => {
            let result = api.delete_question(&id).await;
            Completion::QuizQuestionDeleted(id, result)
        }
    }
}
