//! Access to the remote quiz service.
//!
//! Workflows only see the [`QuizApi`] trait. [`HttpQuizApi`] is the reqwest
//! implementation used by the binary.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;

pub use client::{HttpQuizApi, DEFAULT_BASE_URL};
pub use error::ApiError;

use crate::models::{Choice, NewChoice, NewQuestion, Question};

/// The five operations the quiz service exposes.
///
/// Futures are `Send` so operations can run on spawned tasks while the
/// terminal keeps rendering.
pub trait QuizApi: Send + Sync {
    /// `GET /questions`
    fn list_questions(&self) -> impl Future<Output = Result<Vec<Question>, ApiError>> + Send;

    /// `POST /questions`, returning the server-assigned identifier.
    fn create_question(
        &self,
        question: &NewQuestion,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// `DELETE /questions/{id}`
    fn delete_question(&self, id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /questions/{id}/choices`
    fn list_choices(
        &self,
        question_id: &str,
    ) -> impl Future<Output = Result<Vec<Choice>, ApiError>> + Send;

    /// `POST /questions/{id}/choices`
    fn create_choice(
        &self,
        question_id: &str,
        choice: &NewChoice,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
