use thiserror::Error;

/// Input problems caught before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter the question text")]
    MissingQuestion,
    /// 1-based answer number.
    #[error("Please fill in answer {0}")]
    MissingAnswer(usize),
    /// 1-based answer numbers.
    #[error("Answers {0} and {1} have the same text")]
    DuplicateAnswer(usize, usize),
    /// 1-based answer number.
    #[error("Correct answer {0} is out of range")]
    CorrectAnswer(usize),
    #[error("Please answer every question ({0} unanswered)")]
    Unanswered(usize),
}
