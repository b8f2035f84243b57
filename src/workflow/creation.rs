//! Question creation: a form with four answers and a two-phase write.

use log::{error, info, warn};

use crate::api::{ApiError, QuizApi};
use crate::models::{NewChoice, NewQuestion};

use super::{Effect, Notice, Notifier, ValidationError};

pub const ANSWER_COUNT: usize = 4;

/// Field of the form that receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Question,
    Answer(usize),
    Correct,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Question => Self::Answer(0),
            Self::Answer(index) if index + 1 < ANSWER_COUNT => Self::Answer(index + 1),
            Self::Answer(_) => Self::Correct,
            Self::Correct => Self::Question,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Question => Self::Correct,
            Self::Answer(0) => Self::Question,
            Self::Answer(index) => Self::Answer(index - 1),
            Self::Correct => Self::Answer(ANSWER_COUNT - 1),
        }
    }
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    question_text: String,
    answers: [String; ANSWER_COUNT],
    correct_index: usize,
}

impl QuestionDraft {
    pub fn new(
        question_text: impl Into<String>,
        answers: [String; ANSWER_COUNT],
        correct_index: usize,
    ) -> Result<Self, ValidationError> {
        let question_text = question_text.into();
        if question_text.trim().is_empty() {
            return Err(ValidationError::MissingQuestion);
        }

        for (index, answer) in answers.iter().enumerate() {
            if answer.trim().is_empty() {
                return Err(ValidationError::MissingAnswer(index + 1));
            }
            if let Some(earlier) = answers[..index].iter().position(|other| other == answer) {
                return Err(ValidationError::DuplicateAnswer(earlier + 1, index + 1));
            }
        }

        if correct_index >= ANSWER_COUNT {
            return Err(ValidationError::CorrectAnswer(correct_index + 1));
        }

        Ok(Self {
            question_text,
            answers,
            correct_index,
        })
    }

    pub fn question(&self) -> NewQuestion {
        NewQuestion {
            question_text: self.question_text.clone(),
        }
    }

    /// The four choices in answer order; only the designated one is correct.
    pub fn choices(&self) -> impl Iterator<Item = NewChoice> + '_ {
        self.answers
            .iter()
            .enumerate()
            .map(|(index, answer)| NewChoice {
                choice_text: answer.clone(),
                is_correct: index == self.correct_index,
            })
    }
}

/// Creates the question, then its choices one after another.
///
/// Stops at the first failure. Records already created are left in place.
pub async fn save_draft<A: QuizApi>(api: &A, draft: &QuestionDraft) -> Result<String, ApiError> {
    let question_id = api.create_question(&draft.question()).await?;

    for (index, choice) in draft.choices().enumerate() {
        api.create_choice(&question_id, &choice)
            .await
            .inspect_err(|err| {
                warn!(
                    "Question {question_id} left with {index} of {ANSWER_COUNT} choices: {err}"
                )
            })?;
    }

    info!("Created question {question_id} with {ANSWER_COUNT} choices");
    Ok(question_id)
}

/// State of the creation screen.
#[derive(Debug, Clone, Default)]
pub struct QuestionForm {
    question: String,
    answers: [String; ANSWER_COUNT],
    correct_index: usize,
    focus: FormField,
    submitting: bool,
}

impl QuestionForm {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answers(&self) -> &[String; ANSWER_COUNT] {
        &self.answers
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Typed input goes nowhere while a submission is in flight.
    fn focused_text(&mut self) -> Option<&mut String> {
        if self.submitting {
            return None;
        }
        match self.focus {
            FormField::Question => Some(&mut self.question),
            FormField::Answer(index) => self.answers.get_mut(index),
            FormField::Correct => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) {
        if let Some(answer) = self.answers.get_mut(index) {
            *answer = text.into();
        }
    }

    pub fn set_correct_index(&mut self, index: usize) {
        self.correct_index = index;
    }

    pub fn next_correct(&mut self) {
        if self.submitting {
            return;
        }
        self.correct_index = (self.correct_index + 1) % ANSWER_COUNT;
    }

    pub fn previous_correct(&mut self) {
        if self.submitting {
            return;
        }
        self.correct_index = (self.correct_index + ANSWER_COUNT - 1) % ANSWER_COUNT;
    }

    /// Validates the form and returns the write to perform.
    ///
    /// Nothing is returned while a previous submission is still in flight.
    pub fn submit(&mut self, notifier: &mut impl Notifier) -> Option<Effect> {
        if self.submitting {
            return None;
        }

        match QuestionDraft::new(
            self.question.clone(),
            self.answers.clone(),
            self.correct_index,
        ) {
            Ok(draft) => {
                self.submitting = true;
                Some(Effect::CreateQuestion(draft))
            }
            Err(err) => {
                notifier.notify(Notice::error(err.to_string()));
                None
            }
        }
    }

    /// Returns true when the question was saved and the app should move on
    /// to the quiz.
    pub fn on_created(
        &mut self,
        result: Result<String, ApiError>,
        notifier: &mut impl Notifier,
    ) -> bool {
        self.submitting = false;
        match result {
            Ok(_) => {
                *self = Self::default();
                notifier.notify(Notice::success("Question and answers saved"));
                true
            }
            Err(err) => {
                error!("Saving question failed: {err}");
                notifier.notify(Notice::error("Something went wrong while saving"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::fake::{Call, FakeQuizApi};
    use crate::workflow::{perform, Completion, Level};

    use super::*;

    fn answers(texts: [&str; ANSWER_COUNT]) -> [String; ANSWER_COUNT] {
        texts.map(String::from)
    }

    fn filled_form(correct_index: usize) -> QuestionForm {
        let mut form = QuestionForm::default();
        form.set_question("Which keyword moves ownership into a closure?");
        for (index, text) in ["ref", "move", "mut", "dyn"].iter().enumerate() {
            form.set_answer(index, *text);
        }
        form.set_correct_index(correct_index);
        form
    }

    #[test]
    fn test_draft_validation() {
        let valid = answers(["a", "b", "c", "d"]);

        assert_eq!(
            QuestionDraft::new("", valid.clone(), 0),
            Err(ValidationError::MissingQuestion)
        );
        assert_eq!(
            QuestionDraft::new("   ", valid.clone(), 0),
            Err(ValidationError::MissingQuestion)
        );
        assert_eq!(
            QuestionDraft::new("Q", answers(["a", "b", "", "d"]), 0),
            Err(ValidationError::MissingAnswer(3))
        );
        assert_eq!(
            QuestionDraft::new("Q", answers(["a", "b", "a", "d"]), 0),
            Err(ValidationError::DuplicateAnswer(1, 3))
        );
        assert_eq!(
            QuestionDraft::new("Q", valid.clone(), 4),
            Err(ValidationError::CorrectAnswer(5))
        );
        assert!(QuestionDraft::new("Q", valid, 3).is_ok());
    }

    #[test]
    fn test_exactly_one_choice_is_correct() {
        for correct_index in 0..ANSWER_COUNT {
            let draft =
                QuestionDraft::new("Q", answers(["a", "b", "c", "d"]), correct_index).unwrap();
            let flags: Vec<bool> = draft.choices().map(|choice| choice.is_correct).collect();

            assert_eq!(flags.iter().filter(|flag| **flag).count(), 1);
            assert!(flags[correct_index]);
        }
    }

    #[test]
    fn test_invalid_form_notifies_without_effect() {
        let mut form = filled_form(0);
        form.set_answer(2, "");
        let mut notices = Vec::new();

        assert_eq!(form.submit(&mut notices), None);
        assert_eq!(notices, vec![Notice::error("Please fill in answer 3")]);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_focus_cycles_through_fields() {
        let mut form = QuestionForm::default();
        let mut seen = vec![form.focus()];
        for _ in 0..ANSWER_COUNT + 1 {
            form.focus_next();
            seen.push(form.focus());
        }
        assert_eq!(
            seen,
            vec![
                FormField::Question,
                FormField::Answer(0),
                FormField::Answer(1),
                FormField::Answer(2),
                FormField::Answer(3),
                FormField::Correct,
            ]
        );

        form.focus_next();
        assert_eq!(form.focus(), FormField::Question);
        form.focus_previous();
        assert_eq!(form.focus(), FormField::Correct);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = QuestionForm::default();
        form.push_char('Q');
        form.focus_next();
        form.push_char('a');
        form.push_char('b');
        form.pop_char();
        form.focus_previous();
        form.focus_previous();
        form.push_char('x');

        assert_eq!(form.question(), "Q");
        assert_eq!(form.answers()[0], "a");

        form.previous_correct();
        assert_eq!(form.correct_index(), ANSWER_COUNT - 1);
        form.next_correct();
        assert_eq!(form.correct_index(), 0);
    }

    #[test]
    fn test_form_is_locked_while_saving() {
        let mut form = filled_form(1);
        let mut notices = Vec::new();
        form.submit(&mut notices).unwrap();

        form.push_char('!');
        form.pop_char();
        form.next_correct();
        assert_eq!(form.question(), "Which keyword moves ownership into a closure?");
        assert_eq!(form.correct_index(), 1);

        let failure = Err(ApiError::MissingId);
        assert!(!form.on_created(failure, &mut notices));
        form.push_char('!');
        assert_eq!(form.question(), "Which keyword moves ownership into a closure?!");
    }

    #[tokio::test]
    async fn test_submission_creates_question_then_choices_in_order() {
        let api = FakeQuizApi::default();
        let mut form = filled_form(1);
        let mut notices = Vec::new();

        let effect = form.submit(&mut notices).unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.submit(&mut notices), None);

        let Completion::QuestionCreated(result) = perform(&api, effect).await else {
            panic!("unexpected completion");
        };
        let id = result.as_ref().unwrap().clone();

        assert_eq!(
            api.calls(),
            vec![
                Call::CreateQuestion("Which keyword moves ownership into a closure?".to_string()),
                Call::CreateChoice {
                    question_id: id.clone(),
                    choice_text: "ref".to_string(),
                    is_correct: false,
                },
                Call::CreateChoice {
                    question_id: id.clone(),
                    choice_text: "move".to_string(),
                    is_correct: true,
                },
                Call::CreateChoice {
                    question_id: id.clone(),
                    choice_text: "mut".to_string(),
                    is_correct: false,
                },
                Call::CreateChoice {
                    question_id: id.clone(),
                    choice_text: "dyn".to_string(),
                    is_correct: false,
                },
            ]
        );

        assert!(form.on_created(result, &mut notices));
        assert_eq!(form.question(), "");
        assert!(form.answers().iter().all(String::is_empty));
        assert_eq!(form.correct_index(), 0);
        assert_eq!(notices.last().unwrap().level, Level::Success);
    }

    #[tokio::test]
    async fn test_failed_question_creation_creates_no_choices() {
        let api = FakeQuizApi::default();
        api.fail_create_question();
        let draft = QuestionDraft::new("Q", answers(["a", "b", "c", "d"]), 0).unwrap();

        assert!(save_draft(&api, &draft).await.is_err());
        assert_eq!(
            api.count(|call| matches!(call, Call::CreateChoice { .. })),
            0
        );
    }

    #[tokio::test]
    async fn test_missing_identifier_creates_no_choices() {
        let api = FakeQuizApi::default();
        api.omit_created_id();
        let mut form = filled_form(0);
        let mut notices = Vec::new();

        let effect = form.submit(&mut notices).unwrap();
        let Completion::QuestionCreated(result) = perform(&api, effect).await else {
            panic!("unexpected completion");
        };

        assert!(matches!(result, Err(ApiError::MissingId)));
        assert_eq!(
            api.count(|call| matches!(call, Call::CreateChoice { .. })),
            0
        );

        assert!(!form.on_created(result, &mut notices));
        assert_eq!(
            notices,
            vec![Notice::error("Something went wrong while saving")]
        );
        assert_eq!(form.question(), "Which keyword moves ownership into a closure?");
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_failed_choice_stops_the_rest_without_rollback() {
        let api = FakeQuizApi::default();
        api.fail_create_choice_at(1);
        let draft = QuestionDraft::new("Q", answers(["a", "b", "c", "d"]), 2).unwrap();

        assert!(save_draft(&api, &draft).await.is_err());
        assert_eq!(
            api.count(|call| matches!(call, Call::CreateChoice { .. })),
            2
        );
        assert_eq!(api.count(|call| matches!(call, Call::DeleteQuestion(_))), 0);
        assert_eq!(api.choices_of("new-1").len(), 1);
    }
}
