use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::api::QuizApi;
use crate::workflow::creation::QuestionForm;
use crate::workflow::listing::QuestionList;
use crate::workflow::quiz::QuizSession;
use crate::workflow::{perform, Completion, Effect, Level, Notice, Notifier};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 3;

/// The three screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Screen {
    Create,
    List,
    #[default]
    Quiz,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Create, Screen::List, Screen::Quiz];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Create => "Add question",
            Screen::List => "Questions",
            Screen::Quiz => "Quiz",
        }
    }
}

/// Notices waiting to be shown, newest last.
#[derive(Debug, Default)]
pub struct Toasts {
    entries: VecDeque<(Notice, Instant)>,
}

impl Toasts {
    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter().map(|(notice, _)| notice)
    }

    pub fn prune(&mut self, now: Instant) {
        self.entries
            .retain(|(_, shown_at)| now.duration_since(*shown_at) < TOAST_LIFETIME);
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            Level::Success => info!("notice: {}", notice.message),
            Level::Error => warn!("notice: {}", notice.message),
        }
        if self.entries.len() == MAX_TOASTS {
            self.entries.pop_front();
        }
        self.entries.push_back((notice, Instant::now()));
    }
}

/// Application state: the three screen controllers plus the plumbing that
/// runs their network effects in the background.
pub struct App<A> {
    pub screen: Screen,
    pub should_quit: bool,
    api: Arc<A>,
    form: QuestionForm,
    list: QuestionList,
    quiz: QuizSession,
    toasts: Toasts,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<A> App<A> {
    pub fn form(&self) -> &QuestionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QuestionForm {
        &mut self.form
    }

    pub fn list(&self) -> &QuestionList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut QuestionList {
        &mut self.list
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizSession {
        &mut self.quiz
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn prune_toasts(&mut self) {
        self.toasts.prune(Instant::now());
    }
}

impl<A: QuizApi + 'static> App<A> {
    pub fn new(api: A, screen: Screen) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            screen,
            should_quit: false,
            api: Arc::new(api),
            form: QuestionForm::default(),
            list: QuestionList::default(),
            quiz: QuizSession::default(),
            toasts: Toasts::default(),
            completions_tx,
            completions_rx,
        }
    }

    /// Loads the data of the start screen.
    pub fn start(&mut self) {
        self.navigate(self.screen);
    }

    /// Switches screen; the listing and quiz screens reload on entry.
    ///
    /// A delete awaiting confirmation is dropped.
    pub fn navigate(&mut self, screen: Screen) {
        debug!("Navigating to {screen:?}");
        self.screen = screen;
        self.quiz.cancel_delete();
        match screen {
            Screen::Create => {}
            Screen::List => {
                let effect = self.list.reload();
                self.dispatch(effect);
            }
            Screen::Quiz => {
                let effect = self.quiz.reload();
                self.dispatch(effect);
            }
        }
    }

    pub fn submit_form(&mut self) {
        if let Some(effect) = self.form.submit(&mut self.toasts) {
            self.dispatch(effect);
        }
    }

    pub fn reload_list(&mut self) {
        let effect = self.list.reload();
        self.dispatch(effect);
    }

    pub fn delete_listed(&mut self) {
        if let Some(effect) = self.list.delete_selected() {
            self.dispatch(effect);
        }
    }

    pub fn reload_quiz(&mut self) {
        let effect = self.quiz.reload();
        self.dispatch(effect);
    }

    pub fn submit_quiz(&mut self) {
        self.quiz.submit(&mut self.toasts);
    }

    pub fn confirm_delete(&mut self) {
        if let Some(effect) = self.quiz.confirm_delete() {
            self.dispatch(effect);
        }
    }

    /// Runs `effect` on a background task; its completion arrives through
    /// the channel drained by [`App::drain_completions`].
    fn dispatch(&self, effect: Effect) {
        let api = Arc::clone(&self.api);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let completion = perform(api.as_ref(), effect).await;
            // The receiver only goes away when the app is shutting down.
            let _ = completions.send(completion);
        });
    }

    /// Applies every completion that has arrived, without waiting.
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply(completion);
        }
    }

    /// Waits for the next completion and applies it.
    pub async fn settle_next(&mut self) {
        if let Some(completion) = self.completions_rx.recv().await {
            self.apply(completion);
        }
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::QuestionsListed(ticket, result) => {
                self.list.on_listed(ticket, result, &mut self.toasts);
            }
            Completion::QuizLoaded(ticket, result) => {
                self.quiz.on_loaded(ticket, result, &mut self.toasts);
            }
            Completion::QuestionCreated(result) => {
                if self.form.on_created(result, &mut self.toasts) {
                    self.navigate(Screen::Quiz);
                }
            }
            Completion::ListedDeleted(id, result) => {
                let effect = self.list.on_deleted(&id, result, &mut self.toasts);
                self.dispatch(effect);
            }
            Completion::QuizQuestionDeleted(id, result) => {
                if let Some(effect) = self.quiz.on_deleted(&id, result, &mut self.toasts) {
                    self.dispatch(effect);
                }
            }
        }
    }
}
