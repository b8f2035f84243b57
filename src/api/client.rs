use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;

use crate::models::{created_question_id, Choice, NewChoice, NewQuestion, Question};

use super::{ApiError, QuizApi};

/// Address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Tags the log lines of one request/response pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct RequestId(usize);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RequestId {
    /// Wraps back to zero on overflow.
    fn next() -> Self {
        static REQUEST_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// JSON-over-HTTP implementation of [`QuizApi`].
#[derive(Debug, Clone)]
pub struct HttpQuizApi {
    client: Client,
    base: Url,
}

impl HttpQuizApi {
    /// Build a client for the service rooted at `base`.
    ///
    /// A path prefix on `base` (e.g. `http://host/api`) is kept.
    pub fn new(base: Url) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base));
        }
        let client = Client::builder().build()?;
        Ok(Self { client, base })
    }

    /// Appends percent-encoded `segments` to the base address.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request, turning any non-2xx status into an error.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build()?;
        let id = RequestId::next();
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("->req{id} {method} {url}");

        let response = self
            .client
            .execute(request)
            .await
            .inspect_err(|err| warn!("<-rsp{id} {method} {url} failed: {err}"))?;

        let status = response.status();
        if status.is_success() {
            debug!("<-rsp{id} {status}");
            Ok(response)
        } else {
            warn!("<-rsp{id} {status} {method} {url}");
            Err(ApiError::status(method, url.path(), status))
        }
    }
}

impl QuizApi for HttpQuizApi {
    async fn list_questions(&self) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(&["questions"]);
        let response = self.execute(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn create_question(&self, question: &NewQuestion) -> Result<String, ApiError> {
        let url = self.endpoint(&["questions"]);
        let response = self.execute(self.client.post(url).json(question)).await?;
        let body: Value = response.json().await?;
        created_question_id(&body).ok_or(ApiError::MissingId)
    }

    async fn delete_question(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["questions", id]);
        self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    async fn list_choices(&self, question_id: &str) -> Result<Vec<Choice>, ApiError> {
        let url = self.endpoint(&["questions", question_id, "choices"]);
        let response = self.execute(self.client.get(url)).await?;
        // Some backends answer `null` for a question without choices.
        let choices: Option<Vec<Choice>> = response.json().await?;
        Ok(choices.unwrap_or_default())
    }

    async fn create_choice(&self, question_id: &str, choice: &NewChoice) -> Result<(), ApiError> {
        let url = self.endpoint(&["questions", question_id, "choices"]);
        self.execute(self.client.post(url).json(choice)).await?;
        Ok(())
    }
}
