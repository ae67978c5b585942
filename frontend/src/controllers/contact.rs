//! Contact form flow: token handling, validation and submission.
//!
//! The controller only talks to the network through [`ContactApi`] and to the
//! page through [`FormView`], so the whole flow runs under a native test
//! executor.

use std::cell::{Cell, RefCell};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::notification::Severity;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("email regex is invalid: {}", e))
});

pub fn is_valid_email(email: &str) -> bool {
    email.matches('@').count() == 1 && EMAIL_RE.is_match(email)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
    /// Honeypot, hidden from people.
    pub website: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub csrf_token: String,
}

impl ContactSubmission {
    fn new(fields: &ContactFields, csrf_token: String) -> Self {
        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        Self {
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            service: optional(&fields.service),
            message: optional(&fields.message),
            website: optional(&fields.website),
            csrf_token,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// Whatever came back from `POST /api/contact`. `body` is `None` when the
/// response was not the expected JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactReply {
    pub status: u16,
    pub body: Option<ContactResponse>,
}

impl ContactReply {
    pub fn succeeded(&self) -> bool {
        (200..300).contains(&self.status) && self.body.as_ref().is_some_and(|b| b.success)
    }

    fn message(&self) -> Option<String> {
        self.body
            .as_ref()
            .and_then(|b| b.message.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

#[allow(async_fn_in_trait)]
pub trait ContactApi {
    async fn fetch_token(&self) -> Result<String, ApiError>;
    /// `Err` only when no response arrived at all.
    async fn submit(&self, submission: &ContactSubmission) -> Result<ContactReply, ApiError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Sent,
    MissingFields,
    InvalidEmail,
    TokenNotLoaded,
    Rejected(Option<String>),
    TokenRejected(Option<String>),
    Network,
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::Sent => Severity::Success,
            _ => Severity::Error,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Notice::Sent => "notify.sent",
            Notice::MissingFields => "notify.missing_fields",
            Notice::InvalidEmail => "notify.invalid_email",
            Notice::TokenNotLoaded => "notify.token_missing",
            Notice::Rejected(_) => "notify.rejected",
            Notice::TokenRejected(_) => "notify.token_rejected",
            Notice::Network => "notify.network",
        }
    }

    /// The text to show. A message from the backend wins over the local copy.
    pub fn text<'a>(&'a self, translate: impl FnOnce(&'static str) -> &'a str) -> &'a str {
        match self {
            Notice::Rejected(Some(msg)) | Notice::TokenRejected(Some(msg)) => msg.as_str(),
            _ => translate(self.key()),
        }
    }
}

pub trait FormView {
    fn set_submitting(&self, submitting: bool);
    fn clear_fields(&self);
    fn notify(&self, notice: Notice);
}

/// Keeps the submit control disabled while alive.
struct SubmittingGuard<'a, V: FormView + ?Sized> {
    view: &'a V,
}

impl<'a, V: FormView + ?Sized> SubmittingGuard<'a, V> {
    fn new(view: &'a V) -> Self {
        view.set_submitting(true);
        Self { view }
    }
}

impl<V: FormView + ?Sized> Drop for SubmittingGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_submitting(false);
    }
}

pub struct ContactController<A> {
    api: A,
    token: RefCell<Option<String>>,
    generation: Cell<u64>,
}

impl<A: ContactApi> ContactController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            token: RefCell::new(None),
            generation: Cell::new(0),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Fetches a fresh token. When several fetches overlap, only the one
    /// started last may store its result.
    pub async fn refresh_token(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let result = self.api.fetch_token().await;
        if self.generation.get() != generation {
            log::debug!("Discarding token from superseded fetch");
            return;
        }
        match result {
            Ok(token) => *self.token.borrow_mut() = Some(token),
            Err(e) => log::warn!("Failed to fetch CSRF token: {}", e),
        }
    }

    pub async fn submit<V: FormView + ?Sized>(&self, fields: &ContactFields, view: &V) {
        let Some(token) = self.token.borrow().clone() else {
            view.notify(Notice::TokenNotLoaded);
            return;
        };

        if fields.name.trim().is_empty() || fields.email.trim().is_empty() {
            view.notify(Notice::MissingFields);
            return;
        }
        if !is_valid_email(fields.email.trim()) {
            view.notify(Notice::InvalidEmail);
            return;
        }

        let submission = ContactSubmission::new(fields, token);
        // Held through the token refetch below.
        let _submitting = SubmittingGuard::new(view);
        let refetch = match self.api.submit(&submission).await {
            Ok(reply) if reply.succeeded() => {
                view.notify(Notice::Sent);
                view.clear_fields();
                true
            }
            Ok(reply) if reply.status == 403 => {
                view.notify(Notice::TokenRejected(reply.message()));
                true
            }
            Ok(reply) => {
                log::warn!("Contact submission rejected with status {}", reply.status);
                view.notify(Notice::Rejected(reply.message()));
                false
            }
            Err(e) => {
                log::error!("Contact submission failed: {}", e);
                view.notify(Notice::Network);
                false
            }
        };

        if refetch {
            self.token.borrow_mut().take();
            self.refresh_token().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::collections::VecDeque;

    enum TokenReply {
        Ready(Result<String, ApiError>),
        Later(oneshot::Receiver<Result<String, ApiError>>),
    }

    #[derive(Default)]
    struct FakeApi {
        tokens: RefCell<VecDeque<TokenReply>>,
        replies: RefCell<VecDeque<Result<ContactReply, ApiError>>>,
        fetches: Cell<usize>,
        submitted: RefCell<Vec<ContactSubmission>>,
    }

    impl FakeApi {
        fn with_tokens(tokens: &[&str]) -> Self {
            let api = Self::default();
            for token in tokens {
                api.queue_token(Ok(token.to_string()));
            }
            api
        }

        fn queue_token(&self, result: Result<String, ApiError>) {
            self.tokens.borrow_mut().push_back(TokenReply::Ready(result));
        }

        fn queue_reply(&self, reply: Result<ContactReply, ApiError>) {
            self.replies.borrow_mut().push_back(reply);
        }
    }

    impl ContactApi for FakeApi {
        async fn fetch_token(&self) -> Result<String, ApiError> {
            self.fetches.set(self.fetches.get() + 1);
            let next = self.tokens.borrow_mut().pop_front();
            match next {
                Some(TokenReply::Ready(result)) => result,
                Some(TokenReply::Later(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Transport("cancelled".into()))),
                None => Err(ApiError::Transport("no token queued".into())),
            }
        }

        async fn submit(&self, submission: &ContactSubmission) -> Result<ContactReply, ApiError> {
            self.submitted.borrow_mut().push(submission.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no reply queued".into())))
        }
    }

    #[derive(Default)]
    struct RecordingView {
        submitting: RefCell<Vec<bool>>,
        cleared: Cell<usize>,
        notices: RefCell<Vec<Notice>>,
    }

    impl FormView for RecordingView {
        fn set_submitting(&self, submitting: bool) {
            self.submitting.borrow_mut().push(submitting);
        }
        fn clear_fields(&self) {
            self.cleared.set(self.cleared.get() + 1);
        }
        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    fn reply(status: u16, success: bool, message: Option<&str>) -> Result<ContactReply, ApiError> {
        Ok(ContactReply {
            status,
            body: Some(ContactResponse {
                success,
                message: message.map(str::to_string),
            }),
        })
    }

    fn fields() -> ContactFields {
        ContactFields {
            name: "Ana".into(),
            email: "ana@example.mk".into(),
            message: "We need a route to Skopje".into(),
            ..Default::default()
        }
    }

    fn ready_controller(api: FakeApi) -> ContactController<FakeApi> {
        let ctl = ContactController::new(api);
        block_on(ctl.refresh_token());
        assert!(ctl.has_token());
        ctl
    }

    #[test]
    fn email_format() {
        for ok in ["a@b.co", "first.last@sub.domain.com", "x+tag@estada.dev"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["a@b", "plainaddress", "a@@b.com", "a@b.c", "@b.com", "a b@c.com"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn submitting_without_a_token_never_hits_the_network() {
        let ctl = ContactController::new(FakeApi::default());
        let view = RecordingView::default();

        block_on(ctl.submit(&fields(), &view));

        assert_eq!(*view.notices.borrow(), vec![Notice::TokenNotLoaded]);
        assert!(ctl.api.submitted.borrow().is_empty());
        assert!(view.submitting.borrow().is_empty());
    }

    #[test]
    fn a_failed_token_fetch_is_swallowed() {
        let api = FakeApi::default();
        api.queue_token(Err(ApiError::Status(500)));
        let ctl = ContactController::new(api);

        block_on(ctl.refresh_token());
        assert!(!ctl.has_token());
    }

    #[test]
    fn client_validation_stops_before_sending() {
        let ctl = ready_controller(FakeApi::with_tokens(&["t1"]));
        let view = RecordingView::default();

        let mut no_name = fields();
        no_name.name = "   ".into();
        block_on(ctl.submit(&no_name, &view));

        let mut bad_email = fields();
        bad_email.email = "ana@localhost".into();
        block_on(ctl.submit(&bad_email, &view));

        assert_eq!(
            *view.notices.borrow(),
            vec![Notice::MissingFields, Notice::InvalidEmail]
        );
        assert!(ctl.api.submitted.borrow().is_empty());
        assert!(ctl.has_token());
    }

    #[test]
    fn success_clears_the_form_and_refetches_once() {
        let ctl = ready_controller(FakeApi::with_tokens(&["t1", "t2"]));
        ctl.api.queue_reply(reply(200, true, Some("Message sent successfully!")));
        let view = RecordingView::default();

        block_on(ctl.submit(&fields(), &view));

        assert_eq!(*view.notices.borrow(), vec![Notice::Sent]);
        assert_eq!(view.cleared.get(), 1);
        assert_eq!(*view.submitting.borrow(), vec![true, false]);
        assert_eq!(ctl.api.fetches.get(), 2);
        assert_eq!(ctl.token.borrow().as_deref(), Some("t2"));

        let sent = &ctl.api.submitted.borrow()[0];
        assert_eq!(sent.csrf_token, "t1");
        assert_eq!(sent.service, None);
        assert_eq!(sent.website, None);
    }

    /// Notes how many token fetches had happened when the control came back.
    struct ReleaseWatcher<'a> {
        fetches: &'a Cell<usize>,
        released_after: Cell<Option<usize>>,
    }

    impl FormView for ReleaseWatcher<'_> {
        fn set_submitting(&self, submitting: bool) {
            if !submitting {
                self.released_after.set(Some(self.fetches.get()));
            }
        }
        fn clear_fields(&self) {}
        fn notify(&self, _notice: Notice) {}
    }

    #[test]
    fn control_stays_disabled_until_the_new_token_is_in() {
        for status in [200, 403] {
            let ctl = ready_controller(FakeApi::with_tokens(&["t1", "t2"]));
            ctl.api.queue_reply(reply(status, status == 200, None));
            let view = ReleaseWatcher {
                fetches: &ctl.api.fetches,
                released_after: Cell::new(None),
            };

            block_on(ctl.submit(&fields(), &view));

            assert_eq!(view.released_after.get(), Some(2), "status {status}");
            assert!(ctl.has_token());
        }
    }

    #[test]
    fn forbidden_refetches_once_and_reports_the_backend_message() {
        let ctl = ready_controller(FakeApi::with_tokens(&["stale", "fresh"]));
        ctl.api.queue_reply(reply(403, false, Some("Security validation failed.")));
        let view = RecordingView::default();

        block_on(ctl.submit(&fields(), &view));

        assert_eq!(
            *view.notices.borrow(),
            vec![Notice::TokenRejected(Some("Security validation failed.".into()))]
        );
        assert_eq!(view.cleared.get(), 0);
        assert_eq!(ctl.api.fetches.get(), 2);
        assert_eq!(ctl.token.borrow().as_deref(), Some("fresh"));
    }

    #[test]
    fn other_failures_keep_the_token_and_restore_the_control() {
        let ctl = ready_controller(FakeApi::with_tokens(&["t1"]));
        ctl.api.queue_reply(reply(400, false, Some("Please enter a valid email address.")));
        ctl.api.queue_reply(Ok(ContactReply {
            status: 502,
            body: None,
        }));
        ctl.api.queue_reply(Err(ApiError::Transport("offline".into())));
        let view = RecordingView::default();

        for _ in 0..3 {
            block_on(ctl.submit(&fields(), &view));
        }

        assert_eq!(
            *view.notices.borrow(),
            vec![
                Notice::Rejected(Some("Please enter a valid email address.".into())),
                Notice::Rejected(None),
                Notice::Network,
            ]
        );
        assert_eq!(*view.submitting.borrow(), vec![true, false, true, false, true, false]);
        assert_eq!(ctl.api.fetches.get(), 1);
        assert_eq!(ctl.token.borrow().as_deref(), Some("t1"));
    }

    #[test]
    fn success_flag_false_is_a_failure_even_with_200() {
        let ctl = ready_controller(FakeApi::with_tokens(&["t1"]));
        ctl.api.queue_reply(reply(200, false, None));
        let view = RecordingView::default();

        block_on(ctl.submit(&fields(), &view));
        assert_eq!(*view.notices.borrow(), vec![Notice::Rejected(None)]);
        assert_eq!(view.cleared.get(), 0);
    }

    #[test]
    fn the_most_recent_fetch_wins() {
        let api = FakeApi::default();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        api.tokens.borrow_mut().push_back(TokenReply::Later(first_rx));
        api.tokens.borrow_mut().push_back(TokenReply::Later(second_rx));
        let ctl = ContactController::new(api);

        block_on(async {
            futures::join!(ctl.refresh_token(), async {
                second_tx.send(Ok("second".into())).unwrap();
                ctl.refresh_token().await;
                first_tx.send(Ok("first".into())).unwrap();
            });
        });

        assert_eq!(ctl.api.fetches.get(), 2);
        assert_eq!(ctl.token.borrow().as_deref(), Some("second"));
    }

    #[test]
    fn backend_text_takes_precedence() {
        let rejected = Notice::Rejected(Some("Nope".into()));
        assert_eq!(rejected.text(|key| key), "Nope");
        assert_eq!(Notice::Rejected(None).text(|key| key), "notify.rejected");
        assert_eq!(Notice::Network.text(|key| key), "notify.network");
        assert_eq!(Notice::Sent.severity(), Severity::Success);
        assert_eq!(Notice::InvalidEmail.severity(), Severity::Error);
    }

    #[test]
    fn submission_serializes_the_wire_shape() {
        let mut f = fields();
        f.service = "Freight".into();
        let json = serde_json::to_value(ContactSubmission::new(&f, "tok".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ana",
                "email": "ana@example.mk",
                "service": "Freight",
                "message": "We need a route to Skopje",
                "csrf_token": "tok"
            })
        );
    }
}
