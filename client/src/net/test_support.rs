//! Test doubles shared by the networking tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::http::{ApiError, HttpClient, HttpRequest, HttpResponse, Transport};
use crate::router::navigator::MemoryNavigator;
use crate::state::credential::{Credentials, MemoryStore};

pub(crate) const TEST_ORIGIN: &str = "http://localhost:5173";

/// Replays queued results and records every request it was handed.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, ApiError>>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        self
    }

    pub(crate) fn fail(&self, error: ApiError) -> &Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub(crate) fn last_sent(&self) -> HttpRequest {
        self.sent.borrow().last().cloned().expect("no request was sent")
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse { status: 200, body: "{}".to_owned() }))
    }
}

/// Everything an authenticated client test needs to poke at.
pub(crate) struct Harness {
    pub(crate) transport: MockTransport,
    pub(crate) store: MemoryStore,
    pub(crate) credentials: Credentials,
    pub(crate) navigator: Rc<MemoryNavigator>,
    pub(crate) client: HttpClient<MockTransport>,
}

/// Authenticated client over a mock transport, an in-memory store, and an
/// unguarded in-memory navigator sitting at `current_path`.
pub(crate) fn harness(current_path: &str) -> Harness {
    let transport = MockTransport::default();
    let store = MemoryStore::new();
    let credentials = Credentials::new(Rc::new(store.clone()));
    let navigator = Rc::new(MemoryNavigator::new(current_path));
    let client = HttpClient::authenticated(
        transport.clone(),
        "",
        credentials.clone(),
        Rc::clone(&navigator) as Rc<dyn crate::router::navigator::Navigator>,
        TEST_ORIGIN,
    );
    Harness { transport, store, credentials, navigator, client }
}
