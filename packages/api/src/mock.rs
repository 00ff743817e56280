//! In-memory [`Transport`] that records requests and replays canned responses.
//!
//! Responses are matched on `(method, path)`. A route can hold a queue of
//! responses; the last one is repeated once the queue drains. Unmatched
//! requests get a 404 with a JSON error body.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::client::{Method, Request, Response, Transport};
use crate::error::ApiError;

#[derive(Clone, Debug)]
enum Reply {
    Respond(Response),
    Fail(String),
}

#[derive(Debug, Default)]
struct State {
    routes: HashMap<(Method, String), VecDeque<Reply>>,
    requests: Vec<Request>,
}

#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.lock()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON response for `method path`.
    pub fn respond<B: Serialize>(&self, method: Method, path: &str, status: u16, body: &B) -> &Self {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.push(method, path, Reply::Respond(Response { status, body }));
        self
    }

    /// Queue a raw response body.
    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(
            method,
            path,
            Reply::Respond(Response {
                status,
                body: body.as_bytes().to_vec(),
            }),
        );
        self
    }

    /// Queue a transport failure (no HTTP response).
    pub fn fail(&self, method: Method, path: &str, detail: &str) -> &Self {
        self.push(method, path, Reply::Fail(detail.to_string()));
        self
    }

    /// All requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// Requests sent with the given method.
    pub fn requests_with(&self, method: Method) -> Vec<Request> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let mut state = self.lock();
        let key = (request.method, request.path.clone());
        state.requests.push(request);

        let reply = match state.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(detail)) => Err(ApiError::Network(detail)),
            None => Ok(Response {
                status: 404,
                body: br#"{"status":"error","message":"Not found"}"#.to_vec(),
            }),
        }
    }
}
