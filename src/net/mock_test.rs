//! In-memory `Transport` for tests: scripted responses, recorded requests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{ApiClient, ApiError, ApiRequest, RawResponse, Transport};

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, ApiError>>>,
    routes: Mutex<Vec<(String, Result<RawResponse, String>)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Queue a response; queued responses are served in order.
    pub fn reply(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse { status, reason: None, body: body.to_string() }));
        self
    }

    /// Queue a transport failure.
    pub fn fail(self, err: ApiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    /// Answer every request for `path` with `body`, regardless of order.
    /// Routing the same path again replaces the earlier answer.
    pub fn route(self, path: &str, status: u16, body: Value) -> Self {
        self.set_route(path, Ok(RawResponse { status, reason: None, body: body.to_string() }))
    }

    /// Fail every request for `path` with a transport error.
    pub fn route_fail(self, path: &str) -> Self {
        self.set_route(path, Err(format!("{path} unreachable")))
    }

    fn set_route(self, path: &str, answer: Result<RawResponse, String>) -> Self {
        {
            let mut routes = self.routes.lock().unwrap();
            routes.retain(|(p, _)| p != path);
            routes.push((path.to_owned(), answer));
        }
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    pub fn into_client(self) -> (ApiClient, Arc<Self>) {
        let mock = Arc::new(self);
        (ApiClient::with_transport(mock.clone()), mock)
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);
        let routed = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, r)| r.clone());
        if let Some(routed) = routed {
            return routed.map_err(ApiError::Request);
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::ok("")))
    }
}
