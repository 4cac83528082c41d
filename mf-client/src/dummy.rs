//! This module is used for tests.
use crate::transport::{ApiRequest, ApiResponse, Transport};
use reqwest::{blocking::Client, StatusCode};
use serde_json::{json, Value};
use std::{cell::RefCell, collections::VecDeque};

enum Reply {
    Response(ApiResponse),
    Unreachable,
}

/// Transport recording every request and replaying queued responses.
///
/// When the queue is empty, `200 {}` is returned.
#[derive(Default)]
pub struct DummyTransport {
    requests: RefCell<Vec<ApiRequest>>,
    replies: RefCell<VecDeque<Reply>>,
}

impl DummyTransport {
    /// Creates a transport with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and JSON body.
    pub fn respond(self, status: u16, body: Value) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.replies
            .borrow_mut()
            .push_back(Reply::Response(ApiResponse::json(status, &body)));
        self
    }

    /// Queues a response with a non-JSON body.
    pub fn respond_text(self, status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.replies.borrow_mut().push_back(Reply::Response(ApiResponse {
            status,
            body: body.into(),
        }));
        self
    }

    /// Queues a transport failure.
    pub fn fail(self) -> Self {
        self.replies.borrow_mut().push_back(Reply::Unreachable);
        self
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// The last request sent.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for DummyTransport {
    fn send(&self, request: ApiRequest) -> reqwest::Result<ApiResponse> {
        self.requests.borrow_mut().push(request);
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::Unreachable) => Err(transport_error()),
            None => Ok(ApiResponse::json(StatusCode::OK, &json!({}))),
        }
    }
}

// A request without a host never leaves the builder, which gives a real
// `reqwest::Error` without touching the network.
fn transport_error() -> reqwest::Error {
    match Client::new().get("http://").build() {
        Err(e) => e,
        Ok(_) => panic!("request to an empty host was accepted"),
    }
}
