//! HTTP exchange used by the clients.
use reqwest::{
    blocking::{Client, Request},
    header::{ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use serde_json::Value;

/// A request to the monitoring framework.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,

    /// Absolute URL including the query string.
    pub url: String,

    /// JSON body, if any.
    pub body: Option<Value>,
}

/// A response from the monitoring framework.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,

    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Constructs a response from a status and a JSON value.
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// Parses the body as JSON.
    ///
    /// A body that is not valid JSON is returned as a JSON string, so that
    /// error messages sent as plain text are kept.
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

/// Performs a single request/response exchange.
///
/// [`ReqwestTransport`] talks to a real server. Tests use
/// [`DummyTransport`](crate::dummy::DummyTransport).
pub trait Transport {
    /// Sends `request` and waits for the full response.
    fn send(&self, request: ApiRequest) -> reqwest::Result<ApiResponse>;
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: ApiRequest) -> reqwest::Result<ApiResponse> {
        (**self).send(request)
    }
}

/// Blocking HTTP transport based on [`reqwest`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default [`Client`].
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Turns `request` into a [`Request`] without sending it.
    ///
    /// Requests with a body carry `Content-Type: application/json` and
    /// `Accept: text/plain`.
    pub fn build(&self, request: ApiRequest) -> reqwest::Result<Request> {
        let mut builder = self.client.request(request.method, &request.url);
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "text/plain")
                .body(body.to_string());
        }
        builder.build()
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: ApiRequest) -> reqwest::Result<ApiResponse> {
        let resp = self.client.execute(self.build(request)?)?;
        let status = resp.status();
        let body = resp.text()?;
        Ok(ApiResponse { status, body })
    }
}
