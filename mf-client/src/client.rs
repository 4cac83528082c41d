use crate::{
    config::MfClientConfig,
    context::RequestContext,
    error::{MfError, MfResult},
    transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport},
    url::{join_url_segments, API_PREFIX},
};
use log::{debug, info};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

/// Connection to the monitoring framework shared by [`Publisher`](crate::Publisher)
/// and [`Reader`](crate::Reader).
///
/// Holds the effective endpoint root, i.e., the base URL followed by
/// `v1/dreamcloud/mf`, and the [`RequestContext`] attached to metric data.
pub struct BaseClient<T = ReqwestTransport> {
    transport: T,

    /// Base URL with the API prefix.
    url: Url,

    /// Current host and platform.
    context: RequestContext,
}

impl BaseClient<ReqwestTransport> {
    /// Connects to the monitoring framework described by `config`.
    ///
    /// See [`BaseClient::with_transport()`].
    pub fn new(config: &MfClientConfig) -> MfResult<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> BaseClient<T> {
    /// Connects to the monitoring framework using the given transport.
    ///
    /// A single GET is sent to the effective URL. Any response, whatever its
    /// status, means the service is reachable. If the request itself fails,
    /// [`MfError::Unreachable`] is returned. The check is not retried.
    ///
    /// A base URL that cannot carry path segments, e.g. `mailto:x`, is
    /// rejected with [`MfError::InvalidUrl`] before anything is sent.
    pub fn with_transport(config: &MfClientConfig, transport: T) -> MfResult<Self> {
        let url = join_url_segments(&[config.base_url.as_str(), API_PREFIX]);
        let url = match Url::parse(&url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            Ok(_) => return Err(MfError::InvalidUrl(url)),
            Err(e) => return Err(MfError::InvalidUrl(format!("{}: {}", url, e))),
        };
        let client = Self {
            transport,
            url,
            context: config.context(),
        };
        client.check_url()?;
        Ok(client)
    }

    fn check_url(&self) -> MfResult<()> {
        debug!("check url ...");
        info!("[ url: {} ]", self.url);
        let request = ApiRequest {
            method: Method::GET,
            url: self.url.to_string(),
            body: None,
        };
        match self.transport.send(request) {
            Ok(_) => Ok(()),
            Err(source) => Err(MfError::Unreachable {
                url: self.url.to_string(),
                source,
            }),
        }
    }

    /// Effective endpoint root.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Current request context.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sets the host identifier attached to subsequent metric data.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.context.host = Some(host.into());
    }

    /// Sets the platform identifier attached to subsequent metric data.
    pub fn set_platform(&mut self, platform: impl Into<String>) {
        self.context.platform = Some(platform.into());
    }

    /// Returns this client with the host identifier replaced.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.set_host(host);
        self
    }

    /// Returns this client with the platform identifier replaced.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.set_platform(platform);
        self
    }

    /// Returns this client with the whole context replaced.
    pub fn with_context(self, context: RequestContext) -> Self {
        Self { context, ..self }
    }

    /// Appends `segments` to the effective endpoint root.
    ///
    /// Trailing slashes are removed from every segment as in
    /// [`join_url_segments`]; what remains is percent-encoded, so a `/`, `?` or
    /// `#` inside an identifier stays part of its segment.
    pub(crate) fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.url.clone();
        // Never fails: cannot-be-a-base URLs are rejected on construction
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.iter().map(|s| s.as_ref().trim_end_matches('/')));
        }
        url
    }

    pub(crate) fn get(&self, url: Url) -> MfResult<ApiResponse> {
        let request = ApiRequest {
            method: Method::GET,
            url: url.into(),
            body: None,
        };
        Ok(self.transport.send(request)?)
    }

    pub(crate) fn put(&self, url: Url, body: Value) -> MfResult<ApiResponse> {
        let request = ApiRequest {
            method: Method::PUT,
            url: url.into(),
            body: Some(body),
        };
        Ok(self.transport.send(request)?)
    }

    pub(crate) fn post(&self, url: Url, body: Value) -> MfResult<ApiResponse> {
        let request = ApiRequest {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
        };
        Ok(self.transport.send(request)?)
    }
}

/// Returns the parsed body of a 200 response, [`MfError::Remote`] otherwise.
pub(crate) fn handle_response(resp: ApiResponse) -> MfResult<Value> {
    let body = resp.json_body();
    if resp.status == StatusCode::OK {
        Ok(body)
    } else {
        Err(MfError::Remote {
            status: resp.status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::DummyTransport;
    use serde_json::json;

    fn config() -> MfClientConfig {
        MfClientConfig::default().base_url("http://localhost:3030/")
    }

    #[test]
    fn test_check_on_construction() -> MfResult<()> {
        let client = BaseClient::with_transport(&config(), DummyTransport::new())?;
        assert_eq!(client.url(), "http://localhost:3030/v1/dreamcloud/mf");

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].url, "http://localhost:3030/v1/dreamcloud/mf");
        assert_eq!(requests[0].body, None);
        Ok(())
    }

    #[test]
    fn test_check_accepts_any_status() {
        let transport = DummyTransport::new().respond(404, json!({"error": "not found"}));
        assert!(BaseClient::with_transport(&config(), transport).is_ok());
    }

    #[test]
    fn test_check_transport_failure() {
        let transport = DummyTransport::new().fail();
        match BaseClient::with_transport(&config(), transport) {
            Err(MfError::Unreachable { url, .. }) => {
                assert_eq!(url, "http://localhost:3030/v1/dreamcloud/mf")
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("connecting should fail"),
        }
    }

    #[test]
    fn test_context_mutators() -> MfResult<()> {
        let mut client = BaseClient::with_transport(&config().host("a"), DummyTransport::new())?;
        assert_eq!(client.context().host.as_deref(), Some("a"));

        client.set_host("b");
        client.set_platform("hpc");
        assert_eq!(
            client.context(),
            &RequestContext::default().host("b").platform("hpc")
        );

        let client = client.with_context(RequestContext::default()).with_platform("embedded");
        assert_eq!(client.context().host, None);
        assert_eq!(client.context().platform.as_deref(), Some("embedded"));
        Ok(())
    }

    #[test]
    fn test_endpoint() -> MfResult<()> {
        let client = BaseClient::with_transport(&config(), DummyTransport::new())?;
        assert_eq!(
            client.endpoint(&["runtime", "wf/", "exp"]).as_str(),
            "http://localhost:3030/v1/dreamcloud/mf/runtime/wf/exp"
        );
        Ok(())
    }

    #[test]
    fn test_endpoint_encodes_reserved_characters() -> MfResult<()> {
        let client = BaseClient::with_transport(&config(), DummyTransport::new())?;
        let url = client.endpoint(&["metrics", "a b", "exp?x#y", "c/d"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:3030/v1/dreamcloud/mf/metrics/a%20b/exp%3Fx%23y/c%2Fd"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        Ok(())
    }

    #[test]
    fn test_invalid_base_url() {
        for base_url in ["not a url", "mailto:someone"].iter() {
            let config = MfClientConfig::default().base_url(*base_url);
            match BaseClient::with_transport(&config, DummyTransport::new()) {
                Err(MfError::InvalidUrl(_)) => {}
                Err(e) => panic!("unexpected error: {}", e),
                Ok(_) => panic!("{} should be rejected", base_url),
            }
        }
    }

    #[test]
    fn test_handle_response() {
        let ok = ApiResponse::json(StatusCode::OK, &json!({"a": 1}));
        assert_eq!(handle_response(ok).unwrap(), json!({"a": 1}));

        let created = ApiResponse::json(StatusCode::CREATED, &json!({"a": 1}));
        let err = handle_response(created).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::CREATED));
        assert_eq!(err.body(), Some(&json!({"a": 1})));
    }
}
