use crate::{
    client::{handle_response, BaseClient},
    config::MfClientConfig,
    error::MfResult,
    transport::{ReqwestTransport, Transport},
    url::{PROFILES, PROGRESS, RUNTIME, STATISTICS, WORKFLOWS},
};
use log::debug;
use reqwest::Url;
use serde_json::Value;

/// Retrieves workflows, profiles and statistics from the monitoring framework.
///
/// Every method issues a single GET and returns the parsed body of a `200`
/// response. Any other status results in [`MfError::Remote`](crate::MfError::Remote)
/// carrying the status and the body sent by the server.
///
/// Identifiers are used in the path as given, percent-encoded where needed.
pub struct Reader<T = ReqwestTransport> {
    client: BaseClient<T>,
}

impl Reader<ReqwestTransport> {
    /// Connects to the monitoring framework.
    pub fn new(config: &MfClientConfig) -> MfResult<Self> {
        Ok(Self::from_client(BaseClient::new(config)?))
    }
}

impl<T: Transport> Reader<T> {
    /// Connects to the monitoring framework using the given transport.
    pub fn with_transport(config: &MfClientConfig, transport: T) -> MfResult<Self> {
        Ok(Self::from_client(BaseClient::with_transport(config, transport)?))
    }

    /// Wraps an already connected [`BaseClient`].
    pub fn from_client(client: BaseClient<T>) -> Self {
        Self { client }
    }

    /// Underlying connection.
    pub fn client(&self) -> &BaseClient<T> {
        &self.client
    }

    fn handle_request(&self, url: Url) -> MfResult<Value> {
        handle_response(self.client.get(url)?)
    }

    /// `GET /workflows`, with `?details` when `details` is true.
    pub fn get_workflows(&self, details: bool) -> MfResult<Value> {
        debug!("get all registered workflows ...");
        let mut url = self.client.endpoint(&[WORKFLOWS]);
        if details {
            url.set_query(Some("details"));
        }
        self.handle_request(url)
    }

    /// `GET /workflows/{workflow_id}`
    pub fn get_workflow(&self, workflow_id: &str) -> MfResult<Value> {
        debug!("get all experiments for workflow \"{}\" ...", workflow_id);
        self.handle_request(self.client.endpoint(&[WORKFLOWS, workflow_id]))
    }

    /// `GET /profiles/{workflow_id}[/{task_id}]`
    pub fn get_profiles(&self, workflow_id: &str, task_id: Option<&str>) -> MfResult<Value> {
        debug!("get all available profiles for \"{}\" ...", workflow_id);
        let url = match task_id {
            Some(task_id) => self.client.endpoint(&[PROFILES, workflow_id, task_id]),
            None => self.client.endpoint(&[PROFILES, workflow_id]),
        };
        self.handle_request(url)
    }

    /// `GET /progress/{workflow_id}/{task_id}/{experiment_id}`
    pub fn get_progress(
        &self,
        workflow_id: &str,
        task_id: &str,
        experiment_id: &str,
    ) -> MfResult<Value> {
        debug!("get progress for experiment \"{}\" ...", experiment_id);
        self.handle_request(self.client.endpoint(&[
            PROGRESS,
            workflow_id,
            task_id,
            experiment_id,
        ]))
    }

    /// `GET /profiles/{workflow_id}/{task_id}/{experiment_id}`
    pub fn get_profile(
        &self,
        workflow_id: &str,
        task_id: &str,
        experiment_id: &str,
    ) -> MfResult<Value> {
        debug!("get profile for experiment \"{}\" ...", experiment_id);
        self.handle_request(self.client.endpoint(&[
            PROFILES,
            workflow_id,
            task_id,
            experiment_id,
        ]))
    }

    /// `GET /runtime/{workflow_id}/{task_id}/{experiment_id}`
    pub fn get_runtime(
        &self,
        workflow_id: &str,
        task_id: &str,
        experiment_id: &str,
    ) -> MfResult<Value> {
        debug!("get runtime for experiment \"{}\" ...", experiment_id);
        self.handle_request(self.client.endpoint(&[
            RUNTIME,
            workflow_id,
            task_id,
            experiment_id,
        ]))
    }

    /// `GET /runtime/{workflow_id}/{experiment_id}`
    pub fn get_total_runtime(&self, workflow_id: &str, experiment_id: &str) -> MfResult<Value> {
        debug!("get total runtime for experiment \"{}\" ...", experiment_id);
        self.handle_request(self.client.endpoint(&[RUNTIME, workflow_id, experiment_id]))
    }

    /// `GET /statistics/{workflow_id}?metric={metric}`
    pub fn get_statistics(&self, workflow_id: &str, metric: &str) -> MfResult<Value> {
        debug!(
            "get statistics for workflow \"{}\" and metric \"{}\"",
            workflow_id, metric
        );
        let mut url = self.client.endpoint(&[STATISTICS, workflow_id]);
        url.query_pairs_mut().append_pair("metric", metric);
        self.handle_request(url)
    }
}
