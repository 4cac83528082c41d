use crate::{
    client::{handle_response, BaseClient},
    config::MfClientConfig,
    context::{to_object, RequestContext},
    error::{MfError, MfResult},
    transport::{ReqwestTransport, Transport},
    url::{normalize_id, ALL_TASKS, DEPLOYMENTS, METRICS, WORKFLOWS},
};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// Sends workflows, deployment plans and metric data to the monitoring framework.
///
/// Payloads are borrowed. What is sent is a copy of the payload, extended with
/// the workflow ID on registration and with the [`RequestContext`] on metric
/// submission.
pub struct Publisher<T = ReqwestTransport> {
    client: BaseClient<T>,
}

impl Publisher<ReqwestTransport> {
    /// Connects to the monitoring framework.
    pub fn new(config: &MfClientConfig) -> MfResult<Self> {
        Ok(Self::from_client(BaseClient::new(config)?))
    }
}

impl<T: Transport> Publisher<T> {
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

    /// See [`BaseClient::set_host()`].
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.client.set_host(host);
    }

    /// See [`BaseClient::set_platform()`].
    pub fn set_platform(&mut self, platform: impl Into<String>) {
        self.client.set_platform(platform);
    }

    /// Returns this publisher with the host identifier replaced.
    pub fn with_host(self, host: impl Into<String>) -> Self {
        Self::from_client(self.client.with_host(host))
    }

    /// Returns this publisher with the platform identifier replaced.
    pub fn with_platform(self, platform: impl Into<String>) -> Self {
        Self::from_client(self.client.with_platform(platform))
    }

    /// Returns this publisher with the whole context replaced.
    pub fn with_context(self, context: RequestContext) -> Self {
        Self::from_client(self.client.with_context(context))
    }

    /// Registers a workflow and creates a new experiment for it.
    ///
    /// The lower-cased workflow ID is stored in the `wf_id` field of the
    /// payload. If the workflow already exists, the server overrides it with
    /// the given data. The payload is neither parsed nor checked.
    ///
    /// Returns the experiment ID assigned by the server.
    pub fn register_experiment(
        &self,
        workflow_id: impl AsRef<str>,
        data: &impl Serialize,
    ) -> MfResult<String> {
        debug!("register workflow and create experiment ...");
        let workflow_id = normalize_id(workflow_id);
        let mut data = to_object(data)?;
        data.insert("wf_id".to_string(), Value::String(workflow_id.clone()));

        let url = self.client.endpoint(&[WORKFLOWS]);
        let body = handle_response(self.client.put(url, Value::Object(data))?)?;
        info!("[ workflow_id: {} ]", workflow_id);

        let experiment_id = body
            .get("experiment")
            .and_then(|e| e.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| MfError::UnexpectedResponse(format!("no experiment.id in {}", body)))?
            .to_string();
        info!("[ experiment_id: {} ]", experiment_id);
        Ok(experiment_id)
    }

    /// Adds a deployment plan of a task to an experiment.
    ///
    /// Workflow ID, task ID and platform are lower-cased; the experiment ID is
    /// used as given. Returns the reference of the stored plan.
    pub fn add_deployment_plan(
        &self,
        workflow_id: impl AsRef<str>,
        task_id: impl AsRef<str>,
        platform: impl AsRef<str>,
        experiment_id: impl AsRef<str>,
        data: &impl Serialize,
    ) -> MfResult<String> {
        debug!("add new deployment plan ...");
        let url = self.client.endpoint(&[
            DEPLOYMENTS,
            normalize_id(workflow_id).as_str(),
            normalize_id(task_id).as_str(),
            normalize_id(platform).as_str(),
            experiment_id.as_ref(),
        ]);
        debug!("{}", url);

        let data = to_object(data)?;
        let body = handle_response(self.client.put(url, Value::Object(data))?)?;
        let href = body
            .get("href")
            .and_then(Value::as_str)
            .ok_or_else(|| MfError::UnexpectedResponse(format!("no href in {}", body)))?
            .to_string();
        info!("[ deployment: {} ]", href);
        Ok(href)
    }

    /// Sends one metric reading.
    ///
    /// Without `task_id`, the reading is bound to all tasks of the experiment
    /// (`?task=_all`). Host and platform of the current context are merged into
    /// the sent copy of `data`.
    ///
    /// Returns the ID the server assigned to the reading, i.e., the key of the
    /// single-entry object the server answers with. Should the answer hold more
    /// than one entry, the smallest key in lexicographic order is taken, not the
    /// first one on the wire.
    pub fn send_metric(
        &self,
        workflow_id: impl AsRef<str>,
        experiment_id: impl AsRef<str>,
        data: &impl Serialize,
        task_id: Option<&str>,
    ) -> MfResult<String> {
        debug!("send metric data ...");
        let task_id = task_id.map_or_else(|| ALL_TASKS.to_string(), normalize_id);
        let mut url = self.client.endpoint(&[
            METRICS,
            normalize_id(workflow_id).as_str(),
            experiment_id.as_ref(),
        ]);
        url.query_pairs_mut().append_pair("task", &task_id);

        let data = self.client.context().extend(&to_object(data)?);
        let body = handle_response(self.client.post(url, Value::Object(data))?)?;

        let (metric_id, entry) = body
            .as_object()
            .and_then(|m| m.iter().next())
            .ok_or_else(|| MfError::UnexpectedResponse(format!("no metric in {}", body)))?;
        match entry.get("href").and_then(Value::as_str) {
            Some(href) => info!("[ profile: {} ]", href),
            None => info!("[ profile: {} ]", metric_id),
        }
        Ok(metric_id.clone())
    }

    /// Sends a sequence of metric readings in one request.
    ///
    /// Every reading is extended with the current context. Returns the
    /// references reported by the server, one per stored reading.
    pub fn send_metrics_bulk<P: Serialize>(&self, readings: &[P]) -> MfResult<Vec<String>> {
        debug!("send metric data as a bulk query...");
        let context = self.client.context();
        let data = readings
            .iter()
            .map(|r| -> MfResult<Value> { Ok(Value::Object(context.extend(&to_object(r)?))) })
            .collect::<MfResult<Vec<_>>>()?;

        let url = self.client.endpoint(&[METRICS]);
        let body = handle_response(self.client.post(url, Value::Array(data))?)?;

        let refs = match body {
            Value::Array(elements) => elements.into_iter().map(into_ref).collect::<Vec<_>>(),
            other => {
                return Err(MfError::UnexpectedResponse(format!(
                    "expected an array, got {}",
                    other
                )))
            }
        };
        for r in refs.iter() {
            info!("[ profile: {} ]", r);
        }
        Ok(refs)
    }
}

fn into_ref(element: Value) -> String {
    match element {
        Value::String(s) => s,
        other => match other.get("href").and_then(Value::as_str) {
            Some(href) => href.to_string(),
            None => other.to_string(),
        },
    }
}
