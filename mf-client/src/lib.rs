//! A client for the DreamCloud monitoring framework.
//!
//! The monitoring framework is a web service storing workflows, experiments,
//! deployment plans and metric data. This crate accesses its REST API, rooted at
//! `{base_url}/v1/dreamcloud/mf`, with two clients:
//!
//! * [`Publisher`] registers workflows and deployment plans and sends metric data.
//! * [`Reader`] retrieves workflows, profiles, progress, runtimes and statistics.
//!
//! Both check on construction that the service is reachable and fail with
//! [`MfError::Unreachable`] otherwise. A response with a status other than `200`
//! results in [`MfError::Remote`], carrying the status and the body sent by the
//! server.
//!
//! ```no_run
//! use anyhow::Result;
//! use mf_client::{DeploymentPlan, MetricReading, MfClientConfig, Node, Publisher, Reader};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     env_logger::init();
//!
//!     let config = MfClientConfig::default().base_url("http://localhost:3030");
//!     let publisher = Publisher::new(&config)?
//!         .with_host("node01")
//!         .with_platform("hpc");
//!
//!     // Register a workflow; the server creates an experiment for it
//!     let experiment_id = publisher.register_experiment(
//!         "rm_stream",
//!         &json!({"description": "Streaming application", "author": "Raj Patel"}),
//!     )?;
//!
//!     // Deployment plan of a task
//!     let plan = DeploymentPlan {
//!         estimated_time: 217,
//!         node: Node { id: "hpc_node".to_string(), cpus: vec![] },
//!     };
//!     publisher.add_deployment_plan("rm_stream", "task1", "hpc", &experiment_id, &plan)?;
//!
//!     // Metric data, host and platform are added by the publisher
//!     let reading = MetricReading::now().value("energy", 120);
//!     publisher.send_metric("rm_stream", &experiment_id, &reading, Some("task1"))?;
//!
//!     let reader = Reader::new(&config)?;
//!     println!("{}", reader.get_profile("rm_stream", "task1", &experiment_id)?);
//!     Ok(())
//! }
//! ```
mod client;
mod config;
mod context;
pub mod dummy;
mod error;
mod payload;
mod publisher;
mod reader;
mod transport;
pub mod url;
pub use client::BaseClient;
pub use config::MfClientConfig;
pub use context::RequestContext;
pub use error::{MfError, MfResult};
pub use payload::{Core, Cpu, DeploymentPlan, MetricReading, Node, TIMESTAMP_FORMAT};
pub use publisher::Publisher;
pub use reader::Reader;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
pub use url::join_url_segments;
