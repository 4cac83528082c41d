//! Queries the monitoring framework and prints the answer as JSON.
//!
//! ```bash
//! cargo run --example exploring -- --url http://localhost:3030 profile rm_stream task1 <experiment_id>
//! ```
use anyhow::Result;
use clap::{Parser, Subcommand};
use mf_client::{MfClientConfig, Reader};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the monitoring framework
    #[arg(short, long)]
    url: Option<String>,

    /// YAML file with the client configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    query: Query,
}

#[derive(Subcommand)]
enum Query {
    /// All registered workflows
    Workflows {
        #[arg(short, long, default_value_t = false)]
        details: bool,
    },

    /// Experiments of a workflow
    Workflow { workflow_id: String },

    /// Available profiles of a workflow, optionally of a single task
    Profiles {
        workflow_id: String,
        task_id: Option<String>,
    },

    /// Progress of an experiment
    Progress {
        workflow_id: String,
        task_id: String,
        experiment_id: String,
    },

    /// Profile of an experiment
    Profile {
        workflow_id: String,
        task_id: String,
        experiment_id: String,
    },

    /// Runtime of a task in an experiment
    Runtime {
        workflow_id: String,
        task_id: String,
        experiment_id: String,
    },

    /// Runtime of a whole experiment
    TotalRuntime {
        workflow_id: String,
        experiment_id: String,
    },

    /// Statistics of a metric over a workflow
    Statistics { workflow_id: String, metric: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let mut config = match &args.config {
        Some(path) => MfClientConfig::load(path)?,
        None => MfClientConfig::default(),
    };
    if let Some(url) = &args.url {
        config = config.base_url(url.as_str());
    }
    let reader = Reader::new(&config)?;

    let value = match &args.query {
        Query::Workflows { details } => reader.get_workflows(*details),
        Query::Workflow { workflow_id } => reader.get_workflow(workflow_id),
        Query::Profiles {
            workflow_id,
            task_id,
        } => reader.get_profiles(workflow_id, task_id.as_deref()),
        Query::Progress {
            workflow_id,
            task_id,
            experiment_id,
        } => reader.get_progress(workflow_id, task_id, experiment_id),
        Query::Profile {
            workflow_id,
            task_id,
            experiment_id,
        } => reader.get_profile(workflow_id, task_id, experiment_id),
        Query::Runtime {
            workflow_id,
            task_id,
            experiment_id,
        } => reader.get_runtime(workflow_id, task_id, experiment_id),
        Query::TotalRuntime {
            workflow_id,
            experiment_id,
        } => reader.get_total_runtime(workflow_id, experiment_id),
        Query::Statistics {
            workflow_id,
            metric,
        } => reader.get_statistics(workflow_id, metric),
    };

    // Exit with the server's answer on error
    match value {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
