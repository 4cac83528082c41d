//! Registers an experiment, adds deployment plans for two tasks and sends
//! synthetic metric data for each of them.
//!
//! ```bash
//! cargo run --example profiling -- --url http://localhost:3030
//! ```
use anyhow::Result;
use clap::Parser;
use mf_client::{Core, Cpu, DeploymentPlan, MetricReading, MfClientConfig, MfError, Node, Publisher};
use serde::Serialize;
use std::{thread::sleep, time::Duration};

const WORKFLOW_ID: &str = "rm_stream";
const TASK_IDS: [&str; 2] = ["task1", "task2"];
const PLATFORMS: [&str; 2] = ["embedded", "hpc"];
const N_READINGS: usize = 10;

#[derive(Debug, Serialize)]
struct Task {
    name: String,
    exec: String,
    cores_nr: String,
}

#[derive(Debug, Serialize)]
struct Workflow {
    description: String,
    optimization: String,
    author: String,
    tasks: Vec<Task>,
}

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the monitoring framework
    #[arg(short, long)]
    url: Option<String>,

    /// YAML file with the client configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Host identifier attached to metric data, the machine's hostname by default
    #[arg(long)]
    host: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn workflow() -> Workflow {
    Workflow {
        description: "Streaming application".to_string(),
        optimization: "Time".to_string(),
        author: "Raj Patel".to_string(),
        tasks: vec![
            Task {
                name: "task1".to_string(),
                exec: "/home/ubuntu/task1.sh".to_string(),
                cores_nr: "1-2".to_string(),
            },
            Task {
                name: "task2".to_string(),
                exec: "/home/ubuntu/task2.sh".to_string(),
                cores_nr: "1-4".to_string(),
            },
        ],
    }
}

fn deployment_plan(pw_modes: &[u32]) -> DeploymentPlan {
    let cores = pw_modes
        .iter()
        .enumerate()
        .map(|(i, &pw_mode)| Core {
            id: format!("core{}", i),
            pw_mode,
        })
        .collect();
    DeploymentPlan {
        estimated_time: 217,
        node: Node {
            id: "embedded_device".to_string(),
            cpus: vec![Cpu {
                id: "cpu0".to_string(),
                cores,
            }],
        },
    }
}

fn send_metric_data(
    publisher: &mut Publisher,
    experiment_id: &str,
    task_id: &str,
    platform: &str,
    host: &str,
) -> Result<()> {
    publisher.set_host(host);
    publisher.set_platform(platform);

    for _ in 0..N_READINGS {
        let reading = MetricReading::now()
            .value("energy", fastrand::u32(40..=140))
            .value("execution_time", fastrand::u32(10..=90));
        publisher.send_metric(WORKFLOW_ID, experiment_id, &reading, Some(task_id))?;
        sleep(Duration::from_secs(1));
    }
    Ok(())
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
    let host = args.host.clone().unwrap_or_else(|| {
        hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "localhost".to_string())
    });

    // Fail fast when the service cannot be reached
    let mut publisher = match Publisher::new(&config) {
        Ok(publisher) => publisher,
        Err(e @ MfError::Unreachable { .. }) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let experiment_id = publisher.register_experiment(WORKFLOW_ID, &workflow())?;

    publisher.add_deployment_plan(
        WORKFLOW_ID,
        TASK_IDS[0],
        PLATFORMS[0],
        &experiment_id,
        &deployment_plan(&[100, 100]),
    )?;
    publisher.add_deployment_plan(
        WORKFLOW_ID,
        TASK_IDS[1],
        PLATFORMS[1],
        &experiment_id,
        &deployment_plan(&[100, 100, 50, 50]),
    )?;

    for (task_id, platform) in TASK_IDS.iter().zip(PLATFORMS.iter()) {
        send_metric_data(&mut publisher, &experiment_id, task_id, platform, &host)?;
    }

    Ok(())
}
