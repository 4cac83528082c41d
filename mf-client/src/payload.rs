//! Typed payloads accepted by [`Publisher`](crate::Publisher).
//!
//! The monitoring framework stores whatever JSON object it receives, so the
//! publisher accepts any [`Serialize`] value. The types here cover the shapes
//! used in practice.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Format of the `@timestamp` field of metric data.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A processor core and its power mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Core {
    pub id: String,

    #[serde(rename = "pwMode")]
    pub pw_mode: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    pub id: String,
    pub cores: Vec<Core>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub cpus: Vec<Cpu>,
}

/// Hardware a task is scheduled onto for one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    /// Estimated execution time.
    #[serde(rename = "estimatedTime")]
    pub estimated_time: u64,

    pub node: Node,
}

/// One metric reading.
///
/// ```
/// use mf_client::MetricReading;
///
/// let reading = MetricReading::now().value("energy", 120).value("execution_time", 42);
/// assert!(reading.as_map().contains_key("@timestamp"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricReading(Map<String, Value>);

impl MetricReading {
    /// Creates a reading with no timestamp.
    pub fn empty() -> Self {
        Self(Map::new())
    }

    /// Creates a reading stamped with the current local time.
    pub fn now() -> Self {
        Self::at(Local::now())
    }

    /// Creates a reading stamped with `time`.
    pub fn at(time: DateTime<Local>) -> Self {
        let mut map = Map::new();
        map.insert(
            "@timestamp".to_string(),
            Value::String(time.format(TIMESTAMP_FORMAT).to_string()),
        );
        Self(map)
    }

    /// Adds a measurement.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[test]
    fn test_deployment_plan_keys() {
        let plan = DeploymentPlan {
            estimated_time: 217,
            node: Node {
                id: "embedded_device".to_string(),
                cpus: vec![Cpu {
                    id: "cpu0".to_string(),
                    cores: vec![Core {
                        id: "core0".to_string(),
                        pw_mode: 100,
                    }],
                }],
            },
        };
        assert_eq!(
            serde_json::to_value(&plan).unwrap(),
            json!({
                "estimatedTime": 217,
                "node": {
                    "id": "embedded_device",
                    "cpus": [{"id": "cpu0", "cores": [{"id": "core0", "pwMode": 100}]}]
                }
            })
        );
    }

    #[test]
    fn test_metric_reading_timestamp() {
        let time = Local.with_ymd_and_hms(2016, 4, 7, 9, 5, 3).unwrap() + Duration::milliseconds(21);
        let reading = MetricReading::at(time).value("energy", 40);
        assert_eq!(
            serde_json::to_value(&reading).unwrap(),
            json!({"@timestamp": "2016-04-07T09:05:03.021", "energy": 40})
        );
    }
}
