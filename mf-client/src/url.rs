//! Endpoint paths of the monitoring framework.

/// Path appended once to the base URL.
pub const API_PREFIX: &str = "v1/dreamcloud/mf";

/// Default base URL of the monitoring framework.
pub const DEFAULT_BASE_URL: &str = "http://mf.excess-project.eu:3030";

/// Task placeholder used when a metric is not bound to a specific task.
pub const ALL_TASKS: &str = "_all";

pub(crate) const WORKFLOWS: &str = "workflows";
pub(crate) const DEPLOYMENTS: &str = "deployments";
pub(crate) const METRICS: &str = "metrics";
pub(crate) const PROFILES: &str = "profiles";
pub(crate) const PROGRESS: &str = "progress";
pub(crate) const RUNTIME: &str = "runtime";
pub(crate) const STATISTICS: &str = "statistics";

/// Joins URL segments with a single `/`.
///
/// All trailing slashes of every segment are removed first, so
/// `join_url_segments(&["http://h/", "v1/", "mf"])` is `"http://h/v1/mf"`.
/// Leading slashes are kept as they are.
pub fn join_url_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref().trim_end_matches('/'))
        .collect::<Vec<_>>()
        .join("/")
}

/// Lower-cases an identifier before it is embedded in a write path.
pub(crate) fn normalize_id(id: impl AsRef<str>) -> String {
    id.as_ref().to_lowercase()
}
