//! Host and platform information attached to outgoing metric data.
use crate::error::{MfError, MfResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where metric data is coming from.
///
/// Both fields are optional. A field that is set is merged into every metric
/// payload sent by a [`Publisher`](crate::Publisher); a field that is `None` is left
/// out of the payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Unique identifier of the device producing the data.
    pub host: Option<String>,

    /// Type of the host, e.g. `hpc` or `embedded`.
    pub platform: Option<String>,
}

impl RequestContext {
    /// Sets the host identifier.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the platform identifier.
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Returns a copy of `data` extended with the fields of this context.
    pub fn extend(&self, data: &Map<String, Value>) -> Map<String, Value> {
        let mut data = data.clone();
        if let Some(host) = &self.host {
            data.insert("host".to_string(), Value::String(host.clone()));
        }
        if let Some(platform) = &self.platform {
            data.insert("platform".to_string(), Value::String(platform.clone()));
        }
        data
    }
}

/// Serializes a payload into a fresh JSON object.
///
/// The caller's value is only borrowed, every modification made by the client
/// happens on the returned map.
pub(crate) fn to_object(payload: &impl Serialize) -> MfResult<Map<String, Value>> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(MfError::PayloadNotObject(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extend_sets_only_present_fields() {
        let data = to_object(&json!({"energy": 42})).unwrap();

        let ctx = RequestContext::default().host("node01");
        let extended = ctx.extend(&data);
        assert_eq!(extended["host"], "node01");
        assert!(!extended.contains_key("platform"));

        let extended = RequestContext::default().extend(&data);
        assert_eq!(extended, data);
    }

    #[test]
    fn test_extend_leaves_input_untouched() {
        let data = to_object(&json!({"energy": 42, "host": "old"})).unwrap();
        let ctx = RequestContext::default().host("new").platform("hpc");
        let extended = ctx.extend(&data);

        assert_eq!(extended["host"], "new");
        assert_eq!(extended["platform"], "hpc");
        assert_eq!(data["host"], "old");
        assert!(!data.contains_key("platform"));
    }

    #[test]
    fn test_to_object_rejects_non_objects() {
        match to_object(&vec![1, 2, 3]) {
            Err(MfError::PayloadNotObject(s)) => assert_eq!(s, "[1,2,3]"),
            r => panic!("unexpected result: {:?}", r),
        }
    }
}
