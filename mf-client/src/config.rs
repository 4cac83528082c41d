//! Configuration of [`BaseClient`](crate::BaseClient).
use crate::{context::RequestContext, url::DEFAULT_BASE_URL};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`BaseClient`](crate::BaseClient).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct MfClientConfig {
    /// Base URL of the monitoring framework, without the API prefix.
    pub base_url: String,

    /// Initial host identifier attached to metric data.
    #[serde(default)]
    pub host: Option<String>,

    /// Initial platform identifier attached to metric data.
    #[serde(default)]
    pub platform: Option<String>,
}

impl Default for MfClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            host: None,
            platform: None,
        }
    }
}

impl MfClientConfig {
    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

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

    /// Request context built from `host` and `platform`.
    pub fn context(&self) -> RequestContext {
        RequestContext {
            host: self.host.clone(),
            platform: self.platform.clone(),
        }
    }

    /// Constructs [`MfClientConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`MfClientConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
