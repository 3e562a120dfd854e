//! Configuration file loading and command-line overrides.
//!
//! The file is TOML with a single `[source]` table; every key is optional.
//!
//! ```toml
//! [source]
//! org_nr = "988602671"
//! fallback_dir = "data"
//! timeout_secs = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use elev_ingest::SourceConfig;

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub source: SourceConfig,
}

impl CliConfig {
    /// Loads `path`, or returns defaults when no path is given.
    ///
    /// # Errors
    ///
    /// An explicitly named file that is missing or malformed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Source settings given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub base_url: Option<String>,
    pub org_nr: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub offline: bool,
}

impl SourceOverrides {
    pub fn apply(&self, mut config: SourceConfig) -> SourceConfig {
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(org_nr) = &self.org_nr {
            config = config.with_org_nr(org_nr.as_str());
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_fallback_dir(dir.as_path());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        if self.offline {
            config = config.with_offline(true);
        }
        config
    }
}
