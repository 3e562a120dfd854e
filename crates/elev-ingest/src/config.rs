//! Data source configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Statistics API export endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.statistikkbanken.udir.no/api/rest/v2/Eksport";

/// Organization number of the subject school.
pub const DEFAULT_ORG_NR: &str = "988602671";

/// Directory holding `years.json` and `tabell_{id}.json` snapshots.
pub const DEFAULT_FALLBACK_DIR: &str = "data";

/// Rows requested per page; the first page is the only one read.
pub const DEFAULT_PAGE_SIZE: u32 = 10_000;

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the remote and fallback data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the export API, without trailing slash.
    pub base_url: String,
    /// Organization number of the subject school.
    pub org_nr: String,
    /// Root directory of the bundled snapshots.
    pub fallback_dir: PathBuf,
    /// `antallRader` sent with every data request.
    pub page_size: u32,
    /// Request timeout; a hung request degrades like any other failure.
    pub timeout_secs: u64,
    /// Skip the API entirely and read snapshots only.
    pub offline: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            org_nr: DEFAULT_ORG_NR.to_string(),
            fallback_dir: PathBuf::from(DEFAULT_FALLBACK_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            offline: false,
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_org_nr(mut self, org_nr: impl Into<String>) -> Self {
        self.org_nr = org_nr.into();
        self
    }

    #[must_use]
    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
