//! `reqwest` transport for the statistics API.

use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use elev_model::TableKind;

use crate::api::{StatsApi, TableQuery, table_data_url, year_status_url};
use crate::config::SourceConfig;
use crate::error::{FetchError, IngestError, Result};

/// Client for the statistics API export endpoints.
#[derive(Debug, Clone)]
pub struct HttpStatsApi {
    client: Client,
    base_url: String,
}

impl HttpStatsApi {
    /// Create a client with the configured timeout.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| IngestError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: String) -> std::result::Result<Value, FetchError> {
        debug!(%url, "requesting statistics API");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, format!("elev/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}

impl StatsApi for HttpStatsApi {
    async fn year_status(&self) -> std::result::Result<Value, FetchError> {
        self.get_json(year_status_url(&self.base_url)).await
    }

    async fn table_data(
        &self,
        table: TableKind,
        query: &TableQuery,
    ) -> std::result::Result<Value, FetchError> {
        self.get_json(table_data_url(&self.base_url, table, query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = SourceConfig::default().with_base_url("http://127.0.0.1:9/api/");
        let api = HttpStatsApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:9/api");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = SourceConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout_secs(2);
        let api = HttpStatsApi::new(&config).unwrap();
        let err = api.year_status().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
