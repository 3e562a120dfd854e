//! Survey data acquisition.
//!
//! Years and tables are read from the statistics API through a [`StatsApi`]
//! transport. Subject-school reads fall back to bundled snapshots in a
//! [`FallbackStore`]; national and comparison reads degrade to empty,
//! unavailable payloads. The four tables of a [`TableSet`](elev_model::TableSet)
//! are fetched concurrently and degrade independently.

pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod http;
pub mod source;
pub mod tables;

pub use api::{NATIONAL_FILTER, Scope, StatsApi, TableQuery, table_data_url, year_status_url};
pub use config::SourceConfig;
pub use error::{FetchError, IngestError, Result};
pub use fallback::{FallbackStore, YEARS_FILE};
pub use http::HttpStatsApi;
pub use source::DataSource;
pub use tables::{FetchedTables, TableModes};
