//! Orchestrator over the remote API and the snapshot store.
//!
//! Every operation degrades on its own: a failing remote call is logged and
//! replaced by the snapshot (subject school) or an empty, unavailable payload
//! (national aggregate, comparison school). Only snapshot failures escape.

use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use elev_model::{OrgNr, Sourced, TableKind, YearId};

use crate::api::{
    Scope, StatsApi, TableQuery, decode_rows, rows_from_payload, year_ids_from_payload,
};
use crate::config::SourceConfig;
use crate::error::{FetchError, Result};
use crate::fallback::FallbackStore;
use crate::http::HttpStatsApi;

/// Survey data source for one subject school.
#[derive(Debug, Clone)]
pub struct DataSource<A> {
    api: A,
    fallback: FallbackStore,
    org_nr: OrgNr,
    page_size: u32,
    offline: bool,
}

impl DataSource<HttpStatsApi> {
    /// Data source backed by the public statistics API.
    pub fn http(config: &SourceConfig) -> Result<Self> {
        let api = HttpStatsApi::new(config)?;
        Self::new(api, config)
    }
}

impl<A: StatsApi> DataSource<A> {
    pub fn new(api: A, config: &SourceConfig) -> Result<Self> {
        let org_nr = OrgNr::new(config.org_nr.clone())?;
        Ok(Self {
            api,
            fallback: FallbackStore::new(config.fallback_dir.clone()),
            org_nr,
            page_size: config.page_size,
            offline: config.offline,
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn org_nr(&self) -> &OrgNr {
        &self.org_nr
    }

    pub fn fallback(&self) -> &FallbackStore {
        &self.fallback
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Survey years with data for the subject school, ascending.
    pub async fn available_years(&self) -> Result<Sourced<Vec<YearId>>> {
        if self.offline {
            return Ok(Sourced::fallback(self.fallback.years().await?));
        }

        let remote = match self.api.year_status().await {
            Ok(payload) => year_ids_from_payload(&payload).map_err(FetchError::from),
            Err(err) => Err(err),
        };

        match remote {
            Ok(years) => {
                info!(years = years.len(), mode = "live", "resolved survey years");
                Ok(Sourced::live(years))
            }
            Err(err) => {
                warn!(error = %err, "year discovery failed, using snapshot");
                Ok(Sourced::fallback(self.fallback.years().await?))
            }
        }
    }

    /// One table for the subject school, falling back to its snapshot.
    pub async fn school_table<R: DeserializeOwned>(
        &self,
        kind: TableKind,
        years: &[YearId],
    ) -> Result<Sourced<Vec<R>>> {
        if years.is_empty() {
            // Nothing to request; the tag still reports which source would serve it.
            return Ok(if self.offline {
                Sourced::fallback(Vec::new())
            } else {
                Sourced::live(Vec::new())
            });
        }

        if !self.offline {
            let scope = Scope::Organization(self.org_nr.clone());
            match self.remote_rows(kind, years, scope).await {
                Ok(rows) => return Ok(Sourced::live(rows)),
                Err(err) => {
                    warn!(
                        table_id = kind.table_id(),
                        error = %err,
                        "table fetch failed, using snapshot"
                    );
                }
            }
        }

        let rows = self.fallback.table_rows(kind).await?;
        let rows = decode_rows(kind, rows);
        info!(
            table_id = kind.table_id(),
            row_count = rows.len(),
            mode = "fallback",
            "table loaded"
        );
        Ok(Sourced::fallback(rows))
    }

    /// One table for the national aggregate. Failure yields an empty payload.
    pub async fn national_table<R: DeserializeOwned>(
        &self,
        kind: TableKind,
        years: &[YearId],
    ) -> Sourced<Vec<R>> {
        self.scoped_table(kind, years, Scope::National).await
    }

    /// One table for an arbitrary organization. Failure yields an empty payload.
    pub async fn organization_table<R: DeserializeOwned>(
        &self,
        kind: TableKind,
        years: &[YearId],
        org_nr: &OrgNr,
    ) -> Sourced<Vec<R>> {
        self.scoped_table(kind, years, Scope::Organization(org_nr.clone()))
            .await
    }

    async fn scoped_table<R: DeserializeOwned>(
        &self,
        kind: TableKind,
        years: &[YearId],
        scope: Scope,
    ) -> Sourced<Vec<R>> {
        if self.offline {
            return Sourced::unavailable(Vec::new());
        }
        if years.is_empty() {
            return Sourced::live(Vec::new());
        }

        match self.remote_rows(kind, years, scope).await {
            Ok(rows) => Sourced::live(rows),
            Err(err) => {
                warn!(
                    table_id = kind.table_id(),
                    error = %err,
                    "table fetch failed, no snapshot for this scope"
                );
                Sourced::unavailable(Vec::new())
            }
        }
    }

    async fn remote_rows<R: DeserializeOwned>(
        &self,
        kind: TableKind,
        years: &[YearId],
        scope: Scope,
    ) -> std::result::Result<Vec<R>, FetchError> {
        let start = Instant::now();
        let query = TableQuery::new(years, scope, self.page_size);
        let payload = self.api.table_data(kind, &query).await?;
        let rows = decode_rows(kind, rows_from_payload(payload));
        info!(
            table_id = kind.table_id(),
            row_count = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            mode = "live",
            "table loaded"
        );
        Ok(rows)
    }
}
