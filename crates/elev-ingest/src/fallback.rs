//! Bundled snapshot store.
//!
//! Snapshots live in a single directory: `years.json` holds the year list
//! as `{ "TidID": [...] }` and `tabell_{id}.json` holds one table in the
//! same shape the data endpoint returns.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use elev_model::{TableKind, YearId};

use crate::api::{rows_from_payload, year_ids_from_payload};
use crate::error::{IngestError, Result};

/// File name of the year list snapshot.
pub const YEARS_FILE: &str = "years.json";

/// Read-only access to the snapshot directory.
#[derive(Debug, Clone)]
pub struct FallbackStore {
    root: PathBuf,
}

impl FallbackStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn years_path(&self) -> PathBuf {
        self.root.join(YEARS_FILE)
    }

    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.root.join(kind.snapshot_file_name())
    }

    /// Sorted year ids from the snapshot.
    pub async fn years(&self) -> Result<Vec<YearId>> {
        let path = self.years_path();
        let payload = read_json(&path).await?;
        let years = year_ids_from_payload(&payload).map_err(|e| IngestError::SnapshotParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), years = years.len(), "loaded year snapshot");
        Ok(years)
    }

    /// Raw rows of one table from the snapshot.
    pub async fn table_rows(&self, kind: TableKind) -> Result<Vec<Value>> {
        let path = self.table_path(kind);
        let payload = read_json(&path).await?;
        let rows = rows_from_payload(payload);
        info!(
            path = %path.display(),
            table_id = kind.table_id(),
            rows = rows.len(),
            "loaded table snapshot"
        );
        Ok(rows)
    }
}

async fn read_json(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "reading snapshot");
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| IngestError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|e| IngestError::SnapshotParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
