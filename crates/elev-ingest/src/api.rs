//! Statistics API surface: query shapes, URL construction and payload
//! extraction shared by every transport.

use std::future::Future;

use elev_model::{OrgNr, TableKind, YearId, sort_year_ids};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;

/// Filter selecting the national aggregate: country level, whole country,
/// any ownership, any gender.
pub const NATIONAL_FILTER: &str = "EnhetNivaa(1)_Landkode(00)_EierformID(-10)_KjoennID(-10)";

/// Key of the year list in the filter-status payload and `years.json`.
pub const YEAR_KEY: &str = "TidID";

/// Which organizations a data request covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A single school by organization number.
    Organization(OrgNr),
    /// The national aggregate.
    National,
}

impl Scope {
    pub fn filter(&self) -> String {
        match self {
            Self::Organization(org) => format!("Organisasjonsnummer({org})"),
            Self::National => NATIONAL_FILTER.to_string(),
        }
    }
}

/// Parameters of one table data request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub year_ids: Vec<YearId>,
    pub scope: Scope,
    pub page: u32,
    pub page_size: u32,
}

impl TableQuery {
    pub fn new(year_ids: &[YearId], scope: Scope, page_size: u32) -> Self {
        Self {
            year_ids: year_ids.to_vec(),
            scope,
            page: 1,
            page_size,
        }
    }

    /// The `filter` parameter, e.g. `TidID(20222023_20232024)_Organisasjonsnummer(1)`.
    pub fn filter(&self) -> String {
        let years = self
            .year_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("_");
        format!("{YEAR_KEY}({years})_{}", self.scope.filter())
    }
}

/// Transport for the two read operations of the statistics API.
///
/// Implementations return the raw JSON payload; shape handling lives in
/// [`year_ids_from_payload`] and [`rows_from_payload`].
pub trait StatsApi: Send + Sync {
    /// Filter status for the year dimension of the indicator table.
    fn year_status(&self) -> impl Future<Output = Result<Value, FetchError>> + Send;

    /// First page of table data for the given query.
    fn table_data(
        &self,
        table: TableKind,
        query: &TableQuery,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// URL of the year discovery endpoint.
pub fn year_status_url(base_url: &str) -> String {
    format!(
        "{base_url}/{}/filterStatus?filterId={YEAR_KEY}&filter={YEAR_KEY}(*)",
        TableKind::Indikatorer.table_id()
    )
}

/// URL of a table data request.
pub fn table_data_url(base_url: &str, table: TableKind, query: &TableQuery) -> String {
    format!(
        "{base_url}/{}/data?filter={}&format=0&sideNummer={}&antallRader={}",
        table.table_id(),
        query.filter(),
        query.page,
        query.page_size
    )
}

/// Sorted year ids from a `{ "TidID": [...] }` payload.
///
/// A payload without the key yields an empty list.
pub fn year_ids_from_payload(payload: &Value) -> Result<Vec<YearId>, serde_json::Error> {
    match payload.get(YEAR_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => {
            let ids = Vec::<YearId>::deserialize(value)?;
            Ok(sort_year_ids(&ids))
        }
    }
}

/// Row objects from a data payload.
///
/// Rows live under `data`; a bare array is accepted as the rows themselves.
/// Any other shape yields no rows.
pub fn rows_from_payload(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Decodes rows one by one, skipping entries that are not objects.
pub fn decode_rows<R: DeserializeOwned>(table: TableKind, rows: Vec<Value>) -> Vec<R> {
    let total = rows.len();
    let decoded: Vec<R> = rows
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();
    if decoded.len() != total {
        debug!(
            table_id = table.table_id(),
            skipped = total - decoded.len(),
            "skipped malformed rows"
        );
    }
    decoded
}
