//! Four-table fan-out for the subject school, the national aggregate and a
//! comparison school.

use serde::{Deserialize, Serialize};
use tracing::{Instrument, info, info_span};

use elev_model::{
    BullyingRow, DataSourceMode, IndicatorRow, OrgNr, ParticipationRow, Sourced, TableKind,
    TableSet, ThemeRow, YearId,
};

use crate::api::StatsApi;
use crate::error::Result;
use crate::source::DataSource;

/// Source mode of each table in a [`TableSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableModes {
    pub indikatorer: DataSourceMode,
    pub temaer: DataSourceMode,
    pub mobbing: DataSourceMode,
    pub deltakelse: DataSourceMode,
}

impl TableModes {
    pub fn get(&self, kind: TableKind) -> DataSourceMode {
        match kind {
            TableKind::Indikatorer => self.indikatorer,
            TableKind::Temaer => self.temaer,
            TableKind::Mobbing => self.mobbing,
            TableKind::Deltakelse => self.deltakelse,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TableKind, DataSourceMode)> + '_ {
        TableKind::ALL.iter().map(|kind| (*kind, self.get(*kind)))
    }
}

/// A [`TableSet`] together with where each of its tables came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchedTables {
    pub tables: TableSet,
    pub modes: TableModes,
}

impl FetchedTables {
    /// Badge summary: fallback if any table fell back, otherwise
    /// unavailable if any table is missing, otherwise live.
    pub fn mode(&self) -> DataSourceMode {
        let any = |wanted: DataSourceMode| self.modes.iter().any(|(_, mode)| mode == wanted);
        if any(DataSourceMode::Fallback) {
            DataSourceMode::Fallback
        } else if any(DataSourceMode::Unavailable) {
            DataSourceMode::Unavailable
        } else {
            DataSourceMode::Live
        }
    }

    fn assemble(
        indikatorer: Sourced<Vec<IndicatorRow>>,
        temaer: Sourced<Vec<ThemeRow>>,
        mobbing: Sourced<Vec<BullyingRow>>,
        deltakelse: Sourced<Vec<ParticipationRow>>,
    ) -> Self {
        Self {
            modes: TableModes {
                indikatorer: indikatorer.mode,
                temaer: temaer.mode,
                mobbing: mobbing.mode,
                deltakelse: deltakelse.mode,
            },
            tables: TableSet {
                indikatorer: indikatorer.payload,
                temaer: temaer.payload,
                mobbing: mobbing.payload,
                deltakelse: deltakelse.payload,
            },
        }
    }
}

impl<A: StatsApi> DataSource<A> {
    /// All four tables for the subject school.
    ///
    /// Tables degrade independently; the first snapshot failure is returned
    /// once every fetch has completed.
    pub async fn fetch_all_data(&self, years: &[YearId]) -> Result<FetchedTables> {
        let span = info_span!("fetch_tables", scope = "school", years = years.len());
        async {
            let (indikatorer, temaer, mobbing, deltakelse) = tokio::join!(
                self.school_table(TableKind::Indikatorer, years),
                self.school_table(TableKind::Temaer, years),
                self.school_table(TableKind::Mobbing, years),
                self.school_table(TableKind::Deltakelse, years),
            );
            let fetched = FetchedTables::assemble(indikatorer?, temaer?, mobbing?, deltakelse?);
            info!(
                rows = fetched.tables.total_rows(),
                mode = %fetched.mode(),
                "school tables ready"
            );
            Ok(fetched)
        }
        .instrument(span)
        .await
    }

    /// All four tables for the national aggregate.
    pub async fn fetch_all_national_data(&self, years: &[YearId]) -> FetchedTables {
        let span = info_span!("fetch_tables", scope = "national", years = years.len());
        async {
            let (indikatorer, temaer, mobbing, deltakelse) = tokio::join!(
                self.national_table(TableKind::Indikatorer, years),
                self.national_table(TableKind::Temaer, years),
                self.national_table(TableKind::Mobbing, years),
                self.national_table(TableKind::Deltakelse, years),
            );
            let fetched = FetchedTables::assemble(indikatorer, temaer, mobbing, deltakelse);
            info!(
                rows = fetched.tables.total_rows(),
                mode = %fetched.mode(),
                "national tables ready"
            );
            fetched
        }
        .instrument(span)
        .await
    }

    /// All four tables for a comparison school.
    pub async fn fetch_all_school_data(&self, years: &[YearId], org_nr: &OrgNr) -> FetchedTables {
        let span = info_span!(
            "fetch_tables",
            scope = "comparison",
            org_nr = %org_nr,
            years = years.len()
        );
        async {
            let (indikatorer, temaer, mobbing, deltakelse) = tokio::join!(
                self.organization_table(TableKind::Indikatorer, years, org_nr),
                self.organization_table(TableKind::Temaer, years, org_nr),
                self.organization_table(TableKind::Mobbing, years, org_nr),
                self.organization_table(TableKind::Deltakelse, years, org_nr),
            );
            let fetched = FetchedTables::assemble(indikatorer, temaer, mobbing, deltakelse);
            info!(
                rows = fetched.tables.total_rows(),
                mode = %fetched.mode(),
                "comparison tables ready"
            );
            fetched
        }
        .instrument(span)
        .await
    }
}
