//! Dashboard session state machine.
//!
//! Loads and comparison fetches are split into a request, which runs
//! without borrowing the session, and an outcome that the session applies.
//! Applying checks the request's generation token, so a superseded or
//! torn-down request never reaches visible state.

use serde::Serialize;
use tracing::{Instrument, debug, error, info, info_span};

use elev_ingest::{DataSource, FetchedTables, IngestError, StatsApi};
use elev_model::{DataContext, DataSourceMode, Kjoenn, OrgNr, Selection, Sourced, Trinn, YearId};

use crate::generation::{Generation, GenerationToken};
use crate::versioned::Versioned;
use crate::view::DashboardView;

/// Lifecycle of the main load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum LoadState {
    #[default]
    Loading,
    /// Unrecoverable; the only recovery is a full reload.
    Failed(String),
    Ready,
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Everything a successful load produced.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub years: Sourced<Vec<YearId>>,
    pub school: FetchedTables,
    pub national: FetchedTables,
}

/// Pending main load.
#[derive(Debug)]
#[must_use = "a load request does nothing until it is run"]
pub struct LoadRequest {
    token: GenerationToken,
}

impl LoadRequest {
    /// Resolves years, then fetches school and national tables concurrently.
    ///
    /// Stops early when superseded after year discovery.
    pub async fn run<A: StatsApi>(self, source: &DataSource<A>) -> LoadOutcome {
        let span = info_span!("load", generation = self.token.issued());
        async move {
            let years = match source.available_years().await {
                Ok(years) => years,
                Err(err) => return self.finish(Some(Err(err))),
            };
            if !self.token.is_current() {
                debug!("load superseded after year discovery");
                return self.finish(None);
            }

            let (school, national) = tokio::join!(
                source.fetch_all_data(&years.payload),
                source.fetch_all_national_data(&years.payload),
            );
            let result = school.map(|school| LoadedData {
                years,
                school,
                national,
            });
            self.finish(Some(result))
        }
        .instrument(span)
        .await
    }

    fn finish(self, result: Option<Result<LoadedData, IngestError>>) -> LoadOutcome {
        LoadOutcome {
            token: self.token,
            result,
        }
    }
}

/// Completed main load, not yet applied.
#[derive(Debug)]
pub struct LoadOutcome {
    token: GenerationToken,
    /// `None` when the request gave up because it was superseded.
    result: Option<Result<LoadedData, IngestError>>,
}

/// Pending comparison-school fetch.
#[derive(Debug)]
#[must_use = "a comparison request does nothing until it is run"]
pub struct ComparisonRequest {
    token: GenerationToken,
    org_nr: OrgNr,
    years: Vec<YearId>,
}

impl ComparisonRequest {
    pub fn org_nr(&self) -> &OrgNr {
        &self.org_nr
    }

    pub async fn run<A: StatsApi>(self, source: &DataSource<A>) -> ComparisonOutcome {
        let tables = source
            .fetch_all_school_data(&self.years, &self.org_nr)
            .await;
        ComparisonOutcome {
            token: self.token,
            org_nr: self.org_nr,
            tables,
        }
    }
}

/// Completed comparison fetch, not yet applied.
#[derive(Debug)]
pub struct ComparisonOutcome {
    token: GenerationToken,
    org_nr: OrgNr,
    tables: FetchedTables,
}

/// Where each context's data came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceModes {
    pub years: DataSourceMode,
    pub school: DataSourceMode,
    pub national: DataSourceMode,
    pub comparison: Option<DataSourceMode>,
}

/// Session over one subject school.
#[derive(Debug, Default)]
pub struct Dashboard {
    state: LoadState,
    years: Vec<YearId>,
    context: DataContext,
    modes: SourceModes,
    comparison_org: Option<OrgNr>,
    selection: Selection,
    load_generation: Generation,
    comparison_generation: Generation,
    revision: u64,
    view: Option<Versioned<DashboardView>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn years(&self) -> &[YearId] {
        &self.years
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn modes(&self) -> &SourceModes {
        &self.modes
    }

    pub fn context(&self) -> &DataContext {
        &self.context
    }

    pub fn comparison_org(&self) -> Option<&OrgNr> {
        self.comparison_org.as_ref()
    }

    /// Input revision; bumped whenever data or selection changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Starts a (re)load. Any in-flight load or comparison is superseded.
    pub fn begin_load(&mut self) -> LoadRequest {
        let token = self.load_generation.advance();
        self.comparison_generation.invalidate();
        self.comparison_org = None;
        self.context.comparison = None;
        self.modes.comparison = None;
        self.state = LoadState::Loading;
        self.touch();
        LoadRequest { token }
    }

    /// Applies a finished load. Returns `false` if it was stale.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> bool {
        if !outcome.token.is_current() {
            debug!(generation = outcome.token.issued(), "discarding stale load");
            return false;
        }
        let Some(result) = outcome.result else {
            return false;
        };

        match result {
            Ok(data) => {
                self.modes.years = data.years.mode;
                self.modes.school = data.school.mode();
                self.modes.national = data.national.mode();
                self.years = data.years.payload;
                self.context.school = data.school.tables;
                self.context.national = data.national.tables;
                self.selection.year = self.years.last().copied();
                self.state = LoadState::Ready;
                info!(
                    years = self.years.len(),
                    school_rows = self.context.school.total_rows(),
                    national_rows = self.context.national.total_rows(),
                    mode = %self.modes.school,
                    "dashboard loaded"
                );
            }
            Err(err) => {
                error!(error = %err, "dashboard load failed");
                self.state = LoadState::Failed(format!("{} ({err})", err.user_message()));
            }
        }
        self.touch();
        true
    }

    /// Starts fetching a comparison school, superseding any earlier one.
    ///
    /// The previous school's tables are dropped at once, so the view never
    /// shows them under the new organization number.
    pub fn select_comparison(&mut self, org_nr: OrgNr) -> ComparisonRequest {
        let token = self.comparison_generation.advance();
        self.comparison_org = Some(org_nr.clone());
        self.context.comparison = None;
        self.modes.comparison = None;
        self.touch();
        ComparisonRequest {
            token,
            org_nr,
            years: self.years.clone(),
        }
    }

    /// Applies a finished comparison fetch. Returns `false` if it was stale.
    pub fn apply_comparison(&mut self, outcome: ComparisonOutcome) -> bool {
        if !outcome.token.is_current() {
            debug!(org_nr = %outcome.org_nr, "discarding stale comparison");
            return false;
        }
        info!(
            org_nr = %outcome.org_nr,
            rows = outcome.tables.tables.total_rows(),
            mode = %outcome.tables.mode(),
            "comparison applied"
        );
        self.modes.comparison = Some(outcome.tables.mode());
        self.context.comparison = Some(outcome.tables.tables);
        self.comparison_org = Some(outcome.org_nr);
        self.touch();
        true
    }

    pub fn clear_comparison(&mut self) {
        self.comparison_generation.invalidate();
        self.comparison_org = None;
        self.context.comparison = None;
        self.modes.comparison = None;
        self.touch();
    }

    /// Teardown: every in-flight result is ignored from now on.
    pub fn close(&mut self) {
        self.load_generation.invalidate();
        self.comparison_generation.invalidate();
    }

    pub fn set_year(&mut self, year: Option<YearId>) {
        self.update_selection(self.selection.with_year(year));
    }

    pub fn set_trinn(&mut self, trinn: Trinn) {
        self.update_selection(self.selection.with_trinn(trinn));
    }

    pub fn set_kjoenn(&mut self, kjoenn: Kjoenn) {
        self.update_selection(self.selection.with_kjoenn(kjoenn));
    }

    /// Derived view for the current inputs, recomputed only after a change.
    pub fn view(&mut self) -> &DashboardView {
        let revision = self.revision;
        if self
            .view
            .as_ref()
            .is_some_and(|cached| cached.is_stale(revision))
        {
            self.view = None;
        }

        let (context, years, selection) = (&self.context, &self.years, &self.selection);
        &self
            .view
            .get_or_insert_with(|| {
                debug!(revision, "recomputing dashboard view");
                Versioned::new(DashboardView::compute(context, years, selection), revision)
            })
            .data
    }

    fn update_selection(&mut self, selection: Selection) {
        if selection != self.selection {
            self.selection = selection;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
