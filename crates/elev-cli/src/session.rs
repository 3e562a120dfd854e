//! Drives a [`Dashboard`] to completion for one command invocation.

use anyhow::{Result, bail};
use tracing::{info, warn};

use elev_core::{Dashboard, LoadState};
use elev_ingest::{DataSource, StatsApi};
use elev_model::{OrgNr, Selection};

/// Runs the initial load and fails if it ends in [`LoadState::Failed`].
pub async fn load_dashboard<A: StatsApi>(source: &DataSource<A>) -> Result<Dashboard> {
    let mut dashboard = Dashboard::new();
    let outcome = dashboard.begin_load().run(source).await;
    dashboard.apply_load(outcome);

    match dashboard.state() {
        LoadState::Ready => Ok(dashboard),
        LoadState::Failed(message) => bail!("{message}"),
        LoadState::Loading => bail!("load did not complete"),
    }
}

/// Applies `selection`; a year outside the loaded range is kept but warned about.
pub fn apply_selection(dashboard: &mut Dashboard, selection: Selection) {
    if let Some(year) = selection.year
        && !dashboard.years().contains(&year)
    {
        warn!(year = %year, "selected year is not among the available years");
    }
    dashboard.set_year(selection.year);
    dashboard.set_trinn(selection.trinn);
    dashboard.set_kjoenn(selection.kjoenn);
}

/// Fetches and applies a comparison school.
pub async fn compare_with<A: StatsApi>(
    dashboard: &mut Dashboard,
    source: &DataSource<A>,
    org_nr: OrgNr,
) -> bool {
    let request = dashboard.select_comparison(org_nr);
    info!(org_nr = %request.org_nr(), "fetching comparison school");
    let outcome = request.run(source).await;
    dashboard.apply_comparison(outcome)
}
