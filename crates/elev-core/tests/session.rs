//! Load lifecycle and stale-result handling of the dashboard session.

use std::fs;

use elev_core::{Dashboard, LoadState};
use elev_ingest::{DataSource, FetchError, Scope, SourceConfig, StatsApi, TableQuery};
use elev_model::{DataSourceMode, OrgNr, TableKind, Trinn, YearId};
use serde_json::{Value, json};
use tempfile::TempDir;

const SCHOOL: &str = "988602671";

/// Serves one indicator row per request, scored by scope.
#[derive(Debug, Default)]
struct FixtureApi {
    offline: bool,
}

fn score_for(scope: &Scope) -> &'static str {
    match scope {
        Scope::National => "4,0",
        Scope::Organization(org) if org.as_str() == SCHOOL => "4,2",
        Scope::Organization(org) if org.as_str() == "974557746" => "3,0",
        Scope::Organization(_) => "3,5",
    }
}

impl StatsApi for FixtureApi {
    async fn year_status(&self) -> Result<Value, FetchError> {
        if self.offline {
            return Err(FetchError::Network("offline".to_string()));
        }
        Ok(json!({"TidID": [20232024, 20222023]}))
    }

    async fn table_data(&self, table: TableKind, query: &TableQuery) -> Result<Value, FetchError> {
        if self.offline {
            return Err(FetchError::Network("offline".to_string()));
        }
        if table != TableKind::Indikatorer {
            return Ok(json!({"data": []}));
        }
        Ok(json!({
            "data": [{
                "Skoleaarnavn": "2023-24",
                "Kjoenn": "Alle kjønn",
                "Spoersmaalnavn": "Alle spørsmål",
                "Spoersmaalgruppe": "Trivsel",
                "Score": score_for(&query.scope)
            }]
        }))
    }
}

fn source(api: FixtureApi, dir: &TempDir) -> DataSource<FixtureApi> {
    let config = SourceConfig::default()
        .with_org_nr(SCHOOL)
        .with_fallback_dir(dir.path());
    DataSource::new(api, &config).unwrap()
}

async fn loaded(source: &DataSource<FixtureApi>) -> Dashboard {
    let mut dashboard = Dashboard::new();
    let request = dashboard.begin_load();
    let outcome = request.run(source).await;
    assert!(dashboard.apply_load(outcome));
    dashboard
}

#[tokio::test]
async fn load_selects_latest_year() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi::default(), &temp);
    let mut dashboard = loaded(&source).await;

    assert_eq!(dashboard.state(), &LoadState::Ready);
    assert_eq!(
        dashboard.years(),
        &[YearId::new(20222023), YearId::new(20232024)]
    );
    assert_eq!(dashboard.selection().year, Some(YearId::new(20232024)));
    assert_eq!(dashboard.modes().school, DataSourceMode::Live);

    let trivsel = dashboard.view().summary.indicator("Trivsel");
    assert_eq!(trivsel.school, Some(4.2));
    assert_eq!(trivsel.national, Some(4.0));
    assert_eq!(trivsel.comparison, None);
}

#[tokio::test]
async fn latest_comparison_wins() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi::default(), &temp);
    let mut dashboard = loaded(&source).await;

    let first = dashboard.select_comparison(OrgNr::new("974557746").unwrap());
    let second = dashboard.select_comparison(OrgNr::new("911111111").unwrap());

    let second_outcome = second.run(&source).await;
    let first_outcome = first.run(&source).await;

    assert!(dashboard.apply_comparison(second_outcome));
    // The first request completes last but was superseded.
    assert!(!dashboard.apply_comparison(first_outcome));

    assert_eq!(
        dashboard.comparison_org().map(OrgNr::as_str),
        Some("911111111")
    );
    let trivsel = dashboard.view().summary.indicator("Trivsel");
    assert_eq!(trivsel.comparison, Some(3.5));
}

#[tokio::test]
async fn pending_comparison_hides_previous_school() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi::default(), &temp);
    let mut dashboard = loaded(&source).await;

    let first = dashboard.select_comparison(OrgNr::new("974557746").unwrap());
    let outcome = first.run(&source).await;
    assert!(dashboard.apply_comparison(outcome));
    assert_eq!(
        dashboard.view().summary.indicator("Trivsel").comparison,
        Some(3.0)
    );

    let second = dashboard.select_comparison(OrgNr::new("911111111").unwrap());

    assert_eq!(
        dashboard.comparison_org().map(OrgNr::as_str),
        Some("911111111")
    );
    assert!(dashboard.context().comparison.is_none());
    assert_eq!(dashboard.modes().comparison, None);
    assert!(dashboard.view().comparison.is_none());
    assert_eq!(
        dashboard.view().summary.indicator("Trivsel").comparison,
        None
    );

    let outcome = second.run(&source).await;
    assert!(dashboard.apply_comparison(outcome));
    assert_eq!(
        dashboard.view().summary.indicator("Trivsel").comparison,
        Some(3.5)
    );
}

#[tokio::test]
async fn cleared_comparison_ignores_late_result() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi::default(), &temp);
    let mut dashboard = loaded(&source).await;

    let request = dashboard.select_comparison(OrgNr::new("974557746").unwrap());
    dashboard.clear_comparison();
    let outcome = request.run(&source).await;

    assert!(!dashboard.apply_comparison(outcome));
    assert!(dashboard.context().comparison.is_none());
    assert_eq!(dashboard.modes().comparison, None);
}

#[tokio::test]
async fn closed_session_discards_load() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi::default(), &temp);
    let mut dashboard = Dashboard::new();

    let request = dashboard.begin_load();
    dashboard.close();
    let outcome = request.run(&source).await;

    assert!(!dashboard.apply_load(outcome));
    assert_eq!(dashboard.state(), &LoadState::Loading);
    assert!(dashboard.years().is_empty());
}

#[tokio::test]
async fn reload_supersedes_earlier_load() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi::default(), &temp);
    let mut dashboard = Dashboard::new();

    let first = dashboard.begin_load();
    let second = dashboard.begin_load();

    let first_outcome = first.run(&source).await;
    let second_outcome = second.run(&source).await;

    assert!(!dashboard.apply_load(first_outcome));
    assert!(dashboard.apply_load(second_outcome));
    assert!(dashboard.state().is_ready());
}

#[tokio::test]
async fn missing_snapshots_fail_the_load() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi { offline: true }, &temp);
    let mut dashboard = Dashboard::new();

    let outcome = dashboard.begin_load().run(&source).await;
    assert!(dashboard.apply_load(outcome));

    match dashboard.state() {
        LoadState::Failed(message) => assert!(message.contains("years.json")),
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn snapshots_carry_an_offline_load() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("years.json"), r#"{"TidID": [20232024]}"#).unwrap();
    for kind in TableKind::ALL {
        fs::write(temp.path().join(kind.snapshot_file_name()), "[]").unwrap();
    }
    let source = source(FixtureApi { offline: true }, &temp);
    let dashboard = loaded(&source).await;

    assert_eq!(dashboard.state(), &LoadState::Ready);
    assert_eq!(dashboard.modes().years, DataSourceMode::Fallback);
    assert_eq!(dashboard.modes().school, DataSourceMode::Fallback);
    assert_eq!(dashboard.modes().national, DataSourceMode::Unavailable);
}

#[tokio::test]
async fn selection_changes_refilter_the_view() {
    let temp = TempDir::new().unwrap();
    let source = source(FixtureApi::default(), &temp);
    let mut dashboard = loaded(&source).await;

    assert_eq!(dashboard.view().school.indikatorer.len(), 1);

    dashboard.set_year(Some(YearId::new(20222023)));
    assert!(dashboard.view().school.indikatorer.is_empty());
    assert_eq!(dashboard.view().trends.main_indicators.len(), 2);

    dashboard.set_year(Some(YearId::new(20232024)));
    dashboard.set_trinn(Trinn::Vg1);
    // Indicator rows without a grade are kept.
    assert_eq!(dashboard.view().school.indikatorer.len(), 1);
}
