use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use elev_cli::config::CliConfig;
use elev_cli::session::{apply_selection, compare_with, load_dashboard};
use elev_cli::summary::{
    bullying_bar_table, bullying_rows_table, indicator_bar_table, indicator_rows_table,
    modes_line, participation_rows_table, summary_table, theme_rows_table, theme_summary_table,
    trend_table, truncation_note, years_table,
};
use elev_ingest::{DataSource, HttpStatsApi, SourceConfig};
use elev_model::{TableKind, YearId};
use elev_transform::{
    THEME_DETAIL_LIMIT, bullying_bars, bullying_types, indicator_bars, indicator_details,
    theme_details, theme_summary,
};

use crate::cli::{RowsArgs, SourceArgs, SummaryArgs, TrendArgs};

/// Resolves the source configuration: file first, then flags.
fn source_config(args: &SourceArgs) -> Result<SourceConfig> {
    let file = CliConfig::load(args.config.as_deref())?;
    Ok(args.overrides().apply(file.source))
}

fn data_source(args: &SourceArgs) -> Result<DataSource<HttpStatsApi>> {
    let config = source_config(args)?;
    info!(
        org_nr = %config.org_nr,
        offline = config.offline,
        fallback_dir = %config.fallback_dir.display(),
        "resolved data source"
    );
    DataSource::http(&config).context("failed to set up the data source")
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

pub async fn run_years(source_args: &SourceArgs, json: bool) -> Result<()> {
    let source = data_source(source_args)?;
    let dashboard = load_dashboard(&source).await?;
    let mode = dashboard.modes().years;

    if json {
        return print_json(&json!({ "years": dashboard.years(), "mode": mode }));
    }
    println!("{}", years_table(dashboard.years(), mode));
    println!("{}", modes_line(dashboard.modes()));
    Ok(())
}

pub async fn run_summary(source_args: &SourceArgs, args: &SummaryArgs) -> Result<()> {
    let source = data_source(source_args)?;
    let mut dashboard = load_dashboard(&source).await?;
    let latest = dashboard.years().last().copied();
    apply_selection(&mut dashboard, args.selection.selection(latest));
    if let Some(org_nr) = &args.compare {
        compare_with(&mut dashboard, &source, org_nr.clone()).await;
    }

    let modes = *dashboard.modes();
    let comparison_org = dashboard.comparison_org().cloned();
    let view = dashboard.view();
    let bars = indicator_bars(&view.school.indikatorer);
    let themes = theme_summary(&view.school.temaer);
    let bullying = bullying_bars(&view.school.mobbing);
    let bullying_kinds = bullying_types(&view.school.mobbing);

    if args.output.json {
        return print_json(&json!({
            "school": source.org_nr(),
            "comparison_school": comparison_org,
            "selection": view.selection,
            "modes": modes,
            "summary": view.summary,
            "indicators": bars,
            "themes": themes,
            "bullying": bullying,
            "bullying_types": bullying_kinds,
        }));
    }

    let year = view
        .selection
        .year
        .map_or_else(|| "alle år".to_string(), YearId::label);
    println!(
        "School {} | {} | trinn {} | kjønn {}",
        source.org_nr(),
        year,
        view.selection.trinn,
        view.selection.kjoenn
    );
    if let Some(org_nr) = &comparison_org {
        println!("Compared with {org_nr}");
    }
    println!("{}", summary_table(&view.summary, comparison_org.is_some()));
    if !bars.is_empty() {
        println!("{}", indicator_bar_table(&bars));
    }
    if !themes.is_empty() {
        println!("{}", theme_summary_table(&themes));
    }
    if !bullying.is_empty() {
        println!("{}", bullying_bar_table(&bullying));
    }
    if !bullying_kinds.is_empty() {
        println!("Mobbetyper: {}", bullying_kinds.join(", "));
    }
    println!("{}", modes_line(&modes));
    Ok(())
}

pub async fn run_trend(source_args: &SourceArgs, args: &TrendArgs) -> Result<()> {
    let source = data_source(source_args)?;
    let mut dashboard = load_dashboard(&source).await?;
    let modes = *dashboard.modes();
    let trends = &dashboard.view().trends;

    let points = match args.table {
        TableKind::Indikatorer if args.all_groups => &trends.indicators,
        TableKind::Indikatorer => &trends.main_indicators,
        TableKind::Temaer => &trends.themes,
        TableKind::Mobbing => &trends.bullying,
        TableKind::Deltakelse => &trends.participation,
    };

    if args.output.json {
        return print_json(points);
    }
    let is_percent = matches!(args.table, TableKind::Mobbing | TableKind::Deltakelse);
    println!("{}", trend_table(points, is_percent));
    println!("{}", modes_line(&modes));
    Ok(())
}

pub async fn run_rows(source_args: &SourceArgs, args: &RowsArgs) -> Result<()> {
    let source = data_source(source_args)?;
    let mut dashboard = load_dashboard(&source).await?;
    let latest = dashboard.years().last().copied();
    apply_selection(&mut dashboard, args.selection.selection(latest));
    let modes = *dashboard.modes();
    let school = &dashboard.view().school;
    let json = args.output.json;

    match args.table {
        TableKind::Indikatorer => {
            let rows = indicator_details(&school.indikatorer);
            if json {
                return print_json(&rows);
            }
            println!("{}", indicator_rows_table(&rows));
        }
        TableKind::Temaer => {
            let page = theme_details(&school.temaer, THEME_DETAIL_LIMIT);
            if json {
                return print_json(&page);
            }
            println!("{}", theme_rows_table(&page));
            if let Some(note) = truncation_note(&page) {
                println!("{note}");
            }
        }
        TableKind::Mobbing => {
            if json {
                return print_json(&school.mobbing);
            }
            println!("{}", bullying_rows_table(&school.mobbing));
        }
        TableKind::Deltakelse => {
            if json {
                return print_json(&school.deltakelse);
            }
            println!("{}", participation_rows_table(&school.deltakelse));
        }
    }
    println!("{}", modes_line(&modes));
    Ok(())
}
