//! Terminal tables for the dashboard commands.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use elev_core::SourceModes;
use elev_model::{
    BullyingRow, DataSourceMode, IndicatorRow, ParticipationRow, SurveyRow, ThemeRow, YearId,
    format_delta, format_percent, format_score,
};
use elev_transform::{
    Benchmark, BullyingBar, DashboardSummary, DetailPage, IndicatorBar, SCORE_CARD_GROUPS,
    ThemeSummary, TrendPoint, trend_keys,
};

const MISSING: &str = "-";

/// How a score card value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    Score,
    Percent(usize),
}

impl Measure {
    fn format(self, value: f64) -> String {
        match self {
            Self::Score => format_score(value),
            Self::Percent(decimals) => format_percent(value, decimals),
        }
    }
}

/// One-line description of where each context's data came from.
pub fn modes_line(modes: &SourceModes) -> String {
    let mut line = format!(
        "Data: years {}, school {}, national {}",
        modes.years, modes.school, modes.national
    );
    if let Some(comparison) = modes.comparison {
        line.push_str(&format!(", comparison {comparison}"));
    }
    line
}

pub fn years_table(years: &[YearId], mode: DataSourceMode) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("TidID"), header_cell("School year")]);
    apply_table_style(&mut table);
    for year in years {
        table.add_row(vec![Cell::new(year), Cell::new(year.label())]);
    }
    if years.is_empty() {
        table.add_row(vec![dim_cell(MISSING), dim_cell(format!("none ({mode})"))]);
    }
    table
}

/// Score cards with deltas; comparison columns only when a school is compared.
pub fn summary_table(summary: &DashboardSummary, with_comparison: bool) -> Table {
    let mut header = vec![
        header_cell("Measure"),
        header_cell("School"),
        header_cell("National"),
        header_cell("Δ National"),
    ];
    if with_comparison {
        header.push(header_cell("Comparison"));
        header.push(header_cell("Δ Comparison"));
    }

    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for column in 1..if with_comparison { 6 } else { 4 } {
        align_column(&mut table, column, CellAlignment::Right);
    }

    let rows = SCORE_CARD_GROUPS
        .iter()
        .map(|group| (*group, summary.indicator(group), Measure::Score))
        .chain([
            ("Mobbing", summary.bullying, Measure::Percent(1)),
            ("Deltakelse", summary.participation, Measure::Percent(0)),
        ]);
    for (label, bench, measure) in rows {
        table.add_row(benchmark_row(label, &bench, measure, with_comparison));
    }
    table
}

fn benchmark_row(
    label: &str,
    bench: &Benchmark,
    measure: Measure,
    with_comparison: bool,
) -> Vec<Cell> {
    let value = |v: Option<f64>| match v {
        Some(v) => Cell::new(measure.format(v)),
        None => dim_cell(MISSING),
    };
    let mut row = vec![
        Cell::new(label).add_attribute(Attribute::Bold),
        value(bench.school),
        value(bench.national),
        delta_cell(bench.delta_national()),
    ];
    if with_comparison {
        row.push(value(bench.comparison));
        row.push(delta_cell(bench.delta_comparison()));
    }
    row
}

pub fn indicator_bar_table(bars: &[IndicatorBar]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Indikator"), header_cell("Score")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for bar in bars {
        table.add_row(vec![Cell::new(&bar.group), Cell::new(format_score(bar.score))]);
    }
    table
}

pub fn theme_summary_table(themes: &[ThemeSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tema"),
        header_cell("Score"),
        header_cell("Besvart"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for theme in themes {
        table.add_row(vec![
            Cell::new(&theme.theme),
            Cell::new(format_score(theme.score)),
            count_cell(theme.answered),
        ]);
    }
    table
}

pub fn bullying_bar_table(bars: &[BullyingBar]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Mobbing"),
        header_cell("Andel"),
        header_cell("Besvart"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for bar in bars {
        table.add_row(vec![
            Cell::new(&bar.group),
            Cell::new(format_percent(bar.share, 1)),
            count_cell(bar.answered),
        ]);
    }
    table
}

/// One row per year, one column per series key.
pub fn trend_table(points: &[TrendPoint], measure_is_percent: bool) -> Table {
    let keys = trend_keys(points);
    let measure = if measure_is_percent {
        Measure::Percent(1)
    } else {
        Measure::Score
    };

    let mut header = vec![header_cell("År")];
    header.extend(keys.iter().map(|key| header_cell(key)));
    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for column in 1..=keys.len() {
        align_column(&mut table, column, CellAlignment::Right);
    }

    for point in points {
        let mut row = vec![Cell::new(&point.year).add_attribute(Attribute::Bold)];
        row.extend(keys.iter().map(|key| match point.get(key) {
            Some(value) => Cell::new(measure.format(value)),
            None => dim_cell(MISSING),
        }));
        table.add_row(row);
    }
    table
}

pub fn indicator_rows_table(rows: &[IndicatorRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("År"),
        header_cell("Trinn"),
        header_cell("Gruppe"),
        header_cell("Spørsmål"),
        header_cell("Score"),
        header_cell("Std.avvik"),
        header_cell("Besvart"),
    ]);
    apply_table_style(&mut table);
    for index in 4..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(vec![
            text_cell(row.year_label()),
            text_cell(row.trinn()),
            text_cell(row.group()),
            text_cell(row.question()),
            score_cell(row.score()),
            deviation_cell(row.standard_deviation()),
            count_cell(row.answered()),
        ]);
    }
    table
}

pub fn theme_rows_table(page: &DetailPage<ThemeRow>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("År"),
        header_cell("Tema"),
        header_cell("Spørsmål"),
        header_cell("Svar"),
        header_cell("Score"),
        header_cell("Andel"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for row in &page.rows {
        table.add_row(vec![
            text_cell(row.year_label()),
            Cell::new(row.theme_name()),
            text_cell(row.question()),
            text_cell(row.answer_option()),
            score_cell(row.score()),
            percent_cell(row.answer_share(), 1),
        ]);
    }
    table
}

/// Footer for a truncated theme page, e.g. `showing first 200 of 512 rows`.
pub fn truncation_note<T>(page: &DetailPage<T>) -> Option<String> {
    page.is_truncated()
        .then(|| format!("showing first {} of {} rows", page.rows.len(), page.total))
}

pub fn bullying_rows_table(rows: &[BullyingRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("År"),
        header_cell("Trinn"),
        header_cell("Kjønn"),
        header_cell("Spørsmål"),
        header_cell("Andel mobbet"),
        header_cell("Besvart"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            text_cell(row.year_label()),
            text_cell(row.trinn()),
            text_cell(row.kjoenn()),
            text_cell(row.question()),
            percent_cell(row.bullied_share(), 1),
            count_cell(row.answered()),
        ]);
    }
    table
}

pub fn participation_rows_table(rows: &[ParticipationRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("År"),
        header_cell("Trinn"),
        header_cell("Eierform"),
        header_cell("Invitert"),
        header_cell("Besvart"),
        header_cell("Deltakelse"),
    ]);
    apply_table_style(&mut table);
    for column in 3..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(vec![
            text_cell(row.year_label()),
            text_cell(row.trinn()),
            text_cell(row.ownership()),
            count_cell(row.invited()),
            count_cell(row.answered()),
            percent_cell(row.participation_share(), 0),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell(MISSING),
    }
}

fn score_cell(value: Option<f64>) -> Cell {
    value.map_or_else(|| dim_cell(MISSING), |v| Cell::new(format_score(v)))
}

fn percent_cell(value: Option<f64>, decimals: usize) -> Cell {
    value.map_or_else(
        || dim_cell(MISSING),
        |v| Cell::new(format_percent(v, decimals)),
    )
}

fn deviation_cell(value: Option<f64>) -> Cell {
    value.map_or_else(|| dim_cell(MISSING), |v| Cell::new(format!("{v:.2}")))
}

fn count_cell(value: Option<f64>) -> Cell {
    value.map_or_else(|| dim_cell(MISSING), |v| Cell::new(format!("{v:.0}")))
}

fn delta_cell(delta: Option<f64>) -> Cell {
    match delta {
        Some(value) => {
            let color = if value > 0.0 {
                Color::Green
            } else if value < 0.0 {
                Color::Red
            } else {
                Color::Reset
            };
            Cell::new(format_delta(value)).fg(color)
        }
        None => dim_cell(MISSING),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
