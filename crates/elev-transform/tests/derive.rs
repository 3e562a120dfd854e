//! Derivations over a small two-year data set.

use elev_model::{
    ALL_ANSWERS, ALL_GENDERS, ALL_QUESTIONS, BullyingRow, DataContext, IndicatorRow,
    ParticipationRow, Selection, SurveyRow, TableSet, ThemeRow, YearId, format_delta,
};
use elev_transform::{
    BullyingBar, DashboardSummary, bullying_bars, bullying_trend, bullying_types, filter_tables,
    indicator_details, indicator_scores, indicator_trend, main_indicator_trend,
    participation_trend, theme_summary, theme_trend, trend_keys,
};

const Y1: YearId = YearId::new(20222023);
const Y2: YearId = YearId::new(20232024);

fn indicator(year: &str, group: &str, score: &str) -> IndicatorRow {
    IndicatorRow {
        skoleaar: Some(year.to_string()),
        gruppe: Some(group.to_string()),
        kjoenn: Some(ALL_GENDERS.to_string()),
        spoersmaal: Some(ALL_QUESTIONS.to_string()),
        score: Some(score.to_string()),
        ..IndicatorRow::default()
    }
}

fn theme(year: &str, name: &str, score: &str) -> ThemeRow {
    ThemeRow {
        skoleaar: Some(year.to_string()),
        temanavn: Some(name.to_string()),
        kjoenn: Some(ALL_GENDERS.to_string()),
        svaralternativ: Some(ALL_ANSWERS.to_string()),
        score: Some(score.to_string()),
        ..ThemeRow::default()
    }
}

fn bullying(year: &str, group: &str, share: &str) -> BullyingRow {
    BullyingRow {
        skoleaar: Some(year.to_string()),
        gruppe: Some(group.to_string()),
        kjoenn: Some(ALL_GENDERS.to_string()),
        spoersmaal: Some(ALL_QUESTIONS.to_string()),
        andel_mobbet: Some(share.to_string()),
        ..BullyingRow::default()
    }
}

fn participation(year: &str, trinn: Option<&str>, share: &str) -> ParticipationRow {
    ParticipationRow {
        skoleaar: Some(year.to_string()),
        trinn: trinn.map(str::to_string),
        andel_deltatt: Some(share.to_string()),
        ..ParticipationRow::default()
    }
}

fn school() -> TableSet {
    TableSet {
        indikatorer: vec![
            indicator("2022-23", "Trivsel", "4,1"),
            indicator("2023-24", "Trivsel", "4,2"),
            indicator("2023-24", "Mestring", "3,9"),
            indicator("2023-24", "Elevdemokrati og medvirkning", "3,5"),
        ],
        temaer: vec![
            theme("2023-24", "Arbeidsro", "3,0"),
            theme("2023-24", "Arbeidsro", "4,0"),
        ],
        mobbing: vec![bullying("2023-24", "Mobbing på skolen", "6,3")],
        deltakelse: vec![
            participation("2022-23", Some("Vg trinn 1"), "88"),
            participation("2023-24", None, "91,5"),
        ],
    }
}

fn national() -> TableSet {
    TableSet {
        indikatorer: vec![indicator("2023-24", "Trivsel", "4,0")],
        mobbing: vec![bullying("2023-24", "Mobbing på skolen", "7,1")],
        ..TableSet::default()
    }
}

#[test]
fn indicator_score_from_single_row() {
    let rows = vec![indicator("2023-24", "Trivsel", "4,2")];
    let scores = indicator_scores(&rows);
    assert_eq!(scores.len(), 1);
    assert_eq!(scores.get("Trivsel"), Some(&4.2));
}

#[test]
fn delta_against_national() {
    let selection = Selection::default().with_year(Some(Y2));
    let context = DataContext::new(school(), national());
    let summary = DashboardSummary::compute(&context, &selection);

    let trivsel = summary.indicator("Trivsel");
    assert_eq!(trivsel.school, Some(4.2));
    assert_eq!(trivsel.national, Some(4.0));
    assert_eq!(
        trivsel.delta_national().map(format_delta).as_deref(),
        Some("+0.2")
    );

    let mestring = summary.indicator("Mestring");
    assert_eq!(mestring.school, Some(3.9));
    assert_eq!(mestring.delta_national(), None);
    assert_eq!(mestring.delta_comparison(), None);

    let bullying = summary.bullying.delta_national().map(format_delta);
    assert_eq!(bullying.as_deref(), Some("-0.8"));
    assert_eq!(summary.participation.school, Some(91.5));
    assert_eq!(summary.participation.national, None);
}

#[test]
fn comparison_context_fills_third_column() {
    let selection = Selection::default().with_year(Some(Y2));
    let mut context = DataContext::new(school(), national());
    context.comparison = Some(TableSet {
        indikatorer: vec![indicator("2023-24", "Trivsel", "4,5")],
        ..TableSet::default()
    });

    let summary = DashboardSummary::compute(&context, &selection);
    let trivsel = summary.indicator("Trivsel");
    assert_eq!(trivsel.comparison, Some(4.5));
    assert_eq!(
        trivsel.delta_comparison().map(format_delta).as_deref(),
        Some("-0.3")
    );
}

#[test]
fn sparse_trend_keeps_years_without_rows() {
    let rows = vec![indicator("2022-23", "Trivsel", "4,1")];
    let trend = indicator_trend(&rows, &[Y2, Y1]);

    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].year, "2022-23");
    assert_eq!(trend[0].get("Trivsel"), Some(4.1));
    assert_eq!(trend[1].year, "2023-24");
    assert!(trend[1].is_empty());
}

#[test]
fn indicator_trend_matches_year_id() {
    let mut row = indicator("", "Trivsel", "4,0");
    row.skoleaar = None;
    row.tid_id = Some("20232024".to_string());
    let trend = indicator_trend(&[row.clone()], &[Y2]);
    assert_eq!(trend[0].get("Trivsel"), Some(4.0));

    // The overview trend matches by label only.
    let main = main_indicator_trend(&[row], &[Y2]);
    assert!(main[0].is_empty());
}

#[test]
fn main_trend_shape() {
    let trend = main_indicator_trend(&school().indikatorer, &[Y1, Y2]);
    insta::assert_json_snapshot!(trend, @r#"
    [
      {
        "year": "2022-23",
        "Trivsel": 4.1
      },
      {
        "year": "2023-24",
        "Trivsel": 4.2,
        "Mestring": 3.9
      }
    ]
    "#);
    assert_eq!(trend_keys(&trend), vec!["Trivsel", "Mestring"]);
}

#[test]
fn participation_trend_uses_unknown_for_missing_grade() {
    let trend = participation_trend(&school().deltakelse, &[Y1, Y2]);
    assert_eq!(trend[0].get("Vg trinn 1"), Some(88.0));
    assert_eq!(trend[1].get("Ukjent"), Some(91.5));
    assert_eq!(trend_keys(&trend), vec!["Vg trinn 1", "Ukjent"]);
}

#[test]
fn theme_views_average_scores() {
    let summary = theme_summary(&school().temaer);
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].score, 3.5);
    assert_eq!(summary[0].answered, None);

    let trend = theme_trend(&school().temaer, &[Y1, Y2]);
    assert!(trend[0].is_empty());
    assert_eq!(trend[1].get("Arbeidsro"), Some(3.5));
}

#[test]
fn year_filter_applies_to_every_table() {
    let selection = Selection::default().with_year(Some(Y1));
    let filtered = filter_tables(&school(), &selection);
    assert_eq!(filtered.indikatorer.len(), 1);
    assert!(filtered.temaer.is_empty());
    assert!(filtered.mobbing.is_empty());
    assert_eq!(filtered.deltakelse.len(), 1);
}

fn bullying_rows() -> Vec<BullyingRow> {
    let mut no_share = bullying("2023-24", "Mobbet av voksne", "");
    no_share.andel_mobbet = None;
    let mut girls = bullying("2023-24", "Mobbing på skolen", "9,9");
    girls.kjoenn = Some("Jente".to_string());
    vec![
        bullying("2022-23", "Mobbing på skolen", "7,0"),
        bullying("2023-24", "Mobbing på skolen", "6,3"),
        no_share,
        girls,
        bullying("2023-24", "Digital mobbing", "2,1"),
    ]
}

#[test]
fn bullying_trend_reads_group_totals_per_year() {
    let y3 = YearId::new(20242025);
    let trend = bullying_trend(&bullying_rows(), &[Y1, Y2, y3]);

    assert_eq!(trend.len(), 3);
    assert_eq!(trend[0].get("Mobbing på skolen"), Some(7.0));
    assert_eq!(trend[0].get("Digital mobbing"), None);
    // The girls-only row must not replace the total.
    assert_eq!(trend[1].get("Mobbing på skolen"), Some(6.3));
    assert_eq!(trend[1].get("Digital mobbing"), Some(2.1));
    assert_eq!(trend[1].get("Mobbet av voksne"), None);
    assert_eq!(trend[2].year, "2024-25");
    assert!(trend[2].is_empty());
    assert_eq!(
        trend_keys(&trend),
        vec!["Mobbing på skolen", "Digital mobbing"]
    );
}

#[test]
fn bullying_bars_skip_rows_without_share() {
    let latest: Vec<BullyingRow> = bullying_rows()
        .into_iter()
        .filter(|row| row.skoleaar.as_deref() == Some("2023-24"))
        .collect();
    let bars = bullying_bars(&latest);

    assert_eq!(
        bars,
        vec![
            BullyingBar {
                group: "Mobbing på skolen".to_string(),
                share: 6.3,
                answered: None,
            },
            BullyingBar {
                group: "Digital mobbing".to_string(),
                share: 2.1,
                answered: None,
            },
        ]
    );
}

#[test]
fn bullying_types_keep_first_seen_order() {
    assert_eq!(
        bullying_types(&bullying_rows()),
        vec!["Mobbing på skolen", "Mobbet av voksne", "Digital mobbing"]
    );
    assert!(bullying_types(&[]).is_empty());
}

#[test]
fn indicator_details_keep_all_genders_rows() {
    let mut girls = indicator("2023-24", "Trivsel", "4,4");
    girls.kjoenn = Some("Jente".to_string());
    let mut unknown = indicator("2023-24", "Trivsel", "4,1");
    unknown.kjoenn = None;
    let rows = vec![girls, indicator("2023-24", "Mestring", "3,9"), unknown];

    let details = indicator_details(&rows);

    assert_eq!(details.len(), 1);
    assert_eq!(details[0].group(), Some("Mestring"));
    assert_eq!(details[0].kjoenn(), Some(ALL_GENDERS));
}
