//! Bar chart data, distinct series names and detail table rows.

use std::collections::HashSet;

use serde::Serialize;

use elev_model::{
    ALL_ANSWERS, ALL_GENDERS, BullyingRow, IndicatorRow, SurveyRow, ThemeRow, UNKNOWN_LABEL,
};

use crate::scores::mean;

/// Maximum number of theme detail rows shown at once.
pub const THEME_DETAIL_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorBar {
    pub group: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeSummary {
    pub theme: String,
    /// Mean score over the theme's rows.
    pub score: f64,
    /// Largest respondent count among the theme's rows.
    pub answered: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BullyingBar {
    pub group: String,
    pub share: f64,
    pub answered: Option<f64>,
}

/// A truncated view over a longer row list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPage<T> {
    pub rows: Vec<T>,
    pub total: usize,
}

impl<T> DetailPage<T> {
    pub fn is_truncated(&self) -> bool {
        self.total > self.rows.len()
    }
}

pub fn indicator_bars(rows: &[IndicatorRow]) -> Vec<IndicatorBar> {
    rows.iter()
        .filter(|row| row.is_group_total())
        .filter_map(|row| {
            Some(IndicatorBar {
                group: row.group()?.to_string(),
                score: row.score()?,
            })
        })
        .collect()
}

/// Indicator groups with a total row, in first-seen order.
pub fn indicator_groups(rows: &[IndicatorRow]) -> Vec<String> {
    distinct(
        rows.iter()
            .filter(|row| row.is_group_total())
            .filter_map(IndicatorRow::group),
    )
}

/// Per-theme summary of the all-answers rows. Themes without any numeric
/// score are dropped.
pub fn theme_summary(rows: &[ThemeRow]) -> Vec<ThemeSummary> {
    let mut grouped: Vec<(&str, Vec<&ThemeRow>)> = Vec::new();
    for row in rows.iter().filter(|row| row.is_answer_total()) {
        let name = row.theme_name();
        match grouped.iter_mut().find(|(theme, _)| *theme == name) {
            Some((_, members)) => members.push(row),
            None => grouped.push((name, vec![row])),
        }
    }

    grouped
        .into_iter()
        .filter_map(|(theme, members)| {
            let score = mean(members.iter().filter_map(|row| row.score()))?;
            let answered = members
                .iter()
                .filter_map(|row| row.answered())
                .reduce(f64::max);
            Some(ThemeSummary {
                theme: theme.to_string(),
                score,
                answered,
            })
        })
        .collect()
}

/// Named themes with an all-answers row, in first-seen order.
pub fn themes(rows: &[ThemeRow]) -> Vec<String> {
    distinct(
        rows.iter()
            .filter(|row| row.answer_option() == Some(ALL_ANSWERS))
            .map(ThemeRow::theme_name)
            .filter(|name| *name != UNKNOWN_LABEL),
    )
}

pub fn bullying_bars(rows: &[BullyingRow]) -> Vec<BullyingBar> {
    rows.iter()
        .filter(|row| row.is_group_total())
        .filter_map(|row| {
            Some(BullyingBar {
                group: row.group()?.to_string(),
                share: row.bullied_share()?,
                answered: row.answered(),
            })
        })
        .collect()
}

/// Bullying groups with a total row, in first-seen order.
pub fn bullying_types(rows: &[BullyingRow]) -> Vec<String> {
    distinct(
        rows.iter()
            .filter(|row| row.is_group_total())
            .filter_map(BullyingRow::group),
    )
}

/// Indicator rows for all genders.
pub fn indicator_details(rows: &[IndicatorRow]) -> Vec<IndicatorRow> {
    rows.iter()
        .filter(|row| row.kjoenn() == Some(ALL_GENDERS))
        .cloned()
        .collect()
}

/// Theme rows for all genders, capped at `limit`.
pub fn theme_details(rows: &[ThemeRow], limit: usize) -> DetailPage<ThemeRow> {
    let matching: Vec<&ThemeRow> = rows
        .iter()
        .filter(|row| row.kjoenn() == Some(ALL_GENDERS))
        .collect();
    DetailPage {
        total: matching.len(),
        rows: matching.into_iter().take(limit).cloned().collect(),
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use elev_model::ALL_QUESTIONS;

    use super::*;

    fn theme(name: &str, score: &str, answered: &str) -> ThemeRow {
        ThemeRow {
            temanavn: Some(name.to_string()),
            kjoenn: Some(ALL_GENDERS.to_string()),
            svaralternativ: Some(ALL_ANSWERS.to_string()),
            score: Some(score.to_string()),
            antall_besvart: Some(answered.to_string()),
            ..ThemeRow::default()
        }
    }

    #[test]
    fn theme_summary_averages_and_takes_max_count() {
        let rows = vec![
            theme("Arbeidsro", "3,0", "120"),
            theme("Trivsel", "4,5", "110"),
            theme("Arbeidsro", "4,0", "140"),
            theme("Tom", "", "5"),
        ];
        let summary = theme_summary(&rows);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].theme, "Arbeidsro");
        assert_eq!(summary[0].score, 3.5);
        assert_eq!(summary[0].answered, Some(140.0));
        assert_eq!(summary[1].theme, "Trivsel");
    }

    #[test]
    fn themes_skip_unknown_names() {
        let mut unnamed = theme("x", "3", "1");
        unnamed.temanavn = None;
        let rows = vec![theme("Arbeidsro", "3", "1"), unnamed, theme("Arbeidsro", "4", "1")];
        assert_eq!(themes(&rows), vec!["Arbeidsro".to_string()]);
    }

    #[test]
    fn groups_are_distinct_in_order() {
        let row = |group: &str| IndicatorRow {
            gruppe: Some(group.to_string()),
            kjoenn: Some(ALL_GENDERS.to_string()),
            spoersmaal: Some(ALL_QUESTIONS.to_string()),
            ..IndicatorRow::default()
        };
        let rows = vec![row("Trivsel"), row("Mestring"), row("Trivsel")];
        assert_eq!(indicator_groups(&rows), vec!["Trivsel", "Mestring"]);
        assert!(indicator_bars(&rows).is_empty());
    }

    #[test]
    fn theme_details_are_capped() {
        let rows: Vec<ThemeRow> = (0..250).map(|_| theme("T", "3", "1")).collect();
        let page = theme_details(&rows, THEME_DETAIL_LIMIT);
        assert_eq!(page.rows.len(), 200);
        assert_eq!(page.total, 250);
        assert!(page.is_truncated());
    }
}
