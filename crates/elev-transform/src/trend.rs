//! Per-year trend series.
//!
//! Every series has one point per requested year in ascending order. A year
//! without matching rows still gets a point that carries only its label.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use elev_model::{
    BullyingRow, IndicatorRow, ParticipationRow, SurveyRow, ThemeRow, UNKNOWN_LABEL, YearId,
    sort_year_ids,
};

use crate::scores::mean;

/// Headline indicator groups shown on the overview trend.
pub const MAIN_INDICATORS: [&str; 6] = [
    "Trivsel",
    "Mestring",
    "Læringskultur",
    "Motivasjon",
    "Støtte fra lærerne",
    "Vurdering for læring",
];

/// One point of a trend series: a school year label plus named values.
///
/// Values keep insertion order; setting an existing key replaces its value
/// in place. Serializes as a flat map with a `year` entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendPoint {
    pub year: String,
    values: Vec<(String, f64)>,
}

impl TrendPoint {
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            values: Vec::new(),
        }
    }

    pub fn set(&mut self, key: &str, value: f64) {
        match self.values.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values
            .iter()
            .find_map(|(k, v)| (k == key).then_some(*v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }

    /// True when the point carries no values besides its year.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for TrendPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("year", &self.year)?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Builds one point per sorted year from the rows selected for it.
fn series<'a, R: 'a>(
    year_ids: &[YearId],
    rows: &'a [R],
    selects: impl Fn(&R, YearId, &str) -> bool,
    mut fill: impl FnMut(&mut TrendPoint, Vec<&'a R>),
) -> Vec<TrendPoint> {
    sort_year_ids(year_ids)
        .into_iter()
        .map(|year| {
            let label = year.label();
            let matching: Vec<&R> = rows
                .iter()
                .filter(|row| selects(*row, year, &label))
                .collect();
            let mut point = TrendPoint::new(label);
            fill(&mut point, matching);
            point
        })
        .collect()
}

fn has_label<R: SurveyRow>(row: &R, label: &str) -> bool {
    row.year_label() == Some(label)
}

/// Scores of every indicator group. A row belongs to a year by `TidID` or
/// by label.
pub fn indicator_trend(rows: &[IndicatorRow], year_ids: &[YearId]) -> Vec<TrendPoint> {
    series(
        year_ids,
        rows,
        |row, year, label| {
            let by_id = row.year_id() == Some(year.to_string().as_str());
            (by_id || has_label(row, label)) && row.is_group_total()
        },
        |point, matching| {
            for row in matching {
                if let (Some(group), Some(score)) = (row.group(), row.score()) {
                    point.set(group, score);
                }
            }
        },
    )
}

/// Scores of the [`MAIN_INDICATORS`] only.
pub fn main_indicator_trend(rows: &[IndicatorRow], year_ids: &[YearId]) -> Vec<TrendPoint> {
    series(
        year_ids,
        rows,
        |row, _, label| has_label(row, label) && row.is_group_total(),
        |point, matching| {
            for row in matching {
                let Some(group) = row.group().filter(|g| MAIN_INDICATORS.contains(g)) else {
                    continue;
                };
                if let Some(score) = row.score() {
                    point.set(group, score);
                }
            }
        },
    )
}

/// Mean score per theme.
pub fn theme_trend(rows: &[ThemeRow], year_ids: &[YearId]) -> Vec<TrendPoint> {
    series(
        year_ids,
        rows,
        |row, _, label| has_label(row, label) && row.is_answer_total(),
        |point, matching| {
            let mut by_theme: Vec<(&str, Vec<f64>)> = Vec::new();
            for row in matching {
                let Some(score) = row.score() else { continue };
                let name = row.theme_name();
                match by_theme.iter_mut().find(|(theme, _)| *theme == name) {
                    Some((_, scores)) => scores.push(score),
                    None => by_theme.push((name, vec![score])),
                }
            }
            for (theme, scores) in by_theme {
                if let Some(avg) = mean(scores) {
                    point.set(theme, avg);
                }
            }
        },
    )
}

/// Bullying share per group.
pub fn bullying_trend(rows: &[BullyingRow], year_ids: &[YearId]) -> Vec<TrendPoint> {
    series(
        year_ids,
        rows,
        |row, _, label| has_label(row, label) && row.is_group_total(),
        |point, matching| {
            for row in matching {
                if let (Some(group), Some(share)) = (row.group(), row.bullied_share()) {
                    point.set(group, share);
                }
            }
        },
    )
}

/// Participation share per grade level.
pub fn participation_trend(rows: &[ParticipationRow], year_ids: &[YearId]) -> Vec<TrendPoint> {
    series(
        year_ids,
        rows,
        |row, _, label| has_label(row, label),
        |point, matching| {
            for row in matching {
                if let Some(share) = row.participation_share() {
                    point.set(row.trinn().unwrap_or(UNKNOWN_LABEL), share);
                }
            }
        },
    )
}

/// Union of value keys across a series, in first-seen order.
pub fn trend_keys(points: &[TrendPoint]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in points.iter().flat_map(TrendPoint::keys) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut point = TrendPoint::new("2023-24");
        point.set("Trivsel", 4.0);
        point.set("Mestring", 3.8);
        point.set("Trivsel", 4.1);
        assert_eq!(point.keys().collect::<Vec<_>>(), vec!["Trivsel", "Mestring"]);
        assert_eq!(point.get("Trivsel"), Some(4.1));
        assert_eq!(point.get("Motivasjon"), None);
    }

    #[test]
    fn serializes_flat() {
        let mut point = TrendPoint::new("2022-23");
        point.set("Vg trinn 1", 91.5);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"year":"2022-23","Vg trinn 1":91.5}"#);
    }

    #[test]
    fn keys_union_in_first_seen_order() {
        let mut a = TrendPoint::new("2021-22");
        a.set("B", 1.0);
        let mut b = TrendPoint::new("2022-23");
        b.set("A", 2.0);
        b.set("B", 3.0);
        assert_eq!(trend_keys(&[a, b]), vec!["B", "A"]);
    }
}
