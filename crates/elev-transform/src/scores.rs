//! Scalar extraction for score cards.

use std::collections::BTreeMap;

use elev_model::{BullyingRow, IndicatorRow, ParticipationRow, SurveyRow};

/// Bullying group preferred for the headline share.
pub const BULLYING_AT_SCHOOL: &str = "Mobbing på skolen";

/// Indicator group name to score (0 to 5) from the group total rows.
///
/// Duplicate groups overwrite; the last row wins.
pub fn indicator_scores(rows: &[IndicatorRow]) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    for row in rows.iter().filter(|row| row.is_group_total()) {
        if let (Some(group), Some(score)) = (row.group(), row.score()) {
            scores.insert(group.to_string(), score);
        }
    }
    scores
}

/// Share of students reporting bullying, in percent.
///
/// Prefers the "Mobbing på skolen" total and falls back to the first total
/// row of any group.
pub fn bullying_share(rows: &[BullyingRow]) -> Option<f64> {
    let totals = || rows.iter().filter(|row| row.is_group_total());
    totals()
        .find(|row| row.group() == Some(BULLYING_AT_SCHOOL))
        .or_else(|| totals().next())
        .and_then(BullyingRow::bullied_share)
}

/// Participation rate in percent.
///
/// An all-grades row is used as-is; otherwise the per-grade rates are
/// averaged without weighting.
pub fn participation_rate(rows: &[ParticipationRow]) -> Option<f64> {
    if let Some(all) = rows
        .iter()
        .find(|row| row.trinn().is_some_and(|trinn| trinn.contains("Alle")))
    {
        return all.participation_share();
    }
    mean(rows.iter().filter_map(ParticipationRow::participation_share))
}

/// Unweighted arithmetic mean; `None` for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}
