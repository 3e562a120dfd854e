//! School versus national and comparison-school benchmarks.

use std::collections::BTreeMap;

use serde::Serialize;

use elev_model::{DataContext, Selection, TableSet};

use crate::filter::filter_tables;
use crate::scores::{bullying_share, indicator_scores, participation_rate};

/// Indicator groups shown as score cards.
pub const SCORE_CARD_GROUPS: [&str; 4] = ["Trivsel", "Mestring", "Læringskultur", "Motivasjon"];

/// One scalar for the subject school and its counterparts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Benchmark {
    pub school: Option<f64>,
    pub national: Option<f64>,
    pub comparison: Option<f64>,
}

impl Benchmark {
    /// School minus national; `None` unless both are present.
    pub fn delta_national(&self) -> Option<f64> {
        Some(self.school? - self.national?)
    }

    /// School minus comparison school; `None` unless both are present.
    pub fn delta_comparison(&self) -> Option<f64> {
        Some(self.school? - self.comparison?)
    }
}

/// Score-card scalars for every context under one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Keyed by indicator group; a group present in any context appears.
    pub indicators: BTreeMap<String, Benchmark>,
    pub bullying: Benchmark,
    pub participation: Benchmark,
}

impl DashboardSummary {
    /// Filters every context with `selection` and summarizes the result.
    pub fn compute(context: &DataContext, selection: &Selection) -> Self {
        let school = filter_tables(&context.school, selection);
        let national = filter_tables(&context.national, selection);
        let comparison = context
            .comparison
            .as_ref()
            .map(|tables| filter_tables(tables, selection));
        Self::from_filtered(&school, &national, comparison.as_ref())
    }

    /// Summarizes tables that are already filtered.
    pub fn from_filtered(
        school: &TableSet,
        national: &TableSet,
        comparison: Option<&TableSet>,
    ) -> Self {
        let school_scores = indicator_scores(&school.indikatorer);
        let national_scores = indicator_scores(&national.indikatorer);
        let comparison_scores = comparison
            .map(|tables| indicator_scores(&tables.indikatorer))
            .unwrap_or_default();

        let mut indicators: BTreeMap<String, Benchmark> = BTreeMap::new();
        for (group, score) in &school_scores {
            indicators.entry(group.clone()).or_default().school = Some(*score);
        }
        for (group, score) in &national_scores {
            indicators.entry(group.clone()).or_default().national = Some(*score);
        }
        for (group, score) in &comparison_scores {
            indicators.entry(group.clone()).or_default().comparison = Some(*score);
        }

        Self {
            indicators,
            bullying: Benchmark {
                school: bullying_share(&school.mobbing),
                national: bullying_share(&national.mobbing),
                comparison: comparison.and_then(|tables| bullying_share(&tables.mobbing)),
            },
            participation: Benchmark {
                school: participation_rate(&school.deltakelse),
                national: participation_rate(&national.deltakelse),
                comparison: comparison.and_then(|tables| participation_rate(&tables.deltakelse)),
            },
        }
    }

    pub fn indicator(&self, group: &str) -> Benchmark {
        self.indicators.get(group).copied().unwrap_or_default()
    }
}
