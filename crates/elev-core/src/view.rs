//! Everything the presentation layer reads for one selection.

use serde::Serialize;

use elev_model::{DataContext, Selection, TableSet, YearId};
use elev_transform::{
    DashboardSummary, TrendPoint, bullying_trend, filter_tables, indicator_trend,
    main_indicator_trend, participation_trend, theme_trend,
};

/// Trend series of the subject school over every available year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trends {
    pub main_indicators: Vec<TrendPoint>,
    pub indicators: Vec<TrendPoint>,
    pub themes: Vec<TrendPoint>,
    pub bullying: Vec<TrendPoint>,
    pub participation: Vec<TrendPoint>,
}

impl Trends {
    /// Trends read the unfiltered school tables; the selection does not
    /// apply to them.
    pub fn compute(school: &TableSet, years: &[YearId]) -> Self {
        Self {
            main_indicators: main_indicator_trend(&school.indikatorer, years),
            indicators: indicator_trend(&school.indikatorer, years),
            themes: theme_trend(&school.temaer, years),
            bullying: bullying_trend(&school.mobbing, years),
            participation: participation_trend(&school.deltakelse, years),
        }
    }
}

/// Filtered tables, score-card summary and trends.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub school: TableSet,
    pub national: TableSet,
    pub comparison: Option<TableSet>,
    pub summary: DashboardSummary,
    pub trends: Trends,
}

impl DashboardView {
    pub fn compute(context: &DataContext, years: &[YearId], selection: &Selection) -> Self {
        let school = filter_tables(&context.school, selection);
        let national = filter_tables(&context.national, selection);
        let comparison = context
            .comparison
            .as_ref()
            .map(|tables| filter_tables(tables, selection));
        let summary = DashboardSummary::from_filtered(&school, &national, comparison.as_ref());

        Self {
            selection: *selection,
            trends: Trends::compute(&context.school, years),
            school,
            national,
            comparison,
            summary,
        }
    }
}
