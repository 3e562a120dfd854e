//! Survey data filtering and derivation.
//!
//! This crate turns raw [`TableSet`](elev_model::TableSet)s into what the
//! presentation layer shows:
//!
//! - **filter**: selection-driven row filtering
//! - **scores**: scalar extraction (indicator scores, bullying share, participation)
//! - **charts**: bar data, distinct groups and detail table rows
//! - **trend**: per-year trend series
//! - **benchmark**: school versus national and comparison deltas
//!
//! Every function is pure and synchronous.

pub mod benchmark;
pub mod charts;
pub mod filter;
pub mod scores;
pub mod trend;

pub use benchmark::{Benchmark, DashboardSummary, SCORE_CARD_GROUPS};
pub use charts::{
    BullyingBar, DetailPage, IndicatorBar, THEME_DETAIL_LIMIT, ThemeSummary, bullying_bars,
    bullying_types, indicator_bars, indicator_details, indicator_groups, theme_details,
    theme_summary, themes,
};
pub use filter::{RowFilter, filter_rows, filter_tables, matches_selection};
pub use scores::{BULLYING_AT_SCHOOL, bullying_share, indicator_scores, participation_rate};
pub use trend::{
    MAIN_INDICATORS, TrendPoint, bullying_trend, indicator_trend, main_indicator_trend,
    participation_trend, theme_trend, trend_keys,
};
