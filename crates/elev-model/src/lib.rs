//! Data model for the school climate survey pipeline.
//!
//! Everything here is plain data: identifiers, the four typed survey tables,
//! the user selection that drives filtering, and the tag that records where a
//! fetched payload came from.

pub mod dataset;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod rows;
pub mod selection;
pub mod source;
pub mod table;

pub use dataset::{DataContext, TableSet};
pub use error::{ModelError, Result};
pub use ids::{OrgNr, YearId, sort_year_ids};
pub use numeric::{format_delta, format_percent, format_score, parse_locale_number};
pub use rows::{
    ALL_ANSWERS, ALL_GENDERS, ALL_QUESTIONS, BullyingRow, IndicatorRow, ParticipationRow,
    SurveyRow, ThemeRow, UNKNOWN_LABEL,
};
pub use selection::{Kjoenn, Selection, Trinn};
pub use source::{DataSourceMode, Sourced};
pub use table::TableKind;
