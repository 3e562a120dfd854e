//! Selection-driven row filtering.
//!
//! The year, grade and gender predicates are conjoined. A row that lacks a
//! grade or gender field is never excluded by that dimension; the table simply
//! does not stratify by it.

use tracing::debug;

use elev_model::{Selection, SurveyRow, TableSet};

/// Predicate built once per selection and applied to many rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    year_label: Option<String>,
    trinn: Option<&'static str>,
    kjoenn: Option<&'static str>,
}

impl RowFilter {
    pub fn new(selection: &Selection) -> Self {
        Self {
            year_label: selection.year.map(|year| year.label()),
            trinn: selection.trinn.filter_token(),
            kjoenn: selection.kjoenn.filter_token(),
        }
    }

    pub fn matches<R: SurveyRow>(&self, row: &R) -> bool {
        self.matches_year(row) && self.matches_trinn(row) && self.matches_kjoenn(row)
    }

    fn matches_year<R: SurveyRow>(&self, row: &R) -> bool {
        match &self.year_label {
            None => true,
            Some(label) => row.year_label() == Some(label.as_str()),
        }
    }

    fn matches_trinn<R: SurveyRow>(&self, row: &R) -> bool {
        match (self.trinn, row.trinn()) {
            (None, _) | (_, None) => true,
            (Some(token), Some(trinn)) => trinn.contains(token),
        }
    }

    fn matches_kjoenn<R: SurveyRow>(&self, row: &R) -> bool {
        match (self.kjoenn, row.kjoenn()) {
            (None, _) | (_, None) => true,
            (Some(token), Some(kjoenn)) => kjoenn.contains(token),
        }
    }

    pub fn apply<R: SurveyRow + Clone>(&self, rows: &[R]) -> Vec<R> {
        rows.iter().filter(|row| self.matches(*row)).cloned().collect()
    }
}

/// Whether a single row passes the selection.
pub fn matches_selection<R: SurveyRow>(row: &R, selection: &Selection) -> bool {
    RowFilter::new(selection).matches(row)
}

/// Rows passing the selection, in their original order.
pub fn filter_rows<R: SurveyRow + Clone>(rows: &[R], selection: &Selection) -> Vec<R> {
    RowFilter::new(selection).apply(rows)
}

/// Filters each of the four tables independently.
pub fn filter_tables(tables: &TableSet, selection: &Selection) -> TableSet {
    let filter = RowFilter::new(selection);
    let filtered = TableSet {
        indikatorer: filter.apply(&tables.indikatorer),
        temaer: filter.apply(&tables.temaer),
        mobbing: filter.apply(&tables.mobbing),
        deltakelse: filter.apply(&tables.deltakelse),
    };
    debug!(
        before = tables.total_rows(),
        after = filtered.total_rows(),
        year = ?selection.year,
        trinn = %selection.trinn,
        kjoenn = %selection.kjoenn,
        "filtered tables"
    );
    filtered
}
