use serde::{Deserialize, Serialize};

use crate::rows::{BullyingRow, IndicatorRow, ParticipationRow, ThemeRow};
use crate::table::TableKind;

/// The four survey tables fetched for one organization context.
///
/// All four were requested for the same set of years, but each table has
/// its own row shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    pub indikatorer: Vec<IndicatorRow>,
    pub temaer: Vec<ThemeRow>,
    pub mobbing: Vec<BullyingRow>,
    pub deltakelse: Vec<ParticipationRow>,
}

impl TableSet {
    pub fn row_count(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Indikatorer => self.indikatorer.len(),
            TableKind::Temaer => self.temaer.len(),
            TableKind::Mobbing => self.mobbing.len(),
            TableKind::Deltakelse => self.deltakelse.len(),
        }
    }

    pub fn total_rows(&self) -> usize {
        TableKind::ALL.iter().map(|kind| self.row_count(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }
}

/// Raw data for the subject school, the national aggregate and an optional
/// comparison school.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataContext {
    pub school: TableSet,
    pub national: TableSet,
    pub comparison: Option<TableSet>,
}

impl DataContext {
    pub fn new(school: TableSet, national: TableSet) -> Self {
        Self {
            school,
            national,
            comparison: None,
        }
    }
}
