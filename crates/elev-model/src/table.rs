use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// The four survey tables published by the statistics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Indicator scores on the 1-5 scale.
    Indikatorer,
    /// Theme scores and answer distributions.
    Temaer,
    /// Bullying incidence percentages.
    Mobbing,
    /// Participation and response rates.
    Deltakelse,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Indikatorer,
        TableKind::Temaer,
        TableKind::Mobbing,
        TableKind::Deltakelse,
    ];

    /// Numeric table id in the statistics API.
    pub const fn table_id(self) -> u32 {
        match self {
            Self::Indikatorer => 152,
            Self::Temaer => 153,
            Self::Mobbing => 154,
            Self::Deltakelse => 155,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Indikatorer => "indikatorer",
            Self::Temaer => "temaer",
            Self::Mobbing => "mobbing",
            Self::Deltakelse => "deltakelse",
        }
    }

    /// File name of the bundled snapshot, e.g. `tabell_152.json`.
    pub fn snapshot_file_name(self) -> String {
        format!("tabell_{}.json", self.table_id())
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TableKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == needle || kind.table_id().to_string() == needle)
            .ok_or_else(|| ModelError::UnknownTable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_files() {
        assert_eq!(TableKind::Indikatorer.table_id(), 152);
        assert_eq!(TableKind::Deltakelse.snapshot_file_name(), "tabell_155.json");
    }

    #[test]
    fn parses_key_or_id() {
        assert_eq!("Mobbing".parse::<TableKind>(), Ok(TableKind::Mobbing));
        assert_eq!("153".parse::<TableKind>(), Ok(TableKind::Temaer));
        assert!("elever".parse::<TableKind>().is_err());
    }
}
