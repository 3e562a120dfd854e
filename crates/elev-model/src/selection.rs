use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, YearId};

/// Grade level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Trinn {
    #[default]
    Alle,
    Vg1,
    Vg2,
    Vg3,
}

impl Trinn {
    /// Substring searched for in a row's `Trinnnavn`; `None` means no filter.
    pub const fn filter_token(self) -> Option<&'static str> {
        match self {
            Self::Alle => None,
            Self::Vg1 => Some("trinn 1"),
            Self::Vg2 => Some("trinn 2"),
            Self::Vg3 => Some("trinn 3"),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Alle => "Alle",
            Self::Vg1 => "Vg1",
            Self::Vg2 => "Vg2",
            Self::Vg3 => "Vg3",
        }
    }
}

impl fmt::Display for Trinn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Trinn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alle" => Ok(Self::Alle),
            "vg1" => Ok(Self::Vg1),
            "vg2" => Ok(Self::Vg2),
            "vg3" => Ok(Self::Vg3),
            _ => Err(ModelError::InvalidTrinn(s.to_string())),
        }
    }
}

/// Gender filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Kjoenn {
    #[default]
    Alle,
    Gutt,
    Jente,
}

impl Kjoenn {
    /// Substring searched for in a row's `Kjoenn`; `None` means no filter.
    pub const fn filter_token(self) -> Option<&'static str> {
        match self {
            Self::Alle => None,
            Self::Gutt => Some("Gutt"),
            Self::Jente => Some("Jente"),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Alle => "Alle",
            Self::Gutt => "Gutt",
            Self::Jente => "Jente",
        }
    }
}

impl fmt::Display for Kjoenn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Kjoenn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alle" => Ok(Self::Alle),
            "gutt" => Ok(Self::Gutt),
            "jente" => Ok(Self::Jente),
            _ => Err(ModelError::InvalidKjoenn(s.to_string())),
        }
    }
}

/// Current filter selection.
///
/// `year == None` means no year filter; it only occurs before the first
/// load has resolved the available years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    pub year: Option<YearId>,
    pub trinn: Trinn,
    pub kjoenn: Kjoenn,
}

impl Selection {
    #[must_use]
    pub fn with_year(mut self, year: Option<YearId>) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn with_trinn(mut self, trinn: Trinn) -> Self {
        self.trinn = trinn;
        self
    }

    #[must_use]
    pub fn with_kjoenn(mut self, kjoenn: Kjoenn) -> Self {
        self.kjoenn = kjoenn;
        self
    }

    /// True when the selection keeps every row.
    pub fn is_identity(&self) -> bool {
        self.year.is_none() && self.trinn == Trinn::Alle && self.kjoenn == Kjoenn::Alle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("vg2".parse::<Trinn>(), Ok(Trinn::Vg2));
        assert_eq!("JENTE".parse::<Kjoenn>(), Ok(Kjoenn::Jente));
        assert!("Vg4".parse::<Trinn>().is_err());
    }

    #[test]
    fn default_selection_is_identity() {
        assert!(Selection::default().is_identity());
        assert!(
            !Selection::default()
                .with_year(Some(YearId::new(20232024)))
                .is_identity()
        );
    }
}
