use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ModelError;

/// Identifier of a school year span, e.g. `20232024`.
///
/// Ordering is numeric, which is also chronological for well-formed ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct YearId(u32);

impl YearId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Display label such as `"2023-24"`.
    ///
    /// The first four digits are taken as the start year. Ids shorter than
    /// four digits are not rejected; the whole number is then used as the
    /// start year, so callers should only pass eight-digit ids.
    pub fn label(self) -> String {
        let digits = self.0.to_string();
        let head = digits.get(..4).unwrap_or(&digits);
        let start: u32 = head.parse().unwrap_or_default();
        format!("{start}-{:02}", (start + 1) % 100)
    }
}

impl fmt::Display for YearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for YearId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ModelError::InvalidYearId(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for YearId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self(value)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Returns a new ascending copy of `ids`; the input is left untouched.
pub fn sort_year_ids(ids: &[YearId]) -> Vec<YearId> {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted
}

/// Norwegian organization number of a school.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct OrgNr(String);

impl OrgNr {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ModelError::InvalidOrgNr(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgNr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrgNr {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_start_year() {
        assert_eq!(YearId::new(20232024).label(), "2023-24");
        assert_eq!(YearId::new(20192020).label(), "2019-20");
        assert_eq!(YearId::new(19992000).label(), "1999-00");
    }

    #[test]
    fn sort_returns_copy() {
        let input = vec![
            YearId::new(20222023),
            YearId::new(20202021),
            YearId::new(20212022),
        ];
        let sorted = sort_year_ids(&input);
        assert_eq!(
            sorted,
            vec![
                YearId::new(20202021),
                YearId::new(20212022),
                YearId::new(20222023)
            ]
        );
        assert_eq!(input[0], YearId::new(20222023));
    }

    #[test]
    fn year_id_accepts_numbers_and_strings() {
        let ids: Vec<YearId> = serde_json::from_str(r#"[20222023, "20232024"]"#).unwrap();
        assert_eq!(ids, vec![YearId::new(20222023), YearId::new(20232024)]);
    }

    #[test]
    fn org_nr_rejects_non_digits() {
        assert!(OrgNr::new("988602671").is_ok());
        assert_eq!(
            OrgNr::new("98A"),
            Err(ModelError::InvalidOrgNr("98A".to_string()))
        );
        assert!(OrgNr::new("  ").is_err());
    }
}
