//! Typed rows for the four survey tables.
//!
//! Field names mirror the upstream JSON. Every field is optional: a table
//! that does not stratify by a dimension simply leaves it `None`, and the
//! filter treats that as "not applicable" rather than as a mismatch.
//! Values are read leniently so a number where text is expected (or the
//! reverse) never fails a whole payload.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::numeric::parse_locale_number;

/// `Kjoenn` value for rows aggregated over all genders.
pub const ALL_GENDERS: &str = "Alle kjønn";
/// `Spoersmaalnavn` value for rows aggregated over all questions in a group.
pub const ALL_QUESTIONS: &str = "Alle spørsmål";
/// `SvaralternativNavn` value for rows aggregated over all answer options.
pub const ALL_ANSWERS: &str = "Alle svar";
/// Placeholder used when a row has no usable name.
pub const UNKNOWN_LABEL: &str = "Ukjent";

/// Stratification dimensions shared by every survey table.
pub trait SurveyRow {
    /// Raw `TidID` as text.
    fn year_id(&self) -> Option<&str>;
    /// School year label, e.g. `"2023-24"`.
    fn year_label(&self) -> Option<&str>;
    /// Grade level name, e.g. `"Videregående trinn 1"`.
    fn trinn(&self) -> Option<&str>;
    /// Gender name, e.g. `"Alle kjønn"`.
    fn kjoenn(&self) -> Option<&str>;
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Integer(i64),
        Float(f64),
        Flag(bool),
        Other(IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Text(value)) => Some(value),
        Some(Lenient::Integer(value)) => Some(value.to_string()),
        Some(Lenient::Float(value)) => Some(value.to_string()),
        Some(Lenient::Flag(value)) => Some(value.to_string()),
        Some(Lenient::Other(_)) | None => None,
    })
}

macro_rules! impl_survey_row {
    ($row:ty) => {
        impl SurveyRow for $row {
            fn year_id(&self) -> Option<&str> {
                present(&self.tid_id)
            }

            fn year_label(&self) -> Option<&str> {
                present(&self.skoleaar)
            }

            fn trinn(&self) -> Option<&str> {
                present(&self.trinn)
            }

            fn kjoenn(&self) -> Option<&str> {
                present(&self.kjoenn)
            }
        }
    };
}

/// Row of the indicator table (152).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorRow {
    #[serde(
        rename = "TidID",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tid_id: Option<String>,
    #[serde(
        rename = "Skoleaarnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub skoleaar: Option<String>,
    #[serde(
        rename = "Organisasjonsnummer",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub organisasjonsnummer: Option<String>,
    #[serde(
        rename = "EnhetNavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub enhet: Option<String>,
    #[serde(
        rename = "Trinnnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub trinn: Option<String>,
    #[serde(
        rename = "Kjoenn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kjoenn: Option<String>,
    #[serde(
        rename = "Spoersmaalgruppe",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gruppe: Option<String>,
    #[serde(
        rename = "Spoersmaalnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub spoersmaal: Option<String>,
    #[serde(
        rename = "Score",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<String>,
    #[serde(
        rename = "Standardavvik",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub standardavvik: Option<String>,
    #[serde(
        rename = "AntallBesvart",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub antall_besvart: Option<String>,
}

impl_survey_row!(IndicatorRow);

impl IndicatorRow {
    pub fn group(&self) -> Option<&str> {
        present(&self.gruppe)
    }

    pub fn question(&self) -> Option<&str> {
        present(&self.spoersmaal)
    }

    pub fn score(&self) -> Option<f64> {
        parse_locale_number(self.score.as_deref())
    }

    pub fn standard_deviation(&self) -> Option<f64> {
        parse_locale_number(self.standardavvik.as_deref())
    }

    pub fn answered(&self) -> Option<f64> {
        parse_locale_number(self.antall_besvart.as_deref())
    }

    /// Aggregate row for a whole indicator group (all genders, all questions).
    pub fn is_group_total(&self) -> bool {
        self.kjoenn.as_deref() == Some(ALL_GENDERS)
            && self.spoersmaal.as_deref() == Some(ALL_QUESTIONS)
    }
}

/// Row of the theme table (153).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeRow {
    #[serde(
        rename = "TidID",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tid_id: Option<String>,
    #[serde(
        rename = "Skoleaarnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub skoleaar: Option<String>,
    #[serde(
        rename = "Organisasjonsnummer",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub organisasjonsnummer: Option<String>,
    #[serde(
        rename = "EnhetNavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub enhet: Option<String>,
    #[serde(
        rename = "Trinnnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub trinn: Option<String>,
    #[serde(
        rename = "Kjoenn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kjoenn: Option<String>,
    #[serde(
        rename = "Temanavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub temanavn: Option<String>,
    #[serde(
        rename = "Tema",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tema: Option<String>,
    #[serde(
        rename = "Spoersmaalgruppe",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gruppe: Option<String>,
    #[serde(
        rename = "Spoersmaalnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub spoersmaal: Option<String>,
    #[serde(
        rename = "SvaralternativNavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub svaralternativ: Option<String>,
    #[serde(
        rename = "Score",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<String>,
    #[serde(
        rename = "AndelBesvart",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub andel_besvart: Option<String>,
    #[serde(
        rename = "AntallBesvart",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub antall_besvart: Option<String>,
}

impl_survey_row!(ThemeRow);

impl ThemeRow {
    /// Theme name: `Temanavn`, then `Spoersmaalgruppe`, then `Tema`.
    pub fn theme_name(&self) -> &str {
        present(&self.temanavn)
            .or_else(|| present(&self.gruppe))
            .or_else(|| present(&self.tema))
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn question(&self) -> Option<&str> {
        present(&self.spoersmaal)
    }

    pub fn answer_option(&self) -> Option<&str> {
        present(&self.svaralternativ)
    }

    pub fn score(&self) -> Option<f64> {
        parse_locale_number(self.score.as_deref())
    }

    pub fn answer_share(&self) -> Option<f64> {
        parse_locale_number(self.andel_besvart.as_deref())
    }

    pub fn answered(&self) -> Option<f64> {
        parse_locale_number(self.antall_besvart.as_deref())
    }

    /// Aggregate over answer options for all genders.
    pub fn is_answer_total(&self) -> bool {
        self.kjoenn.as_deref() == Some(ALL_GENDERS)
            && self.svaralternativ.as_deref() == Some(ALL_ANSWERS)
    }
}

/// Row of the bullying table (154).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BullyingRow {
    #[serde(
        rename = "TidID",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tid_id: Option<String>,
    #[serde(
        rename = "Skoleaarnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub skoleaar: Option<String>,
    #[serde(
        rename = "Organisasjonsnummer",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub organisasjonsnummer: Option<String>,
    #[serde(
        rename = "EnhetNavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub enhet: Option<String>,
    #[serde(
        rename = "Trinnnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub trinn: Option<String>,
    #[serde(
        rename = "Kjoenn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kjoenn: Option<String>,
    #[serde(
        rename = "Spoersmaalgruppe",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gruppe: Option<String>,
    #[serde(
        rename = "Spoersmaalnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub spoersmaal: Option<String>,
    #[serde(
        rename = "AndelMobbet",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub andel_mobbet: Option<String>,
    #[serde(
        rename = "AntallBesvart",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub antall_besvart: Option<String>,
}

impl_survey_row!(BullyingRow);

impl BullyingRow {
    pub fn group(&self) -> Option<&str> {
        present(&self.gruppe)
    }

    pub fn question(&self) -> Option<&str> {
        present(&self.spoersmaal)
    }

    pub fn bullied_share(&self) -> Option<f64> {
        parse_locale_number(self.andel_mobbet.as_deref())
    }

    pub fn answered(&self) -> Option<f64> {
        parse_locale_number(self.antall_besvart.as_deref())
    }

    pub fn is_group_total(&self) -> bool {
        self.kjoenn.as_deref() == Some(ALL_GENDERS)
            && self.spoersmaal.as_deref() == Some(ALL_QUESTIONS)
    }
}

/// Row of the participation table (155).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipationRow {
    #[serde(
        rename = "TidID",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tid_id: Option<String>,
    #[serde(
        rename = "Skoleaarnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub skoleaar: Option<String>,
    #[serde(
        rename = "Organisasjonsnummer",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub organisasjonsnummer: Option<String>,
    #[serde(
        rename = "EnhetNavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub enhet: Option<String>,
    #[serde(
        rename = "Trinnnavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub trinn: Option<String>,
    #[serde(
        rename = "Kjoenn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kjoenn: Option<String>,
    #[serde(
        rename = "EierformNavn",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub eierform: Option<String>,
    #[serde(
        rename = "AntallInvitert",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub antall_invitert: Option<String>,
    #[serde(
        rename = "AntallBesvart",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub antall_besvart: Option<String>,
    #[serde(
        rename = "AndelDeltatt",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub andel_deltatt: Option<String>,
}

impl_survey_row!(ParticipationRow);

impl ParticipationRow {
    pub fn ownership(&self) -> Option<&str> {
        present(&self.eierform)
    }

    pub fn invited(&self) -> Option<f64> {
        parse_locale_number(self.antall_invitert.as_deref())
    }

    pub fn answered(&self) -> Option<f64> {
        parse_locale_number(self.antall_besvart.as_deref())
    }

    pub fn participation_share(&self) -> Option<f64> {
        parse_locale_number(self.andel_deltatt.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_mixed_value_types() {
        let row: IndicatorRow = serde_json::from_str(
            r#"{"TidID": 20232024, "Skoleaarnavn": "2023-24", "Kjoenn": "Alle kjønn",
                "Spoersmaalnavn": "Alle spørsmål", "Spoersmaalgruppe": "Trivsel",
                "Score": "4,2", "AntallBesvart": 120, "Ekstra": {"x": 1}}"#,
        )
        .unwrap();
        assert_eq!(row.year_id(), Some("20232024"));
        assert_eq!(row.score(), Some(4.2));
        assert_eq!(row.answered(), Some(120.0));
        assert!(row.is_group_total());
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let row: ParticipationRow =
            serde_json::from_str(r#"{"Trinnnavn": null, "Kjoenn": "", "AndelDeltatt": [1]}"#)
                .unwrap();
        assert_eq!(row.trinn(), None);
        assert_eq!(row.kjoenn(), None);
        assert_eq!(row.year_label(), None);
        assert_eq!(row.participation_share(), None);
    }

    #[test]
    fn theme_name_precedence() {
        let mut row = ThemeRow {
            tema: Some("Tema".to_string()),
            ..ThemeRow::default()
        };
        assert_eq!(row.theme_name(), "Tema");
        row.gruppe = Some("Gruppe".to_string());
        assert_eq!(row.theme_name(), "Gruppe");
        row.temanavn = Some("Navn".to_string());
        assert_eq!(row.theme_name(), "Navn");
        assert_eq!(ThemeRow::default().theme_name(), UNKNOWN_LABEL);
    }

    #[test]
    fn serializes_upstream_names() {
        let row = BullyingRow {
            gruppe: Some("Mobbing på skolen".to_string()),
            andel_mobbet: Some("6,1".to_string()),
            ..BullyingRow::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Spoersmaalgruppe"], "Mobbing på skolen");
        assert_eq!(json["AndelMobbet"], "6,1");
        assert!(json.get("Kjoenn").is_none());
    }
}
