use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored profiles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profile as supplied by the profile-storage subsystem.
///
/// Field names follow the upstream camelCase records, including the legacy
/// aliases (`values`, `alcohol`) and the loose shapes (`lookingFor` as a single
/// string, `age` next to `birthDate`). A field holding an unexpected JSON type
/// is read as absent instead of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    #[serde(
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub qualities: Option<Vec<String>>,
    /// Legacy name for `qualities`.
    #[serde(
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub values: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub parenting_philosophy: Option<String>,
    #[serde(
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub involvement_percent: Option<i64>,
    /// Free-text custody arrangement such as "60/40 custody".
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub involvement: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub smoking: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub drinking: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
    #[serde(
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub languages: Option<Vec<String>>,
    #[serde(
        deserialize_with = "lenient::looking_for",
        skip_serializing_if = "Option::is_none"
    )]
    pub looking_for: Option<LookingFor>,
    #[serde(
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub interests: Option<Vec<String>>,
    #[serde(
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub causes: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(
        deserialize_with = "lenient::boolean",
        skip_serializing_if = "Option::is_none"
    )]
    pub open_to_relocation: Option<bool>,
    #[serde(deserialize_with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<i64>,
}

/// The signed-in user evaluating candidates.
pub type ViewerProfile = ProfileRecord;

/// The profile being evaluated.
pub type CandidateProfile = ProfileRecord;

/// `lookingFor` arrives either as a list of intents or a single intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookingFor {
    One(String),
    Many(Vec<String>),
}

impl LookingFor {
    pub fn entries(&self) -> Vec<&str> {
        match self {
            LookingFor::One(value) => vec![value.as_str()],
            LookingFor::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Stored profile paired with its identifier, as used by seed files and rank requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub id: ProfileId,
    pub profile: ProfileRecord,
}

mod lenient {
    use super::LookingFor;
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(value) => Some(value),
            _ => None,
        })
    }

    pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(strings_in(items)),
            _ => None,
        })
    }

    pub(super) fn looking_for<'de, D>(deserializer: D) -> Result<Option<LookingFor>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(value) => Some(LookingFor::One(value)),
            Value::Array(items) => Some(LookingFor::Many(strings_in(items))),
            _ => None,
        })
    }

    pub(super) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.is_finite())
                    .map(|value| value.round() as i64)
            }),
            Value::String(raw) => raw.trim().parse::<i64>().ok(),
            _ => None,
        })
    }

    pub(super) fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(value) => Some(value),
            Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    pub(super) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => parse_birth_date(&raw),
            _ => None,
        })
    }

    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
    fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
    }

    fn strings_in(items: Vec<Value>) -> Vec<String> {
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(value) if !value.trim().is_empty() => Some(value),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_upstream_field_names_and_aliases() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "values": ["Stability", "Humor"],
            "parentingPhilosophy": "Gentle routines",
            "alcohol": "socially",
            "lookingFor": "co-parenting",
            "openToRelocation": true,
            "birthDate": "1988-04-12",
            "age": 36
        }))
        .expect("record parses");

        assert_eq!(record.qualities, None);
        assert_eq!(
            record.values,
            Some(vec!["Stability".to_string(), "Humor".to_string()])
        );
        assert_eq!(record.alcohol.as_deref(), Some("socially"));
        assert_eq!(
            record.looking_for,
            Some(LookingFor::One("co-parenting".to_string()))
        );
        assert_eq!(record.open_to_relocation, Some(true));
        assert_eq!(record.birth_date, NaiveDate::from_ymd_opt(1988, 4, 12));
        assert_eq!(record.age, Some(36));
    }

    #[test]
    fn malformed_fields_degrade_to_absent() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "involvementPercent": "sixty",
            "languages": 3,
            "smoking": false,
            "birthDate": "12/04/1988",
            "interests": ["hiking", 7, "  ", null, "chess"],
            "openToRelocation": "maybe"
        }))
        .expect("record parses despite malformed fields");

        assert_eq!(record.involvement_percent, None);
        assert_eq!(record.languages, None);
        assert_eq!(record.smoking, None);
        assert_eq!(record.birth_date, None);
        assert_eq!(
            record.interests,
            Some(vec!["hiking".to_string(), "chess".to_string()])
        );
        assert_eq!(record.open_to_relocation, None);
    }

    #[test]
    fn numeric_strings_and_timestamps_are_accepted() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "involvementPercent": " 60 ",
            "age": 41.6,
            "birthDate": "1990-07-01T00:00:00+02:00"
        }))
        .expect("record parses");

        assert_eq!(record.involvement_percent, Some(60));
        assert_eq!(record.age, Some(42));
        assert_eq!(record.birth_date, NaiveDate::from_ymd_opt(1990, 7, 1));
    }

    #[test]
    fn null_fields_are_absent() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "qualities": null,
            "city": null,
            "lookingFor": null
        }))
        .expect("record parses");

        assert_eq!(record, ProfileRecord::default());
    }

    #[test]
    fn looking_for_lists_expose_entries() {
        let many = LookingFor::Many(vec!["friendship".to_string(), "co-parenting".to_string()]);
        assert_eq!(many.entries(), vec!["friendship", "co-parenting"]);
    }
}
