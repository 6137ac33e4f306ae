use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use super::domain::ProfileRecord;

const DEFAULT_INVOLVEMENT_PERCENT: u8 = 50;

/// Custody splits recognised in free-text `involvement`, checked in order.
const INVOLVEMENT_SPLITS: &[(&str, u8)] = &[
    ("50/50", 50),
    ("60/40", 60),
    ("40/60", 40),
    ("70/30", 70),
    ("30/70", 30),
];

/// Profile with every fallback resolved, consumed by the factor scorers.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalProfile {
    pub qualities: BTreeSet<String>,
    /// Lowercased and trimmed; empty when not provided.
    pub parenting_philosophy: String,
    pub involvement_percent: u8,
    pub smoking: Smoking,
    pub drinking: Drinking,
    pub exercise: ExerciseLevel,
    pub languages: BTreeSet<String>,
    pub looking_for: BTreeSet<String>,
    pub interests: BTreeSet<String>,
    pub causes: BTreeSet<String>,
    /// Lowercased; `None` when blank.
    pub city: Option<String>,
    pub country: Option<String>,
    pub open_to_relocation: bool,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Smoking {
    Never,
    Occasionally,
    Regularly,
    Former,
    Other(String),
}

impl Smoking {
    fn from_label(label: Option<&str>) -> Self {
        match label {
            None | Some("never") => Smoking::Never,
            Some("occasionally") => Smoking::Occasionally,
            Some("regularly") => Smoking::Regularly,
            Some("former") => Smoking::Former,
            Some(other) => Smoking::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drinking {
    Never,
    Rarely,
    Socially,
    Regularly,
    Other(String),
}

impl Drinking {
    fn from_label(label: Option<&str>) -> Self {
        match label {
            None | Some("never") => Drinking::Never,
            Some("rarely") => Drinking::Rarely,
            Some("socially") => Drinking::Socially,
            Some("regularly") => Drinking::Regularly,
            Some(other) => Drinking::Other(other.to_string()),
        }
    }
}

/// Ordinal exercise frequency, 1 (rarely) through 5 (daily).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseLevel(u8);

impl ExerciseLevel {
    pub const RARELY: ExerciseLevel = ExerciseLevel(1);

    fn from_label(label: Option<&str>) -> Self {
        let level = match label {
            Some("daily") | Some("active") => 5,
            Some("several_weekly") => 4,
            Some("weekly") => 3,
            Some("occasionally") | Some("sometimes") => 2,
            _ => 1,
        };
        ExerciseLevel(level)
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

/// Canonical form of the viewer's own profile.
pub fn normalize_viewer(record: &ProfileRecord, today: NaiveDate) -> CanonicalProfile {
    let involvement_percent = record
        .involvement_percent
        .map(clamp_percent)
        .unwrap_or(DEFAULT_INVOLVEMENT_PERCENT);

    CanonicalProfile {
        qualities: string_set(record.qualities.as_deref()),
        drinking: Drinking::from_label(category(record.drinking.as_deref()).as_deref()),
        involvement_percent,
        ..normalize_shared(record, today)
    }
}

/// Canonical form of a candidate, resolving the legacy and alternate field shapes.
pub fn normalize_candidate(record: &ProfileRecord, today: NaiveDate) -> CanonicalProfile {
    let qualities = record.qualities.as_deref().or(record.values.as_deref());

    let drinking =
        category(record.alcohol.as_deref()).or_else(|| category(record.drinking.as_deref()));

    let involvement_percent = match record.involvement_percent {
        Some(percent) if percent != 0 => clamp_percent(percent),
        _ => involvement_from_text(record.involvement.as_deref()),
    };

    CanonicalProfile {
        qualities: string_set(qualities),
        drinking: Drinking::from_label(drinking.as_deref()),
        involvement_percent,
        ..normalize_shared(record, today)
    }
}

fn normalize_shared(record: &ProfileRecord, today: NaiveDate) -> CanonicalProfile {
    let looking_for: BTreeSet<String> = record
        .looking_for
        .as_ref()
        .map(|looking_for| {
            looking_for
                .entries()
                .into_iter()
                .filter_map(trimmed)
                .collect()
        })
        .unwrap_or_default();

    let age = record
        .age
        .filter(|age| *age > 0)
        .and_then(|age| u32::try_from(age).ok())
        .or_else(|| record.birth_date.and_then(|birth| age_on(birth, today)));

    CanonicalProfile {
        qualities: BTreeSet::new(),
        parenting_philosophy: record
            .parenting_philosophy
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .unwrap_or_default(),
        involvement_percent: DEFAULT_INVOLVEMENT_PERCENT,
        smoking: Smoking::from_label(category(record.smoking.as_deref()).as_deref()),
        drinking: Drinking::Never,
        exercise: ExerciseLevel::from_label(category(record.exercise.as_deref()).as_deref()),
        languages: string_set(record.languages.as_deref()),
        looking_for,
        interests: string_set(record.interests.as_deref()),
        causes: string_set(record.causes.as_deref()),
        city: category(record.city.as_deref()),
        country: category(record.country.as_deref()),
        open_to_relocation: record.open_to_relocation.unwrap_or(false),
        age,
    }
}

/// Whole years between `birth` and `today`; `None` for a birth date in the future.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn involvement_from_text(text: Option<&str>) -> u8 {
    let Some(text) = text else {
        return DEFAULT_INVOLVEMENT_PERCENT;
    };

    INVOLVEMENT_SPLITS
        .iter()
        .find(|(pattern, _)| text.contains(pattern))
        .map(|(_, percent)| *percent)
        .unwrap_or(DEFAULT_INVOLVEMENT_PERCENT)
}

fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn category(value: Option<&str>) -> Option<String> {
    value.and_then(trimmed).map(|value| value.to_lowercase())
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn string_set(values: Option<&[String]>) -> BTreeSet<String> {
    values
        .unwrap_or_default()
        .iter()
        .filter_map(|value| trimmed(value))
        .collect()
}
