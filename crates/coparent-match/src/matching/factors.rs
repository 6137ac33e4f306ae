//! Sub-scorers for the ten compatibility factors.
//!
//! Each scorer reads two canonical profiles and returns `None` when there is
//! not enough data to evaluate the factor. `None` factors are dropped from the
//! weighted average rather than counted as zero.

use std::collections::BTreeSet;

use serde::Serialize;

use super::normalize::{CanonicalProfile, Drinking, Smoking};
use super::weights::FactorKind;

/// Returned when a text field exists but holds no comparable words.
const NEUTRAL_TEXT_SCORE: f64 = 50.0;
/// Philosophy tokens must be longer than this many characters.
const MIN_TOKEN_CHARS: usize = 3;

/// A sub-score in the closed range [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const MAX: Score = Score(100.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Score(0.0);
        }
        Score(value.clamp(0.0, 100.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

/// Per-factor breakdown for one viewer/candidate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFactors {
    pub values: Option<Score>,
    pub parenting_philosophy: Option<Score>,
    pub involvement: Option<Score>,
    pub lifestyle: Option<Score>,
    pub languages: Option<Score>,
    pub looking_for: Option<Score>,
    pub interests: Option<Score>,
    pub causes: Option<Score>,
    pub location: Option<Score>,
    pub age: Option<Score>,
}

impl MatchFactors {
    pub fn evaluate(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Self {
        Self {
            values: values_overlap(viewer, candidate),
            parenting_philosophy: parenting_philosophy(viewer, candidate),
            involvement: involvement(viewer, candidate),
            lifestyle: lifestyle(viewer, candidate),
            languages: languages_overlap(viewer, candidate),
            looking_for: looking_for(viewer, candidate),
            interests: interests_overlap(viewer, candidate),
            causes: causes_overlap(viewer, candidate),
            location: location(viewer, candidate),
            age: age(viewer, candidate),
        }
    }

    pub fn get(&self, factor: FactorKind) -> Option<Score> {
        match factor {
            FactorKind::Values => self.values,
            FactorKind::ParentingPhilosophy => self.parenting_philosophy,
            FactorKind::Involvement => self.involvement,
            FactorKind::Lifestyle => self.lifestyle,
            FactorKind::Languages => self.languages,
            FactorKind::LookingFor => self.looking_for,
            FactorKind::Interests => self.interests,
            FactorKind::Causes => self.causes,
            FactorKind::Location => self.location,
            FactorKind::Age => self.age,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (FactorKind, Option<Score>)> + '_ {
        FactorKind::ALL
            .into_iter()
            .map(move |factor| (factor, self.get(factor)))
    }

    pub fn evaluated_count(&self) -> usize {
        self.entries().filter(|(_, score)| score.is_some()).count()
    }
}

/// Jaccard index of two sets as a percentage; `None` if either set is empty.
pub fn jaccard_percent<T: Ord>(left: &BTreeSet<T>, right: &BTreeSet<T>) -> Option<Score> {
    if left.is_empty() || right.is_empty() {
        return None;
    }

    let matches = left.intersection(right).count();
    let total_unique = left.union(right).count();
    if total_unique == 0 {
        return Some(Score::new(0.0));
    }

    Some(Score::new(matches as f64 / total_unique as f64 * 100.0))
}

/// Whitespace tokens longer than three characters, deduplicated.
pub fn tokenize_philosophy(text: &str) -> BTreeSet<&str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}

pub fn values_overlap(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    jaccard_percent(&viewer.qualities, &candidate.qualities)
}

/// Bag-of-words Jaccard over the two philosophies; no stemming or synonyms.
pub fn parenting_philosophy(
    viewer: &CanonicalProfile,
    candidate: &CanonicalProfile,
) -> Option<Score> {
    if viewer.parenting_philosophy.is_empty() || candidate.parenting_philosophy.is_empty() {
        return None;
    }

    let viewer_words = tokenize_philosophy(&viewer.parenting_philosophy);
    let candidate_words = tokenize_philosophy(&candidate.parenting_philosophy);
    if viewer_words.is_empty() || candidate_words.is_empty() {
        return Some(Score::new(NEUTRAL_TEXT_SCORE));
    }

    let common = viewer_words.intersection(&candidate_words).count();
    let total = viewer_words.union(&candidate_words).count();
    if total == 0 {
        return Some(Score::new(NEUTRAL_TEXT_SCORE));
    }

    Some(Score::new(common as f64 / total as f64 * 100.0))
}

/// Always evaluable: missing percentages were already defaulted during normalization.
pub fn involvement(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    let difference =
        (i16::from(viewer.involvement_percent) - i16::from(candidate.involvement_percent)).abs();
    Some(Score::new(100.0 - (f64::from(difference) / 50.0) * 100.0))
}

pub fn lifestyle(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    let parts = [
        Some(smoking_score(&viewer.smoking, &candidate.smoking)),
        Some(drinking_score(&viewer.drinking, &candidate.drinking)),
        Some(exercise_score(viewer, candidate)),
    ];

    let (total, factors) = parts
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(total, factors), score| {
            (total + score, factors + 1)
        });

    if factors == 0 {
        return None;
    }
    Some(Score::new(total / factors as f64))
}

fn smoking_score(viewer: &Smoking, candidate: &Smoking) -> f64 {
    match (viewer, candidate) {
        (left, right) if left == right => 100.0,
        (Smoking::Never, Smoking::Former) | (Smoking::Former, Smoking::Never) => 80.0,
        _ => 30.0,
    }
}

fn drinking_score(viewer: &Drinking, candidate: &Drinking) -> f64 {
    match (viewer, candidate) {
        (left, right) if left == right => 100.0,
        (Drinking::Never, Drinking::Rarely) | (Drinking::Rarely, Drinking::Never) => 70.0,
        _ => 50.0,
    }
}

fn exercise_score(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> f64 {
    let difference = viewer.exercise.level().abs_diff(candidate.exercise.level());
    (100.0 - f64::from(difference) * 20.0).max(0.0)
}

pub fn languages_overlap(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    jaccard_percent(&viewer.languages, &candidate.languages)
}

/// Binary alignment: any shared intent is a full match, none is partial credit.
pub fn looking_for(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    if viewer.looking_for.is_empty() || candidate.looking_for.is_empty() {
        return None;
    }

    if viewer.looking_for.is_disjoint(&candidate.looking_for) {
        Some(Score::new(50.0))
    } else {
        Some(Score::MAX)
    }
}

pub fn interests_overlap(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    jaccard_percent(&viewer.interests, &candidate.interests)
}

pub fn causes_overlap(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    jaccard_percent(&viewer.causes, &candidate.causes)
}

/// City beats country; relocation only helps once both differ.
pub fn location(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    if viewer.city.is_none() && viewer.country.is_none() {
        return None;
    }

    let same = |left: &Option<String>, right: &Option<String>| {
        matches!((left, right), (Some(left), Some(right)) if left == right)
    };

    let score = if same(&viewer.city, &candidate.city) {
        100.0
    } else if same(&viewer.country, &candidate.country) {
        70.0
    } else if viewer.open_to_relocation || candidate.open_to_relocation {
        30.0
    } else {
        10.0
    };
    Some(Score::new(score))
}

pub fn age(viewer: &CanonicalProfile, candidate: &CanonicalProfile) -> Option<Score> {
    let (viewer_age, candidate_age) = (viewer.age?, candidate.age?);
    let score = match viewer_age.abs_diff(candidate_age) {
        0..=5 => 100.0,
        6..=10 => 80.0,
        11..=15 => 60.0,
        16..=20 => 40.0,
        _ => 20.0,
    };
    Some(Score::new(score))
}
