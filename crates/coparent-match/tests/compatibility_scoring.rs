use chrono::NaiveDate;
use coparent_match::matching::{
    compute_compatibility, compute_compatibility_on, rank_candidates, CompatibilityEngine,
    FactorKind, ProfileEntry, ProfileRecord, RankOptions,
};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid reference date")
}

fn record(value: serde_json::Value) -> ProfileRecord {
    serde_json::from_value(value).expect("profile record parses")
}

#[test]
fn null_viewer_scores_zero() {
    let candidate = record(json!({ "qualities": ["Stability"], "city": "Paris" }));
    assert_eq!(compute_compatibility(None, &candidate), 0);
    assert_eq!(compute_compatibility_on(None, &candidate, today()), 0);
}

#[test]
fn identical_profiles_score_full_marks() {
    let profile = record(json!({
        "qualities": ["Stability", "Humor"],
        "parentingPhilosophy": "Structured routines and outdoor adventures",
        "involvementPercent": 60,
        "smoking": "never",
        "drinking": "rarely",
        "exercise": "weekly",
        "languages": ["English", "Spanish"],
        "lookingFor": ["co-parenting"],
        "interests": ["music"],
        "causes": ["literacy"],
        "city": "Austin",
        "country": "USA",
        "birthDate": "1990-01-01"
    }));

    assert_eq!(compute_compatibility_on(Some(&profile), &profile, today()), 100);
}

#[test]
fn only_overlapping_values_and_defaults_are_weighted() {
    let viewer = record(json!({ "qualities": ["Stability", "Education"] }));
    let candidate = record(json!({ "qualities": ["Stability", "Nature"] }));

    let outcome = CompatibilityEngine::with_reference_date(today()).score(Some(&viewer), &candidate);

    // values 1/3, involvement 100, lifestyle 100 over weights 0.25 + 0.20 + 0.20
    assert_eq!(outcome.score, 74);
    let weighted: Vec<FactorKind> = outcome
        .contributions
        .iter()
        .map(|contribution| contribution.factor)
        .collect();
    assert_eq!(
        weighted,
        vec![FactorKind::Values, FactorKind::Involvement, FactorKind::Lifestyle]
    );
    let effective: f64 = outcome
        .contributions
        .iter()
        .map(|contribution| contribution.effective_weight)
        .sum();
    assert!((effective - 1.0).abs() < 1e-9, "effective weights renormalize");
}

#[test]
fn legacy_candidate_fields_are_honoured() {
    let viewer = record(json!({
        "qualities": ["Humor"],
        "drinking": "socially",
        "involvementPercent": 60,
        "lookingFor": "co-parenting"
    }));
    let candidate = record(json!({
        "values": ["Humor"],
        "alcohol": "socially",
        "drinking": "never",
        "involvement": "60/40 split",
        "lookingFor": "co-parenting"
    }));

    let outcome = CompatibilityEngine::with_reference_date(today()).score(Some(&viewer), &candidate);
    assert_eq!(outcome.score, 100);
    assert_eq!(outcome.factors.looking_for.map(|score| score.value()), Some(100.0));
}

#[test]
fn malformed_candidate_fields_degrade_to_missing() {
    let viewer = record(json!({
        "qualities": ["Stability"],
        "languages": ["English"],
        "age": 35
    }));
    let candidate = record(json!({
        "qualities": "Stability",
        "languages": 42,
        "age": "thirty",
        "birthDate": "not a date",
        "involvementPercent": "lots"
    }));

    let outcome = CompatibilityEngine::with_reference_date(today()).score(Some(&viewer), &candidate);
    assert!(outcome.factors.values.is_none());
    assert!(outcome.factors.languages.is_none());
    assert!(outcome.factors.age.is_none());
    assert_eq!(outcome.score, 100);
}

#[test]
fn location_tiers_follow_city_country_and_relocation() {
    let viewer = record(json!({ "city": "Paris", "country": "France" }));
    let engine = CompatibilityEngine::with_reference_date(today());

    let cases = [
        (json!({ "city": " PARIS ", "country": "France" }), 100.0),
        (json!({ "city": "Lyon", "country": "france" }), 70.0),
        (json!({ "city": "Berlin", "country": "Germany", "openToRelocation": true }), 30.0),
        (json!({ "city": "Berlin", "country": "Germany" }), 10.0),
    ];

    for (candidate, expected) in cases {
        let outcome = engine.score(Some(&viewer), &record(candidate));
        assert_eq!(
            outcome.factors.location.map(|score| score.value()),
            Some(expected)
        );
    }
}

#[test]
fn ranking_uses_public_entries() {
    let viewer = record(json!({ "qualities": ["Stability", "Education"] }));
    let candidates: Vec<ProfileEntry> = serde_json::from_value(json!([
        { "id": "far", "profile": { "qualities": ["Nature"] } },
        { "id": "near", "profile": { "qualities": ["Stability", "Education"] } }
    ]))
    .expect("entries parse");

    let ranked = rank_candidates(Some(&viewer), &candidates, today(), RankOptions::default());
    assert_eq!(ranked[0].id.0, "near");
    assert_eq!(ranked[0].score, 100);
    assert_eq!(ranked[1].id.0, "far");
}
