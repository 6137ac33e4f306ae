use crate::infra::read_json_file;
use chrono::{Local, NaiveDate};
use clap::Args;
use coparent_match::error::AppError;
use coparent_match::matching::{
    rank_candidates, CompatibilityEngine, CompatibilityOutcome, FactorKind, ProfileEntry,
    ProfileRecord, RankOptions, RankedCandidate,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the viewer's profile; without one the score is 0
    #[arg(long)]
    pub(crate) viewer: Option<PathBuf>,
    /// JSON file holding the candidate's profile
    #[arg(long)]
    pub(crate) candidate: PathBuf,
    /// Date used to derive ages from birth dates (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the per-factor breakdown
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding the viewer's profile
    #[arg(long)]
    pub(crate) viewer: PathBuf,
    /// JSON file of `{ "id", "profile" }` candidate entries
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Drop candidates scoring below this percentage
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) min_score: Option<u8>,
    /// Maximum number of candidates to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Date used to derive ages from birth dates (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        viewer,
        candidate,
        today,
        breakdown,
    } = args;

    let viewer = viewer
        .map(read_json_file::<ProfileRecord, _>)
        .transpose()?;
    let candidate: ProfileRecord = read_json_file(candidate)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let outcome = CompatibilityEngine::with_reference_date(today).score(viewer.as_ref(), &candidate);
    println!("Compatibility: {}%", outcome.score);
    if breakdown {
        render_breakdown(&outcome);
    }

    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        viewer,
        candidates,
        min_score,
        limit,
        today,
    } = args;

    let viewer: ProfileRecord = read_json_file(viewer)?;
    let candidates: Vec<ProfileEntry> = read_json_file(candidates)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let options = RankOptions { min_score, limit };
    let ranked = rank_candidates(Some(&viewer), &candidates, today, options);
    render_ranking(&ranked, candidates.len());

    Ok(())
}

fn render_breakdown(outcome: &CompatibilityOutcome) {
    println!("\nEvaluated factors");
    for contribution in &outcome.contributions {
        println!(
            "- {:<20} {:>6.1} | weight {:.3} | effective {:.3}",
            contribution.factor.label(),
            contribution.score.value(),
            contribution.weight,
            contribution.effective_weight,
        );
    }

    let skipped: Vec<&str> = FactorKind::ALL
        .into_iter()
        .filter(|factor| outcome.factors.get(*factor).is_none())
        .map(FactorKind::label)
        .collect();
    if !skipped.is_empty() {
        println!("Not enough data: {}", skipped.join(", "));
    }
}

fn render_ranking(ranked: &[RankedCandidate], considered: usize) {
    println!("Ranked {} of {} candidates", ranked.len(), considered);
    for (position, candidate) in ranked.iter().enumerate() {
        println!("{:>3}. {:<24} {:>3}%", position + 1, candidate.id.0, candidate.score);
    }
}
