pub mod stage1_partition;
pub mod stage2_normalize;
pub mod stage3_rank;
pub mod stage4_summary;
pub mod stage5_report;

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::model::advisory::Advisory;
use crate::model::config::{ConfigError, SCORE_MAX, SCORE_MIN, ScoringConfig};
use crate::model::record::{Record, ResultRecord};
use crate::model::stats::{DescriptiveStats, GroupSummary, SpaceStats};

use stage1_partition::run_stage1;
use stage2_normalize::run_stage2;
use stage3_rank::run_stage3;
use stage4_summary::run_stage4;

pub const MIN_RECORDS: usize = 2;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("insufficient data: at least 2 records are required, got {0}")]
    InsufficientData(usize),
    #[error("invalid input: team '{team_name}' has raw score {raw_score}, expected a number in 0..=100")]
    InvalidInput { team_name: String, raw_score: f64 },
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Immutable snapshot of one scoring run.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringRun {
    pub config: ScoringConfig,
    pub results: Vec<ResultRecord>,
    /// Sorted by station, then category.
    pub spaces: Vec<SpaceStats>,
    pub overall: DescriptiveStats,
    pub categories: Vec<GroupSummary>,
    pub stations: Vec<GroupSummary>,
    pub advisories: Vec<Advisory>,
}

impl ScoringRun {
    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }
}

/// Partitions, normalizes and ranks one batch. Fails the whole batch on
/// fewer than two records or an out-of-domain raw score.
pub fn run_scoring(records: &[Record], config: &ScoringConfig) -> Result<ScoringRun, ScoringError> {
    config.validate()?;
    if records.len() < MIN_RECORDS {
        return Err(ScoringError::InsufficientData(records.len()));
    }
    for r in records {
        if !r.raw_score.is_finite() || r.raw_score < SCORE_MIN || r.raw_score > SCORE_MAX {
            return Err(ScoringError::InvalidInput {
                team_name: r.team_name.clone(),
                raw_score: r.raw_score,
            });
        }
    }

    let mut advisories = duplicate_team_advisories(records);

    let stage1 = run_stage1(records);
    let stage2 = run_stage2(records, &stage1, config);
    let results = run_stage3(records, &stage1, &stage2.final_scores);
    let stage4 = run_stage4(&results, &stage1.spaces);

    advisories.extend(stage2.advisories);

    tracing::info!(
        n_teams = results.len(),
        n_spaces = stage4.spaces.len(),
        n_advisories = advisories.len(),
        min_std_floor = config.min_std_floor,
        "scoring complete"
    );

    Ok(ScoringRun {
        config: *config,
        results,
        spaces: stage4.spaces,
        overall: stage4.overall,
        categories: stage4.categories,
        stations: stage4.stations,
        advisories,
    })
}

fn duplicate_team_advisories(records: &[Record]) -> Vec<Advisory> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.team_name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, n)| {
            tracing::warn!(team_name = name, occurrences = n, "duplicate team name reached scoring");
            Advisory::DuplicateTeamName {
                team_name: name.to_string(),
                occurrences: n,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/scoring.rs"]
mod tests;
