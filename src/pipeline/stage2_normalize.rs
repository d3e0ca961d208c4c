use crate::model::advisory::Advisory;
use crate::model::config::{
    BASELINE_SCORE, POINTS_PER_STD, SCORE_MAX, SCORE_MIN, ScoringConfig, ZERO_STD_TOLERANCE,
};
use crate::model::record::Record;
use crate::pipeline::stage1_partition::Stage1Output;

#[derive(Debug, Clone)]
pub struct Stage2Output {
    /// Rounded to one decimal; ranking reads these same values.
    pub final_scores: Vec<f64>,
    pub advisories: Vec<Advisory>,
}

/// Floor-protected z-score rescaled to mean 70, 10 points per std, clamped to [0, 100].
///
/// A zero spread (single team, or all scores equal) short-circuits to the
/// baseline before the floor is considered. The result is not rounded.
pub fn normalize_score(raw_score: f64, space_mean: f64, space_std: f64, min_std_floor: f64) -> f64 {
    if is_zero_std(space_std) {
        return BASELINE_SCORE;
    }
    let std = effective_std(space_std, min_std_floor);
    let score = BASELINE_SCORE + POINTS_PER_STD * (raw_score - space_mean) / std;
    score.clamp(SCORE_MIN, SCORE_MAX)
}

pub fn effective_std(space_std: f64, min_std_floor: f64) -> f64 {
    if space_std >= min_std_floor {
        space_std
    } else {
        min_std_floor
    }
}

pub fn is_zero_std(std: f64) -> bool {
    std.abs() <= ZERO_STD_TOLERANCE
}

/// One decimal, exact halves to even (70.25 -> 70.2, 69.75 -> 69.8).
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

pub fn run_stage2(records: &[Record], stage1: &Stage1Output, config: &ScoringConfig) -> Stage2Output {
    let mut final_scores = Vec::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let space = stage1.space_of(idx);
        let score = normalize_score(
            record.raw_score,
            space.stats.mean,
            space.stats.std,
            config.min_std_floor,
        );
        final_scores.push(round1(score));
    }

    let mut advisories = Vec::new();
    for space in &stage1.spaces {
        if space.stats.count == 1 {
            tracing::warn!(
                scoring_space = %space.scoring_space,
                "single team in scoring space; baseline score {BASELINE_SCORE} applied"
            );
            advisories.push(Advisory::SingleTeamSpace {
                scoring_space: space.scoring_space.clone(),
                station: space.station.clone(),
                category: space.category.clone(),
            });
        } else if space.stats.std < config.min_std_floor && !is_zero_std(space.stats.std) {
            tracing::debug!(
                scoring_space = %space.scoring_space,
                measured_std = space.stats.std,
                floor = config.min_std_floor,
                "std floor applied"
            );
        }
    }

    Stage2Output {
        final_scores,
        advisories,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
