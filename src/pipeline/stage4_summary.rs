use std::collections::BTreeMap;

use crate::model::record::ResultRecord;
use crate::model::stats::{DescriptiveStats, GroupSummary, SpaceStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAxis {
    Category,
    Station,
}

#[derive(Debug, Clone)]
pub struct Stage4Output {
    pub overall: DescriptiveStats,
    pub spaces: Vec<SpaceStats>,
    pub categories: Vec<GroupSummary>,
    pub stations: Vec<GroupSummary>,
}

/// `spaces` arrive from stage 1 already ordered by station, then category.
pub fn run_stage4(results: &[ResultRecord], spaces: &[SpaceStats]) -> Stage4Output {
    let raw = results.iter().map(|r| r.raw_score).collect::<Vec<_>>();

    Stage4Output {
        overall: DescriptiveStats::from_values(&raw),
        spaces: spaces.to_vec(),
        categories: summarize_groups(results, GroupAxis::Category),
        stations: summarize_groups(results, GroupAxis::Station),
    }
}

/// Rolls results up by category or station, sorted by name.
pub fn summarize_groups(results: &[ResultRecord], axis: GroupAxis) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for r in results {
        let key = match axis {
            GroupAxis::Category => r.category.as_str(),
            GroupAxis::Station => r.station.as_str(),
        };
        let entry = groups.entry(key).or_default();
        entry.0.push(r.raw_score);
        entry.1.push(r.final_score);
    }

    groups
        .into_iter()
        .map(|(name, (raw, finals))| GroupSummary {
            name: name.to_string(),
            raw: DescriptiveStats::from_values(&raw),
            final_mean: DescriptiveStats::from_values(&finals).mean,
        })
        .collect()
}
