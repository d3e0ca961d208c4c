use std::collections::BTreeMap;

use crate::model::record::Record;
use crate::model::stats::{DescriptiveStats, SpaceStats};

#[derive(Debug, Clone)]
pub struct Stage1Output {
    /// One entry per distinct (station, category), in that order.
    pub spaces: Vec<SpaceStats>,
    /// Index into `spaces` for each input record.
    pub assignments: Vec<usize>,
}

impl Stage1Output {
    pub fn space_of(&self, record_idx: usize) -> &SpaceStats {
        &self.spaces[self.assignments[record_idx]]
    }
}

/// Groups on the (station, category) pair itself; the `station-category`
/// string is display only, so labels containing `-` never merge spaces.
pub fn run_stage1(records: &[Record]) -> Stage1Output {
    let mut groups: BTreeMap<(&str, &str), Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        groups
            .entry((record.station.as_str(), record.category.as_str()))
            .or_default()
            .push(idx);
    }

    let mut spaces = Vec::with_capacity(groups.len());
    let mut assignments = vec![0usize; records.len()];
    for ((station, category), members) in groups {
        let space_idx = spaces.len();
        let values = members
            .iter()
            .map(|&i| records[i].raw_score)
            .collect::<Vec<_>>();
        for &i in &members {
            assignments[i] = space_idx;
        }
        spaces.push(SpaceStats {
            scoring_space: records[members[0]].scoring_space(),
            station: station.to_string(),
            category: category.to_string(),
            stats: DescriptiveStats::from_values(&values),
        });
    }

    tracing::debug!(
        n_records = records.len(),
        n_spaces = spaces.len(),
        "partitioned records into scoring spaces"
    );

    Stage1Output {
        spaces,
        assignments,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_partition.rs"]
mod tests;
