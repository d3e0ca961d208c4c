use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::model::record::{Record, ResultRecord};
use crate::pipeline::stage1_partition::Stage1Output;

/// Competition ranks for one partition: highest score is 1, ties share the
/// lowest tied position, and the next distinct score skips by the tie count.
pub fn competition_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| descending(scores[a], scores[b]));

    let mut ranks = vec![0u32; scores.len()];
    for (pos, &idx) in order.iter().enumerate() {
        ranks[idx] = if pos > 0 && scores[order[pos - 1]] == scores[idx] {
            ranks[order[pos - 1]]
        } else {
            pos as u32 + 1
        };
    }
    ranks
}

/// Ranks every element against the others sharing its key.
pub fn rank_by<K: Eq + Hash>(keys: &[K], scores: &[f64]) -> Vec<u32> {
    let mut partitions: HashMap<&K, Vec<usize>> = HashMap::new();
    for (idx, key) in keys.iter().enumerate() {
        partitions.entry(key).or_default().push(idx);
    }

    let mut ranks = vec![0u32; scores.len()];
    for members in partitions.values() {
        let local = members.iter().map(|&i| scores[i]).collect::<Vec<_>>();
        for (&idx, rank) in members.iter().zip(competition_ranks(&local)) {
            ranks[idx] = rank;
        }
    }
    ranks
}

/// Builds the ordered result table: scoring space ascending, then rank in
/// space. Equal ranks keep input order.
pub fn run_stage3(
    records: &[Record],
    stage1: &Stage1Output,
    final_scores: &[f64],
) -> Vec<ResultRecord> {
    let categories = records.iter().map(|r| r.category.as_str()).collect::<Vec<_>>();
    let stations = records.iter().map(|r| r.station.as_str()).collect::<Vec<_>>();
    let by_category = rank_by(&categories, final_scores);
    let by_station = rank_by(&stations, final_scores);
    let by_space = rank_by(&stage1.assignments, final_scores);

    let mut out = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let space = stage1.assignments[i];
            let row = ResultRecord {
                category: r.category.clone(),
                station: r.station.clone(),
                team_name: r.team_name.clone(),
                raw_score: r.raw_score,
                scoring_space: stage1.spaces[space].scoring_space.clone(),
                final_score: final_scores[i],
                rank_in_category: by_category[i],
                rank_in_station: by_station[i],
                rank_in_space: by_space[i],
            };
            (space, row)
        })
        .collect::<Vec<_>>();

    // Distinct spaces can share a display key when labels contain '-';
    // the space index keeps their rows apart.
    out.sort_by(|(sa, a), (sb, b)| {
        a.scoring_space
            .cmp(&b.scoring_space)
            .then(sa.cmp(sb))
            .then(a.rank_in_space.cmp(&b.rank_in_space))
    });
    out.into_iter().map(|(_, row)| row).collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank.rs"]
mod tests;
