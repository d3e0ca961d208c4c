use std::collections::HashMap;

use serde::Serialize;

use crate::input::InputError;
use crate::model::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the upload when a team name repeats.
    #[default]
    Reject,
    /// Keep the first record in file order.
    KeepFirst,
    /// Keep the record with the highest raw score; first one on ties.
    KeepHighest,
}

/// Reduces the batch to one record per team name. Survivors keep file order.
pub fn resolve_duplicates(
    records: Vec<Record>,
    policy: DuplicatePolicy,
) -> Result<Vec<Record>, InputError> {
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut names_in_order = Vec::new();
    for (idx, r) in records.iter().enumerate() {
        let slot = by_name.entry(r.team_name.as_str()).or_default();
        if slot.is_empty() {
            names_in_order.push(r.team_name.as_str());
        }
        slot.push(idx);
    }

    let duplicated = names_in_order
        .iter()
        .filter(|name| by_name[*name].len() > 1)
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    if duplicated.is_empty() {
        return Ok(records);
    }

    let mut keep = vec![true; records.len()];
    match policy {
        DuplicatePolicy::Reject => return Err(InputError::DuplicateTeams(duplicated)),
        DuplicatePolicy::KeepFirst => {
            for name in &duplicated {
                for &idx in &by_name[name.as_str()][1..] {
                    keep[idx] = false;
                }
            }
        }
        DuplicatePolicy::KeepHighest => {
            for name in &duplicated {
                let slots = &by_name[name.as_str()];
                let mut best = slots[0];
                for &idx in &slots[1..] {
                    if records[idx].raw_score > records[best].raw_score {
                        best = idx;
                    }
                }
                for &idx in slots {
                    keep[idx] = idx == best;
                }
            }
        }
    }

    for (idx, r) in records.iter().enumerate() {
        if !keep[idx] {
            tracing::warn!(
                team_name = %r.team_name,
                station = %r.station,
                raw_score = r.raw_score,
                ?policy,
                "discarding duplicate team record"
            );
        }
    }

    Ok(records
        .into_iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(r))
        .collect())
}
