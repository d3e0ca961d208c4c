pub mod json;
pub mod text;

use crate::model::advisory::Advisory;
use crate::model::config::ScoringConfig;
use crate::model::record::ResultRecord;
use crate::model::stats::{DescriptiveStats, GroupSummary, SpaceStats};

/// Run-level metadata carried into every report.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub tool_name: String,
    pub tool_version: String,
    pub input_path: String,
    pub duplicate_policy: String,
    pub label_check: bool,
}

/// Borrowed view over a finished run, shared by the renderers.
#[derive(Debug, Clone, Copy)]
pub struct SummaryData<'a> {
    pub config: &'a ScoringConfig,
    pub results: &'a [ResultRecord],
    pub spaces: &'a [SpaceStats],
    pub overall: &'a DescriptiveStats,
    pub categories: &'a [GroupSummary],
    pub stations: &'a [GroupSummary],
    pub advisories: &'a [Advisory],
}

pub fn format_f64_1(v: f64) -> String {
    format!("{:.1}", v)
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

/// Rank-1 teams per scoring space, in result order.
pub fn podium<'a>(results: &'a [ResultRecord]) -> Vec<&'a ResultRecord> {
    results.iter().filter(|r| r.rank_in_space == 1).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
