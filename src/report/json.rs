use serde::Serialize;

use crate::model::advisory::Advisory;
use crate::model::config::ScoringConfig;
use crate::model::stats::{DescriptiveStats, GroupSummary, SpaceStats};
use crate::report::{ReportContext, SummaryData};

#[derive(Debug, Serialize)]
struct ToolMeta<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct InputMeta<'a> {
    path: &'a str,
    n_teams: usize,
    duplicate_policy: &'a str,
    label_check: bool,
}

#[derive(Debug, Serialize)]
struct AdvisoryEntry<'a> {
    code: &'static str,
    message: String,
    #[serde(flatten)]
    detail: &'a Advisory,
}

#[derive(Debug, Serialize)]
struct SummaryJson<'a> {
    tool: ToolMeta<'a>,
    input: InputMeta<'a>,
    config: &'a ScoringConfig,
    overall: &'a DescriptiveStats,
    scoring_spaces: &'a [SpaceStats],
    categories: &'a [GroupSummary],
    stations: &'a [GroupSummary],
    advisories: Vec<AdvisoryEntry<'a>>,
}

pub fn render_summary_json(
    ctx: &ReportContext,
    data: &SummaryData<'_>,
) -> Result<String, serde_json::Error> {
    let summary = SummaryJson {
        tool: ToolMeta {
            name: &ctx.tool_name,
            version: &ctx.tool_version,
        },
        input: InputMeta {
            path: &ctx.input_path,
            n_teams: data.results.len(),
            duplicate_policy: &ctx.duplicate_policy,
            label_check: ctx.label_check,
        },
        config: data.config,
        overall: data.overall,
        scoring_spaces: data.spaces,
        categories: data.categories,
        stations: data.stations,
        advisories: data
            .advisories
            .iter()
            .map(|a| AdvisoryEntry {
                code: a.code(),
                message: a.to_string(),
                detail: a,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&summary)
}
