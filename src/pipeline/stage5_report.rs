use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::record::ResultRecord;
use crate::model::stats::SpaceStats;
use crate::pipeline::ScoringRun;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ReportContext, SummaryData, format_f64_1, format_f64_3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Tsv,
    Csv,
}

impl ExportFormat {
    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Tsv => b'\t',
            ExportFormat::Csv => b',',
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Tsv => "tsv",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write table {path}: {source}")]
    Table { path: String, source: csv::Error },
    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

pub const RESULT_COLUMNS: [&str; 9] = [
    "scoring_space",
    "rank_in_space",
    "category",
    "rank_in_category",
    "station",
    "rank_in_station",
    "team_name",
    "raw_score",
    "final_score",
];

pub const SPACE_COLUMNS: [&str; 8] = [
    "scoring_space",
    "station",
    "category",
    "count",
    "mean",
    "std",
    "min",
    "max",
];

/// Writes the result table, space table, JSON summary and text report.
/// Returns the paths written, in that order.
pub fn write_reports(
    run: &ScoringRun,
    ctx: &ReportContext,
    out_dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.display().to_string(),
        source,
    })?;

    let results_path = out_dir.join(format!("results.{}", format.extension()));
    write_results_table(&run.results, &results_path, format)?;

    let spaces_path = out_dir.join("spaces.tsv");
    write_spaces_table(&run.spaces, &spaces_path)?;

    let data = SummaryData {
        config: &run.config,
        results: &run.results,
        spaces: &run.spaces,
        overall: &run.overall,
        categories: &run.categories,
        stations: &run.stations,
        advisories: &run.advisories,
    };

    let summary_path = out_dir.join("summary.json");
    let json = render_summary_json(ctx, &data)?;
    write_text(&summary_path, &json)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(ctx, &data))?;

    tracing::info!(out_dir = %out_dir.display(), "reports written");
    Ok(vec![results_path, spaces_path, summary_path, report_path])
}

fn write_results_table(
    results: &[ResultRecord],
    path: &Path,
    format: ExportFormat,
) -> Result<(), ReportError> {
    let table_err = |source| ReportError::Table {
        path: path.display().to_string(),
        source,
    };
    let mut w = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_path(path)
        .map_err(table_err)?;
    w.write_record(RESULT_COLUMNS).map_err(table_err)?;
    for r in results {
        w.write_record([
            r.scoring_space.clone(),
            r.rank_in_space.to_string(),
            r.category.clone(),
            r.rank_in_category.to_string(),
            r.station.clone(),
            r.rank_in_station.to_string(),
            r.team_name.clone(),
            r.raw_score.to_string(),
            format_f64_1(r.final_score),
        ])
        .map_err(table_err)?;
    }
    w.flush().map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn write_spaces_table(spaces: &[SpaceStats], path: &Path) -> Result<(), ReportError> {
    let table_err = |source| ReportError::Table {
        path: path.display().to_string(),
        source,
    };
    let mut w = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(table_err)?;
    w.write_record(SPACE_COLUMNS).map_err(table_err)?;
    for s in spaces {
        w.write_record([
            s.scoring_space.clone(),
            s.station.clone(),
            s.category.clone(),
            s.stats.count.to_string(),
            format_f64_3(s.stats.mean),
            format_f64_3(s.stats.std),
            s.stats.min.to_string(),
            s.stats.max.to_string(),
        ])
        .map_err(table_err)?;
    }
    w.flush().map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
