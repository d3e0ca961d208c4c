use std::io::BufRead;

use crate::input::InputError;
use crate::input::reader::SheetFormat;
use crate::model::config::{SCORE_MAX, SCORE_MIN};
use crate::model::labels::LabelSet;
use crate::model::record::Record;

const CATEGORY_NAMES: &[&str] = &["category", "组别"];
const STATION_NAMES: &[&str] = &["station", "工位"];
const TEAM_NAMES: &[&str] = &["team_name", "team", "队伍名称"];
const SCORE_NAMES: &[&str] = &["raw_score", "score", "原始分", "原始平均分"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub category: usize,
    pub station: usize,
    pub team_name: usize,
    pub raw_score: usize,
}

/// Locates the required columns by name. Reports every missing column at once.
pub fn resolve_columns(headers: &[String]) -> Result<ColumnMap, InputError> {
    let normalized = headers
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
        .collect::<Vec<_>>();
    let find = |aliases: &[&str]| normalized.iter().position(|h| aliases.contains(&h.as_str()));

    let category = find(CATEGORY_NAMES);
    let station = find(STATION_NAMES);
    let team_name = find(TEAM_NAMES);
    let raw_score = find(SCORE_NAMES);

    match (category, station, team_name, raw_score) {
        (Some(category), Some(station), Some(team_name), Some(raw_score)) => Ok(ColumnMap {
            category,
            station,
            team_name,
            raw_score,
        }),
        _ => {
            let mut missing = Vec::new();
            for (found, name) in [
                (category, CATEGORY_NAMES[0]),
                (station, STATION_NAMES[0]),
                (team_name, TEAM_NAMES[0]),
                (raw_score, SCORE_NAMES[0]),
            ] {
                if found.is_none() {
                    missing.push(name.to_string());
                }
            }
            Err(InputError::MissingColumns(missing))
        }
    }
}

pub fn parse_raw_score(value: &str, line: u64) -> Result<f64, InputError> {
    let score = value.trim().parse::<f64>().map_err(|_| InputError::InvalidInput {
        line,
        message: format!("raw score '{value}' is not a number"),
    })?;
    if !score.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&score) {
        return Err(InputError::InvalidInput {
            line,
            message: format!("raw score {score} is outside {SCORE_MIN}..={SCORE_MAX}"),
        });
    }
    Ok(score)
}

/// Reads every data row into a `Record`, rejecting the batch on the first bad row.
pub fn read_records(
    reader: Box<dyn BufRead>,
    format: SheetFormat,
    labels: Option<&LabelSet>,
) -> Result<Vec<Record>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    // Zero-byte sheet: no header row at all. The caller reports it as empty.
    if headers.iter().all(|h| h.is_empty()) {
        return Ok(Vec::new());
    }
    let cols = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        if row.iter().all(|f| f.is_empty()) {
            continue;
        }
        let field = |idx: usize, name: &str| -> Result<String, InputError> {
            match row.get(idx) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(InputError::InvalidInput {
                    line,
                    message: format!("missing {name}"),
                }),
            }
        };
        let category = field(cols.category, "category")?;
        let station = field(cols.station, "station")?;
        let team_name = field(cols.team_name, "team name")?;
        let raw_score = parse_raw_score(&field(cols.raw_score, "raw score")?, line)?;

        if let Some(labels) = labels {
            if !labels.has_category(&category) {
                return Err(InputError::InvalidInput {
                    line,
                    message: format!("unrecognized category '{category}'"),
                });
            }
            if !labels.has_station(&station) {
                return Err(InputError::InvalidInput {
                    line,
                    message: format!("unrecognized station '{station}'"),
                });
            }
        }

        records.push(Record {
            category,
            station,
            team_name,
            raw_score,
        });
    }
    Ok(records)
}
