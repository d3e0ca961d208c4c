use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::dedup::{DuplicatePolicy, resolve_duplicates};
use super::reader::{SheetFormat, detect_format};
use super::table::{parse_raw_score, resolve_columns};
use super::{IngestOptions, InputError, load_records};
use crate::model::labels::LabelSet;
use crate::model::record::Record;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("stationscore_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_detect_format() {
    assert_eq!(detect_format(Path::new("a.csv")).unwrap(), SheetFormat::Csv);
    assert_eq!(detect_format(Path::new("a.CSV")).unwrap(), SheetFormat::Csv);
    assert_eq!(detect_format(Path::new("a.tsv")).unwrap(), SheetFormat::Tsv);
    assert_eq!(detect_format(Path::new("a.csv.gz")).unwrap(), SheetFormat::Csv);
    assert_eq!(detect_format(Path::new("a.tsv.gz")).unwrap(), SheetFormat::Tsv);
    assert!(matches!(
        detect_format(Path::new("a.xlsx")),
        Err(InputError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_resolve_columns_any_order_and_aliases() {
    let cols = resolve_columns(&strings(&["原始分", "队伍名称", "extra", "工位", "组别"])).unwrap();
    assert_eq!(cols.raw_score, 0);
    assert_eq!(cols.team_name, 1);
    assert_eq!(cols.station, 3);
    assert_eq!(cols.category, 4);

    let cols = resolve_columns(&strings(&["\u{feff}Category", " Station ", "Team_Name", "RAW_SCORE"]))
        .unwrap();
    assert_eq!(cols.category, 0);
    assert_eq!(cols.raw_score, 3);
}

#[test]
fn test_resolve_columns_reports_all_missing() {
    let err = resolve_columns(&strings(&["category", "team_name"])).unwrap_err();
    match err {
        InputError::MissingColumns(cols) => assert_eq!(cols, vec!["station", "raw_score"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_raw_score() {
    assert_eq!(parse_raw_score("88.5", 2).unwrap(), 88.5);
    assert_eq!(parse_raw_score(" 0 ", 2).unwrap(), 0.0);
    assert_eq!(parse_raw_score("100", 2).unwrap(), 100.0);
    assert!(parse_raw_score("abc", 2).is_err());
    assert!(parse_raw_score("100.1", 2).is_err());
    assert!(parse_raw_score("-1", 2).is_err());
    assert!(parse_raw_score("NaN", 2).is_err());
}

#[test]
fn test_load_csv_with_default_labels() {
    let dir = make_temp_dir();
    let path = dir.join("scores.csv");
    write_file(
        &path,
        "组别,工位,队伍名称,原始分\n高中,工位1,A队,88\n\n中职,工位2,B队,72.5\n",
    );
    let opts = IngestOptions {
        labels: Some(LabelSet::default()),
        duplicates: DuplicatePolicy::Reject,
    };
    let records = load_records(&path, &opts).unwrap();
    assert_eq!(
        records,
        vec![
            Record::new("高中", "工位1", "A队", 88.0),
            Record::new("中职", "工位2", "B队", 72.5),
        ]
    );
}

#[test]
fn test_load_tsv_gz() {
    let dir = make_temp_dir();
    let path = dir.join("scores.tsv.gz");
    write_gz(
        &path,
        "category\tstation\tteam_name\traw_score\nA\tS1\tt1\t50\nA\tS1\tt2\t60\n",
    );
    let records = load_records(&path, &IngestOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].raw_score, 60.0);
}

#[test]
fn test_unknown_station_rejected_with_line() {
    let dir = make_temp_dir();
    let path = dir.join("scores.csv");
    write_file(&path, "组别,工位,队伍名称,原始分\n高中,工位1,A,88\n高中,工位9,B,70\n");
    let opts = IngestOptions {
        labels: Some(LabelSet::default()),
        duplicates: DuplicatePolicy::Reject,
    };
    match load_records(&path, &opts).unwrap_err() {
        InputError::InvalidInput { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("工位9"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_field_and_bad_score_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("missing.csv");
    write_file(&path, "category,station,team_name,raw_score\nA,S1,,50\n");
    assert!(matches!(
        load_records(&path, &IngestOptions::default()),
        Err(InputError::InvalidInput { line: 2, .. })
    ));

    let path = dir.join("bad.csv");
    write_file(&path, "category,station,team_name,raw_score\nA,S1,t,ninety\n");
    assert!(matches!(
        load_records(&path, &IngestOptions::default()),
        Err(InputError::InvalidInput { .. })
    ));
}

#[test]
fn test_header_only_is_empty() {
    let dir = make_temp_dir();
    let path = dir.join("empty.csv");
    write_file(&path, "category,station,team_name,raw_score\n");
    assert!(matches!(
        load_records(&path, &IngestOptions::default()),
        Err(InputError::Empty(_))
    ));
}

#[test]
fn test_zero_byte_file_is_empty() {
    let dir = make_temp_dir();
    for name in ["zero.csv", "zero.tsv"] {
        let path = dir.join(name);
        write_file(&path, "");
        assert!(matches!(
            load_records(&path, &IngestOptions::default()),
            Err(InputError::Empty(_))
        ));
    }
}

#[test]
fn test_duplicates_reject_lists_names() {
    let records = vec![
        Record::new("A", "S1", "x", 10.0),
        Record::new("A", "S2", "y", 20.0),
        Record::new("A", "S3", "x", 30.0),
    ];
    match resolve_duplicates(records, DuplicatePolicy::Reject).unwrap_err() {
        InputError::DuplicateTeams(names) => assert_eq!(names, vec!["x"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicates_keep_first() {
    let records = vec![
        Record::new("A", "S1", "x", 10.0),
        Record::new("A", "S2", "y", 20.0),
        Record::new("A", "S3", "x", 30.0),
    ];
    let kept = resolve_duplicates(records, DuplicatePolicy::KeepFirst).unwrap();
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0], Record::new("A", "S1", "x", 10.0));
    assert_eq!(kept[1].team_name, "y");
}

#[test]
fn test_duplicates_keep_highest() {
    let records = vec![
        Record::new("A", "S1", "x", 10.0),
        Record::new("A", "S2", "y", 20.0),
        Record::new("A", "S3", "x", 30.0),
        Record::new("A", "S4", "x", 30.0),
    ];
    let kept = resolve_duplicates(records, DuplicatePolicy::KeepHighest).unwrap();
    assert_eq!(
        kept,
        vec![
            Record::new("A", "S2", "y", 20.0),
            Record::new("A", "S3", "x", 30.0),
        ]
    );
}

#[test]
fn test_no_duplicates_passthrough() {
    let records = vec![Record::new("A", "S1", "x", 10.0), Record::new("A", "S1", "y", 20.0)];
    let kept = resolve_duplicates(records.clone(), DuplicatePolicy::Reject).unwrap();
    assert_eq!(kept, records);
}
