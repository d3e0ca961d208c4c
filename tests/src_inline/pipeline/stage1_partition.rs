use super::*;

fn rec(category: &str, station: &str, team: &str, raw: f64) -> Record {
    Record::new(category, station, team, raw)
}

fn space<'a>(out: &'a Stage1Output, station: &str, category: &str) -> &'a SpaceStats {
    out.spaces
        .iter()
        .find(|s| s.station == station && s.category == category)
        .unwrap()
}

#[test]
fn test_space_key_is_station_then_category() {
    let out = run_stage1(&[rec("高中", "工位1", "A", 80.0), rec("高中", "工位1", "B", 60.0)]);
    assert_eq!(out.assignments, vec![0, 0]);
    assert_eq!(out.spaces.len(), 1);
    let space = out.space_of(1);
    assert_eq!(space.scoring_space, "工位1-高中");
    assert_eq!(space.station, "工位1");
    assert_eq!(space.category, "高中");
}

#[test]
fn test_space_statistics() {
    let records = vec![
        rec("中职", "工位2", "A", 80.0),
        rec("中职", "工位2", "B", 70.0),
        rec("中职", "工位2", "C", 60.0),
        rec("高中", "工位2", "D", 55.0),
    ];
    let out = run_stage1(&records);
    assert_eq!(out.spaces.len(), 2);

    let a = &space(&out, "工位2", "中职").stats;
    assert_eq!(a.count, 3);
    assert!((a.mean - 70.0).abs() < 1e-12);
    assert!((a.std - 10.0).abs() < 1e-12);
    assert_eq!(a.min, 60.0);
    assert_eq!(a.max, 80.0);

    let b = &space(&out, "工位2", "高中").stats;
    assert_eq!(b.count, 1);
    assert_eq!(b.std, 0.0);
    assert_eq!(b.mean, 55.0);
}

#[test]
fn test_spaces_are_disjoint_and_cover_input() {
    let records = vec![
        rec("高中", "工位1", "A", 10.0),
        rec("中职", "工位1", "B", 20.0),
        rec("高中", "工位2", "C", 30.0),
        rec("高中", "工位1", "D", 40.0),
    ];
    let out = run_stage1(&records);
    let total: usize = out.spaces.iter().map(|s| s.stats.count).sum();
    assert_eq!(total, records.len());
    assert_eq!(out.assignments.len(), records.len());
    assert_eq!(out.assignments[0], out.assignments[3]);
    assert_eq!(out.space_of(3).scoring_space, "工位1-高中");
}

#[test]
fn test_spaces_ordered_by_station_then_category() {
    let out = run_stage1(&[
        rec("高中", "工位2", "A", 1.0),
        rec("高中", "工位1", "B", 2.0),
        rec("中职", "工位1", "C", 3.0),
    ]);
    let keys = out
        .spaces
        .iter()
        .map(|s| s.scoring_space.as_str())
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["工位1-中职", "工位1-高中", "工位2-高中"]);
}

#[test]
fn test_every_assignment_points_at_a_space() {
    let records = vec![
        rec("高中", "工位1", "A", 10.0),
        rec("中职", "工位3", "B", 20.0),
        rec("高中", "工位2", "C", 30.0),
    ];
    let out = run_stage1(&records);
    for (idx, record) in records.iter().enumerate() {
        let space = out.space_of(idx);
        assert_eq!(space.station, record.station);
        assert_eq!(space.category, record.category);
    }
}

#[test]
fn test_hyphenated_labels_do_not_merge_spaces() {
    // Both render as "a-b-c" but are different (station, category) pairs.
    let out = run_stage1(&[rec("c", "a-b", "A", 90.0), rec("b-c", "a", "B", 10.0)]);
    assert_eq!(out.spaces.len(), 2);
    assert_ne!(out.assignments[0], out.assignments[1]);
    assert!(out.spaces.iter().all(|s| s.scoring_space == "a-b-c"));
    assert!(out.spaces.iter().all(|s| s.stats.count == 1));
    assert_eq!(out.space_of(0).stats.mean, 90.0);
    assert_eq!(out.space_of(1).stats.mean, 10.0);
}

#[test]
fn test_unknown_labels_pass_through() {
    let out = run_stage1(&[rec("x", "y", "A", 1.0)]);
    assert_eq!(out.space_of(0).scoring_space, "y-x");
}
