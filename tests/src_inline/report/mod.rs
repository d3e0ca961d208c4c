use super::*;
use crate::model::record::ResultRecord;

fn result(team: &str, space: &str, rank: u32) -> ResultRecord {
    ResultRecord {
        category: "高中".to_string(),
        station: "工位1".to_string(),
        team_name: team.to_string(),
        raw_score: 50.0,
        scoring_space: space.to_string(),
        final_score: 70.0,
        rank_in_category: rank,
        rank_in_station: rank,
        rank_in_space: rank,
    }
}

#[test]
fn test_format_helpers() {
    assert_eq!(format_f64_1(70.0), "70.0");
    assert_eq!(format_f64_1(69.94), "69.9");
    assert_eq!(format_f64_3(10.0), "10.000");
}

#[test]
fn test_podium_includes_ties() {
    let results = vec![
        result("a", "s1", 1),
        result("b", "s1", 1),
        result("c", "s1", 3),
        result("d", "s2", 1),
    ];
    let names = podium(&results)
        .iter()
        .map(|r| r.team_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["a", "b", "d"]);
}
