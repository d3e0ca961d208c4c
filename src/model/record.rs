use serde::{Deserialize, Serialize};

/// One team's validated input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub category: String,
    pub station: String,
    pub team_name: String,
    pub raw_score: f64,
}

impl Record {
    pub fn new(category: &str, station: &str, team_name: &str, raw_score: f64) -> Self {
        Self {
            category: category.to_string(),
            station: station.to_string(),
            team_name: team_name.to_string(),
            raw_score,
        }
    }

    pub fn scoring_space(&self) -> String {
        space_key(&self.station, &self.category)
    }
}

pub fn space_key(station: &str, category: &str) -> String {
    format!("{station}-{category}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub category: String,
    pub station: String,
    pub team_name: String,
    pub raw_score: f64,
    pub scoring_space: String,
    pub final_score: f64,
    pub rank_in_category: u32,
    pub rank_in_station: u32,
    pub rank_in_space: u32,
}
