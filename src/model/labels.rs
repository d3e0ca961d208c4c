pub const DEFAULT_CATEGORIES: &[&str] = &["高职(专科)", "高职(本科)", "高中", "中职", "普通本科"];

pub const DEFAULT_STATIONS: &[&str] = &[
    "工位1", "工位2", "工位3", "工位4", "工位5", "工位6", "工位7",
];

/// Allowed category and station labels for an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    pub categories: Vec<String>,
    pub stations: Vec<String>,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            stations: DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LabelSet {
    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    pub fn has_station(&self, label: &str) -> bool {
        self.stations.iter().any(|s| s == label)
    }
}
