use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Sample statistics with Bessel's correction. `std` is 0.0 below two values.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }
        Self {
            count: n,
            mean,
            std,
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceStats {
    pub scoring_space: String,
    pub station: String,
    pub category: String,
    #[serde(flatten)]
    pub stats: DescriptiveStats,
}

/// Per-category or per-station rollup of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub raw: DescriptiveStats,
    pub final_mean: f64,
}
