use crate::model::config::BASELINE_SCORE;
use crate::model::stats::DescriptiveStats;
use crate::pipeline::stage2_normalize::is_zero_std;
use crate::report::{ReportContext, SummaryData, format_f64_1, podium};

pub fn render_report_text(ctx: &ReportContext, data: &SummaryData<'_>) -> String {
    let mut out = String::new();

    out.push_str("Competition Score Report\n");
    out.push_str("========================\n\n");
    out.push_str(&format!("Input: {}\n", ctx.input_path));
    out.push_str(&format!(
        "Minimum std floor: {}\n",
        format_f64_1(data.config.min_std_floor)
    ));
    out.push_str(&format!(
        "Scale: baseline {BASELINE_SCORE}, 10 points per std, clamped to 0-100\n\n"
    ));

    out.push_str("1. Overall\n");
    out.push_str(&format!("Teams: {}\n", data.overall.count));
    push_stats(&mut out, data.overall);
    out.push('\n');

    out.push_str("2. Categories\n");
    for g in data.categories {
        out.push_str(&format!(
            "{}: teams={} mean={} std={} range={}-{} final_mean={}\n",
            g.name,
            g.raw.count,
            format_f64_1(g.raw.mean),
            format_f64_1(g.raw.std),
            format_f64_1(g.raw.min),
            format_f64_1(g.raw.max),
            format_f64_1(g.final_mean)
        ));
    }
    out.push('\n');

    out.push_str("3. Stations\n");
    for g in data.stations {
        out.push_str(&format!(
            "{}: teams={} raw_mean={} final_mean={}\n",
            g.name,
            g.raw.count,
            format_f64_1(g.raw.mean),
            format_f64_1(g.final_mean)
        ));
    }
    out.push('\n');

    out.push_str("4. Scoring spaces\n");
    for s in data.spaces {
        let floor_note = if !is_zero_std(s.stats.std) && s.stats.std < data.config.min_std_floor {
            " (floor applied)"
        } else {
            ""
        };
        out.push_str(&format!(
            "{}: teams={} mean={} std={}{} range={}-{}\n",
            s.scoring_space,
            s.stats.count,
            format_f64_1(s.stats.mean),
            format_f64_1(s.stats.std),
            floor_note,
            format_f64_1(s.stats.min),
            format_f64_1(s.stats.max)
        ));
    }
    out.push('\n');

    out.push_str("5. Leaders by scoring space\n");
    for r in podium(data.results) {
        out.push_str(&format!(
            "{}: {} (raw {}, final {})\n",
            r.scoring_space,
            r.team_name,
            format_f64_1(r.raw_score),
            format_f64_1(r.final_score)
        ));
    }
    out.push('\n');

    out.push_str("6. Advisories\n");
    if data.advisories.is_empty() {
        out.push_str("None\n");
    } else {
        for a in data.advisories {
            out.push_str(&format!("[{}] {}\n", a.code(), a));
        }
    }

    out
}

fn push_stats(out: &mut String, s: &DescriptiveStats) {
    out.push_str(&format!(
        "Mean: {}\nStd: {}\nRange: {}-{}\n",
        format_f64_1(s.mean),
        format_f64_1(s.std),
        format_f64_1(s.min),
        format_f64_1(s.max)
    ));
}
