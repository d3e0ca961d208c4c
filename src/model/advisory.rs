use std::fmt;

use serde::Serialize;

/// Non-fatal conditions surfaced alongside a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    SingleTeamSpace {
        scoring_space: String,
        station: String,
        category: String,
    },
    DuplicateTeamName {
        team_name: String,
        occurrences: usize,
    },
}

impl Advisory {
    pub fn code(&self) -> &'static str {
        match self {
            Advisory::SingleTeamSpace { .. } => "SINGLE_TEAM_SPACE",
            Advisory::DuplicateTeamName { .. } => "DUPLICATE_TEAM_NAME",
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SingleTeamSpace {
                scoring_space,
                station,
                category,
            } => write!(
                f,
                "scoring space '{scoring_space}' (station {station}, category {category}) has a single team; baseline score applied"
            ),
            Advisory::DuplicateTeamName {
                team_name,
                occurrences,
            } => write!(
                f,
                "team '{team_name}' appears {occurrences} times; each record scored independently"
            ),
        }
    }
}
