use crate::models::applicant::{
    ApplicantRecord, CHOSEN_TRACK, MOTIVATION, TEAM_NAME, TECHNICAL_SKILLS,
};

/// What the team prompt needs to know about one member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamMember {
    pub name: String,
    pub individual_score: Option<u32>,
    pub motivation: String,
    pub skills: String,
}

impl From<&ApplicantRecord> for TeamMember {
    fn from(record: &ApplicantRecord) -> Self {
        Self {
            name: record.first_name(),
            individual_score: record.individual_score(),
            motivation: record.text(MOTIVATION),
            skills: record.text(TECHNICAL_SKILLS),
        }
    }
}

/// A team derived from applicants sharing a team code. Never persisted; only
/// its evaluation is written back onto each member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRecord {
    pub team_code: String,
    pub team_name: String,
    pub chosen_track: String,
    pub members: Vec<TeamMember>,
}

impl TeamRecord {
    /// Builds team data from its members. Track and team name come from the first
    /// member; the name falls back to `Team <code>`.
    pub fn from_members(team_code: &str, members: &[ApplicantRecord]) -> Self {
        let first = members.first();
        Self {
            team_code: team_code.to_string(),
            team_name: first
                .and_then(|m| m.non_empty(TEAM_NAME))
                .unwrap_or_else(|| format!("Team {team_code}")),
            chosen_track: first.map(|m| m.text(CHOSEN_TRACK)).unwrap_or_default(),
            members: members.iter().map(TeamMember::from).collect(),
        }
    }

    /// Mean of the members' individual scores, ignoring members without one.
    pub fn average_individual_score(&self) -> Option<f64> {
        let scores: Vec<u32> = self
            .members
            .iter()
            .filter_map(|m| m.individual_score)
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64)
    }
}
