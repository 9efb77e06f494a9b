use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Column names in the applicant table.
pub const FIRST_NAME: &str = "First Name";
pub const CHOSEN_TRACK: &str = "Chosen Track";
pub const COMPANY: &str = "Company";
pub const TITLE: &str = "Title";
pub const GITHUB_URL: &str = "GitHub URL";
pub const GITHUB_REPOSITORY: &str = "GitHub Repository Link for Project";
pub const MOTIVATION: &str = "Motivation to Join";
pub const TECHNICAL_SKILLS: &str = "Technical Skills";
pub const PAST_PROJECTS: &str = "Past Projects";
pub const POST_EVENT_INTEREST: &str = "Post-Event Development Interest";
pub const POST_EVENT_INTEREST_OTHER: &str = "Other";
pub const TEAM_CODE: &str = "Team Code";
pub const TEAM_NAME: &str = "Team Name";
pub const INDIVIDUAL_SCORE: &str = "Individual Score";
pub const INDIVIDUAL_FEEDBACK: &str = "Individual Feedback";
pub const TEAM_SCORE: &str = "Team Score";
pub const TEAM_FEEDBACK: &str = "Team Feedback";

/// One row of the applicant table, as fetched at the start of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    /// Opaque store identifier, used for write-back.
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl ApplicantRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Trimmed text of a field. Absent and null fields are empty; numbers and
    /// booleans are rendered; list fields (multi-selects) are comma-joined.
    pub fn text(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(value) => value_to_text(value),
        }
    }

    /// Field text, or `None` when it is blank.
    pub fn non_empty(&self, field: &str) -> Option<String> {
        let text = self.text(field);
        (!text.is_empty()).then_some(text)
    }

    /// Field text, or `placeholder` when it is blank.
    pub fn text_or(&self, field: &str, placeholder: &str) -> String {
        self.non_empty(field)
            .unwrap_or_else(|| placeholder.to_string())
    }

    pub fn first_name(&self) -> String {
        self.text(FIRST_NAME)
    }

    /// Name used in logs: first name when present, store id otherwise.
    pub fn display_name(&self) -> String {
        self.non_empty(FIRST_NAME)
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn team_code(&self) -> Option<String> {
        self.non_empty(TEAM_CODE)
    }

    /// Previously written individual score. Accepts numbers and numeric strings.
    pub fn individual_score(&self) -> Option<u32> {
        match self.fields.get(INDIVIDUAL_SCORE)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
                .and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        }
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: Value) -> ApplicantRecord {
        let Value::Object(map) = fields else {
            panic!("fields must be an object")
        };
        ApplicantRecord::new("rec1", map)
    }

    #[test]
    fn test_text_trims_and_defaults_to_empty() {
        let r = record(json!({"First Name": "  Ada  ", "Company": null}));
        assert_eq!(r.text(FIRST_NAME), "Ada");
        assert_eq!(r.text(COMPANY), "");
        assert_eq!(r.text(TITLE), "");
    }

    #[test]
    fn test_text_joins_multi_select() {
        let r = record(json!({"Technical Skills": ["Rust", "", "Go"]}));
        assert_eq!(r.text(TECHNICAL_SKILLS), "Rust, Go");
    }

    #[test]
    fn test_text_or_uses_placeholder_for_blank() {
        let r = record(json!({"Company": "   "}));
        assert_eq!(r.text_or(COMPANY, "Not provided"), "Not provided");
    }

    #[test]
    fn test_team_code_blank_is_none() {
        assert_eq!(record(json!({"Team Code": " "})).team_code(), None);
        assert_eq!(
            record(json!({"Team Code": " A1 "})).team_code(),
            Some("A1".to_string())
        );
    }

    #[test]
    fn test_individual_score_accepts_number_and_string() {
        assert_eq!(record(json!({"Individual Score": 72})).individual_score(), Some(72));
        assert_eq!(record(json!({"Individual Score": 72.4})).individual_score(), Some(72));
        assert_eq!(record(json!({"Individual Score": "65"})).individual_score(), Some(65));
        assert_eq!(record(json!({"Individual Score": ""})).individual_score(), None);
        assert_eq!(record(json!({})).individual_score(), None);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(record(json!({})).display_name(), "rec1");
        assert_eq!(record(json!({"First Name": "Grace"})).display_name(), "Grace");
    }
}
