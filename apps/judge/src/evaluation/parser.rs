//! Response Parser — pulls a bounded score and a feedback body out of free-form
//! model output.
//!
//! Score extraction walks an ordered list of independent rules. Each rule looks at
//! its first match only; a number outside 0..=100 is rejected and the next rule is
//! tried. When no rule yields a valid score the reply is kept whole as feedback
//! and the score floors at [`FALLBACK_SCORE`] so a reviewer can still read it.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Score recorded when the reply has no legible score.
pub const FALLBACK_SCORE: u32 = 10;
const MAX_SCORE: u64 = 100;

/// Parsed outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: u32,
    pub feedback: String,
}

/// A named score pattern. Capture group 1 holds the number.
struct ScoreRule {
    name: &'static str,
    pattern: Regex,
}

impl ScoreRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("score pattern must compile"),
        }
    }

    fn extract(&self, text: &str) -> Option<u32> {
        let captures = self.pattern.captures(text)?;
        let value = captures.get(1)?.as_str().parse::<u64>().ok()?;
        (value <= MAX_SCORE).then_some(value as u32)
    }
}

static TEAM_SCORE_RULES: Lazy<Vec<ScoreRule>> = Lazy::new(|| {
    vec![
        ScoreRule::new("team score out of 100", r"(?i)Team Score:\s*(\d+)/100"),
        ScoreRule::new("team score", r"(?i)Team Score:\s*(\d+)"),
    ]
});

static SCORE_RULES: Lazy<Vec<ScoreRule>> = Lazy::new(|| {
    vec![
        ScoreRule::new("score out of 100", r"(?i)Score:\s*(\d+)/100"),
        ScoreRule::new("score", r"(?i)Score:\s*(\d+)"),
        ScoreRule::new("fraction of 100", r"(\d+)/100"),
        ScoreRule::new("out of 100", r"(?i)(\d+)\s*out of 100"),
        ScoreRule::new("points", r"(?i)(\d+)\s*points"),
        ScoreRule::new("percent", r"(\d+)\s*%"),
    ]
});

static TEAM_FEEDBACK_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Team Feedback:\s*(.*)").expect("valid regex"));
static FEEDBACK_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Feedback:\s*(.*)").expect("valid regex"));

static SCORE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Score:\s*\d+").expect("valid regex"));
static TEAM_SCORE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(Team\s+)?Score:\s*\d+").expect("valid regex"));

/// Parses an individual evaluation reply.
pub fn parse(raw: &str) -> Evaluation {
    let score = first_valid_score(raw, SCORE_RULES.iter());
    let feedback = extract_feedback(raw, &[&*FEEDBACK_LABEL], &SCORE_LINE);
    finish(raw, score, feedback, "applicant")
}

/// Parses a team evaluation reply. Team-labelled rules take precedence.
pub fn parse_team(raw: &str) -> Evaluation {
    let score = first_valid_score(raw, TEAM_SCORE_RULES.iter().chain(SCORE_RULES.iter()));
    let feedback = extract_feedback(
        raw,
        &[&*TEAM_FEEDBACK_LABEL, &*FEEDBACK_LABEL],
        &TEAM_SCORE_LINE,
    );
    finish(raw, score, feedback, "team")
}

fn first_valid_score<'a>(text: &str, rules: impl Iterator<Item = &'a ScoreRule>) -> Option<u32> {
    for rule in rules {
        if let Some(score) = rule.extract(text) {
            debug!("Score {score} matched rule '{}'", rule.name);
            return Some(score);
        }
    }
    None
}

/// Text after the first matching label, or the reply minus its score lines.
fn extract_feedback(text: &str, labels: &[&Regex], score_line: &Regex) -> String {
    for label in labels {
        if let Some(body) = label.captures(text).and_then(|c| c.get(1)) {
            return body.as_str().trim().to_string();
        }
    }

    text.lines()
        .filter(|line| !score_line.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn finish(raw: &str, score: Option<u32>, feedback: String, kind: &str) -> Evaluation {
    match score {
        Some(score) => Evaluation { score, feedback },
        None => {
            warn!("Could not extract {kind} score from response, using fallback score {FALLBACK_SCORE}");
            Evaluation {
                score: FALLBACK_SCORE,
                feedback: raw.trim().to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_reply() {
        let eval = parse("Score: 57/100\n\nFeedback: hi");
        assert_eq!(eval.score, 57);
        assert_eq!(eval.feedback, "hi");
    }

    #[test]
    fn test_standard_team_reply() {
        let eval = parse_team("Team Score: 91\n\nTeam Feedback: great team");
        assert_eq!(eval.score, 91);
        assert_eq!(eval.feedback, "great team");
    }

    #[test]
    fn test_feedback_runs_to_end_including_recommendation() {
        let eval = parse(
            "Score: 75/100\n\nFeedback: Hey Alan and Gretel,\nSolid applicant.\n\nRecommendation: Waitlist\n",
        );
        assert_eq!(eval.score, 75);
        assert_eq!(
            eval.feedback,
            "Hey Alan and Gretel,\nSolid applicant.\n\nRecommendation: Waitlist"
        );
    }

    #[test]
    fn test_no_score_falls_back_to_full_text() {
        let raw = "I cannot evaluate this applicant without more information.";
        let eval = parse(raw);
        assert_eq!(eval.score, FALLBACK_SCORE);
        assert_eq!(eval.feedback, raw);
    }

    #[test]
    fn test_no_score_fallback_ignores_feedback_label() {
        let raw = "Feedback: looks promising but no number given";
        let eval = parse(raw);
        assert_eq!(eval.score, 10);
        assert_eq!(eval.feedback, raw);
    }

    #[test]
    fn test_out_of_range_is_rejected_and_falls_through() {
        let eval = parse("Score: 150/100\nOverall I'd put this at 80 out of 100.\nFeedback: ok");
        assert_eq!(eval.score, 80);
        assert_eq!(eval.feedback, "ok");
    }

    #[test]
    fn test_out_of_range_only_yields_fallback() {
        let raw = "Score: 150/100";
        let eval = parse(raw);
        assert_eq!(eval.score, 10);
        assert_eq!(eval.feedback, raw);
    }

    #[test]
    fn test_huge_number_does_not_panic() {
        let eval = parse("Score: 99999999999999999999999/100\nFeedback: x");
        assert_eq!(eval.score, 10);
    }

    #[test]
    fn test_precedence_prefers_labelled_score() {
        // "Score:" outranks a bare fraction that appears earlier in the text.
        let eval = parse("Compared to last year's 40/100 average...\nScore: 66\nFeedback: fine");
        assert_eq!(eval.score, 66);
    }

    #[test]
    fn test_bare_patterns() {
        assert_eq!(parse("I rate this 72/100.").score, 72);
        assert_eq!(parse("A solid 64 out of 100 overall").score, 64);
        assert_eq!(parse("Worth 58 points").score, 58);
        assert_eq!(parse("Confidence 90% in this one").score, 90);
    }

    #[test]
    fn test_case_insensitive_labels() {
        let eval = parse("SCORE: 33/100\n\nfeedback: meh");
        assert_eq!(eval.score, 33);
        assert_eq!(eval.feedback, "meh");
    }

    #[test]
    fn test_zero_and_hundred_are_valid() {
        assert_eq!(parse("Score: 0/100").score, 0);
        assert_eq!(parse("Score: 100/100").score, 100);
    }

    #[test]
    fn test_missing_label_strips_score_line() {
        let eval = parse("Score: 70/100\n\nGood motivation, thin GitHub.");
        assert_eq!(eval.score, 70);
        assert_eq!(eval.feedback, "Good motivation, thin GitHub.");
    }

    #[test]
    fn test_team_prefers_team_feedback_label() {
        let eval = parse_team(
            "Team Score: 82/100\n\nTeam Feedback: Hey Alan and Gretel,\nGreat synergy.\n\nRecommendation: Select",
        );
        assert_eq!(eval.score, 82);
        assert_eq!(
            eval.feedback,
            "Hey Alan and Gretel,\nGreat synergy.\n\nRecommendation: Select"
        );
    }

    #[test]
    fn test_team_falls_back_to_generic_labels() {
        let eval = parse_team("Score: 77/100\n\nFeedback: decent mix");
        assert_eq!(eval.score, 77);
        assert_eq!(eval.feedback, "decent mix");
    }

    #[test]
    fn test_team_score_out_of_range_falls_through() {
        let eval = parse_team("Team Score: 180\nTeam Feedback: this team is 85% ready");
        assert_eq!(eval.score, 85);
    }

    #[test]
    fn test_team_missing_label_strips_team_score_line() {
        let eval = parse_team("Team Score: 60/100\nScore: 60\nAverage collaboration signals.");
        assert_eq!(eval.score, 60);
        assert_eq!(eval.feedback, "Average collaboration signals.");
    }
}
