// Shared prompt fragments used by both the applicant and the team templates.
// Each template lives in evaluation/prompts.rs and splices these in.

/// Opening line of every evaluation prompt. The parser anchors on the score line,
/// so the model is told up front that it must come first.
pub const FORMAT_ALERT: &str =
    "🚨 SYSTEM CRITICAL: YOUR RESPONSE MUST BEGIN WITH A SCORE LINE OR THE SYSTEM WILL CRASH 🚨";

/// Who the model is writing for.
pub const JUDGE_PERSONA: &str = "You are an experienced hackathon judge preparing internal notes \
    for selection reviewers (Alan and Gretel).";

/// Greeting the feedback body opens with.
pub const REVIEWER_GREETING: &str = "Hey Alan and Gretel,";

/// Lowest score the model should ever hand out. Matches the parser fallback.
pub const MINIMUM_SCORE_LINE: &str = "- Minimum score: 10/100";
