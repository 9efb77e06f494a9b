//! Prompt Builder — renders the fixed-shape evaluation documents sent to the model.
//!
//! Pure string construction: no I/O. Every slot is always filled, with
//! `Not provided` for missing applicant text and `N/A` / `0` for missing
//! enrichment data, so the model sees the same document shape every time.

use crate::evaluation::prompts::{
    APPLICANT_PROMPT_TEMPLATE, TEAM_MEMBER_TEMPLATE, TEAM_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{
    FORMAT_ALERT, JUDGE_PERSONA, MINIMUM_SCORE_LINE, REVIEWER_GREETING,
};
use crate::models::applicant::{
    ApplicantRecord, CHOSEN_TRACK, COMPANY, FIRST_NAME, GITHUB_REPOSITORY, GITHUB_URL,
    MOTIVATION, PAST_PROJECTS, POST_EVENT_INTEREST, POST_EVENT_INTEREST_OTHER, TECHNICAL_SKILLS,
    TITLE,
};
use crate::models::enrichment::{ProfileSummary, RepoSummary};
use crate::models::team::{TeamMember, TeamRecord};

pub const NOT_PROVIDED: &str = "Not provided";
pub const NOT_AVAILABLE: &str = "N/A";

/// README text beyond this many characters is cut off.
const README_EXCERPT_CHARS: usize = 1500;

pub fn build_applicant_prompt(
    applicant: &ApplicantRecord,
    profile: Option<&ProfileSummary>,
    repo: Option<&RepoSummary>,
) -> String {
    // Error-bearing enrichment is rendered exactly like absent enrichment.
    let profile = profile.filter(|p| !p.is_error());
    let repo = repo.filter(|r| !r.is_error());

    let field = |name: &str| applicant.text_or(name, NOT_PROVIDED);

    let vars = [
        ("first_name", applicant.text_or(FIRST_NAME, "Applicant")),
        ("company", field(COMPANY)),
        ("title", field(TITLE)),
        ("chosen_track", field(CHOSEN_TRACK)),
        ("motivation", field(MOTIVATION)),
        ("skills", field(TECHNICAL_SKILLS)),
        ("past_projects", field(PAST_PROJECTS)),
        ("post_event_interest", field(POST_EVENT_INTEREST)),
        ("post_event_interest_other", field(POST_EVENT_INTEREST_OTHER)),
        ("github_url", field(GITHUB_URL)),
        (
            "github_username",
            or_na(profile.map(|p| p.username.as_str())),
        ),
        ("github_name", or_na(profile.map(|p| p.name.as_str()))),
        ("github_bio", or_na(profile.map(|p| p.bio.as_str()))),
        (
            "github_repo_count",
            profile.map_or(0, |p| p.repo_count).to_string(),
        ),
        (
            "github_followers",
            profile.map_or(0, |p| p.followers).to_string(),
        ),
        ("github_repo", field(GITHUB_REPOSITORY)),
        ("repo_name", or_na(repo.map(|r| r.repo_name.as_str()))),
        ("repo_language", or_na(repo.map(|r| r.language.as_str()))),
        ("repo_stars", repo.map_or(0, |r| r.stars).to_string()),
        ("repo_forks", repo.map_or(0, |r| r.forks).to_string()),
        ("repo_watchers", repo.map_or(0, |r| r.watchers).to_string()),
        (
            "repo_commit_count",
            repo.map_or(0, |r| r.commit_count).to_string(),
        ),
        (
            "repo_last_commit",
            repo.and_then(|r| r.last_commit_date)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        (
            "repo_readme_file",
            or_na(repo.and_then(|r| r.readme_filename.as_deref())),
        ),
        (
            "repo_readme",
            repo.and_then(|r| r.readme_content.as_deref())
                .map(readme_excerpt)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
    ];

    render(APPLICANT_PROMPT_TEMPLATE, &with_fragments(&vars))
}

pub fn build_team_prompt(team: &TeamRecord) -> String {
    let members = team
        .members
        .iter()
        .enumerate()
        .map(|(i, member)| member_block(i + 1, member))
        .collect::<Vec<_>>()
        .join("\n\n");

    let vars = [
        ("team_name", non_blank_or(&team.team_name, "Team")),
        ("chosen_track", non_blank_or(&team.chosen_track, NOT_PROVIDED)),
        ("team_size", team.members.len().to_string()),
        (
            "average_score",
            team.average_individual_score()
                .map(|avg| format!("{avg:.1}/100"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("members", members),
    ];

    render(TEAM_PROMPT_TEMPLATE, &with_fragments(&vars))
}

fn member_block(index: usize, member: &TeamMember) -> String {
    let vars = [
        ("index", index.to_string()),
        ("name", non_blank_or(&member.name, &format!("Member {index}"))),
        (
            "individual_score",
            member
                .individual_score
                .map(|s| format!("{s}/100"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("motivation", non_blank_or(&member.motivation, NOT_PROVIDED)),
        ("skills", non_blank_or(&member.skills, NOT_PROVIDED)),
    ];
    render(TEAM_MEMBER_TEMPLATE, &vars)
}

fn with_fragments(vars: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
    let mut all = vec![
        ("format_alert", FORMAT_ALERT.to_string()),
        ("judge_persona", JUDGE_PERSONA.to_string()),
        ("reviewer_greeting", REVIEWER_GREETING.to_string()),
        ("minimum_score_line", MINIMUM_SCORE_LINE.to_string()),
    ];
    all.extend(vars.iter().cloned());
    all
}

fn or_na(value: Option<&str>) -> String {
    non_blank_or(value.unwrap_or_default(), NOT_AVAILABLE)
}

fn non_blank_or(value: &str, placeholder: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn readme_excerpt(readme: &str) -> String {
    let readme = readme.trim();
    if readme.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    let mut excerpt: String = readme.chars().take(README_EXCERPT_CHARS).collect();
    if excerpt.len() < readme.len() {
        excerpt.push_str("\n[README truncated]");
    }
    excerpt
}

/// Single-pass `{name}` substitution. Substituted values are never rescanned, so
/// applicant text containing braces cannot pull in other slots. Unknown
/// placeholders are left as written.
fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let key_end = after.find('}');
        let value = key_end.and_then(|end| {
            let key = &after[..end];
            vars.iter().find(|(k, _)| *k == key).map(|(_, v)| (end, v))
        });
        match value {
            Some((end, v)) => {
                out.push_str(v);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
