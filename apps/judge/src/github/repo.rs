//! Repository URL parsing and mapping of GitHub REST payloads into a `RepoSummary`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::Value;
use url::Url;

use crate::models::enrichment::RepoSummary;

pub const INVALID_REPO_URL: &str = "Invalid GitHub repo URL";

/// Splits a repository URL into `(owner, repo)`.
///
/// Accepts URLs with or without a scheme; the host must be github.com and the path
/// must carry both an owner and a repo segment. A trailing `.git` is dropped.
pub fn parse_repo_url(raw: &str) -> Result<(String, String), String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|_| INVALID_REPO_URL.to_string())?;
    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(INVALID_REPO_URL.to_string()),
    }

    let mut segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty());
    let (Some(owner), Some(repo)) = (segments.next(), segments.next()) else {
        return Err(INVALID_REPO_URL.to_string());
    };

    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return Err(INVALID_REPO_URL.to_string());
    }
    Ok((owner.to_string(), repo.to_string()))
}

/// Maps `GET /repos/{owner}/{repo}`. Missing or non-numeric counts become 0.
pub fn summary_from_metadata(metadata: &Value) -> RepoSummary {
    RepoSummary {
        repo_name: string_field(metadata, "name"),
        language: string_field(metadata, "language"),
        stars: count_field(metadata, "stargazers_count"),
        forks: count_field(metadata, "forks_count"),
        watchers: count_field(metadata, "watchers_count"),
        ..RepoSummary::default()
    }
}

/// Applies one page of `GET /repos/{owner}/{repo}/commits`, newest first.
pub fn apply_commits(summary: &mut RepoSummary, commits: &Value) {
    let Some(commits) = commits.as_array() else {
        return;
    };
    summary.commit_count = commits.len() as u64;
    summary.last_commit_date = commits
        .first()
        .and_then(|c| c.pointer("/commit/committer/date"))
        .and_then(Value::as_str)
        .and_then(parse_timestamp);
}

pub fn pushed_at(metadata: &Value) -> Option<DateTime<Utc>> {
    metadata
        .get("pushed_at")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
}

/// Applies `GET /repos/{owner}/{repo}/readme`. Content arrives base64 encoded with
/// embedded line breaks; undecodable content leaves the README unset.
pub fn apply_readme(summary: &mut RepoSummary, readme: &Value) {
    let Some(encoded) = readme.get("content").and_then(Value::as_str) else {
        return;
    };
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let Ok(bytes) = STANDARD.decode(compact) else {
        return;
    };
    summary.readme_content = Some(String::from_utf8_lossy(&bytes).into_owned());
    summary.readme_filename = Some(
        readme
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("README")
            .to_string(),
    );
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn count_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parts(owner: &str, repo: &str) -> Result<(String, String), String> {
        Ok((owner.to_string(), repo.to_string()))
    }

    #[test]
    fn test_parse_repo_url_variants() {
        assert_eq!(parse_repo_url("https://github.com/ada/engine"), parts("ada", "engine"));
        assert_eq!(parse_repo_url("github.com/ada/engine/"), parts("ada", "engine"));
        assert_eq!(parse_repo_url("https://github.com/ada/engine.git"), parts("ada", "engine"));
        assert_eq!(
            parse_repo_url("https://www.github.com/ada/engine/tree/main/src"),
            parts("ada", "engine")
        );
    }

    #[test]
    fn test_parse_repo_url_rejects_malformed() {
        for bad in [
            "https://github.com/onlyowner",
            "https://github.com/",
            "ada/engine",
            "https://gitlab.com/ada/engine",
            "not a url at all",
            "https://github.com/ada/.git",
        ] {
            assert_eq!(
                parse_repo_url(bad),
                Err(INVALID_REPO_URL.to_string()),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_summary_from_metadata_defaults() {
        let summary = summary_from_metadata(&json!({
            "name": "engine",
            "stargazers_count": "many",
            "forks_count": null
        }));
        assert_eq!(summary.repo_name, "engine");
        assert_eq!(summary.language, "");
        assert_eq!(summary.stars, 0);
        assert_eq!(summary.forks, 0);
        assert_eq!(summary.watchers, 0);
    }

    #[test]
    fn test_apply_commits_ignores_non_array() {
        let mut summary = RepoSummary::default();
        apply_commits(&mut summary, &json!({"message": "Git Repository is empty."}));
        assert_eq!(summary.commit_count, 0);
        assert_eq!(summary.last_commit_date, None);
    }

    #[test]
    fn test_apply_readme_handles_wrapped_base64() {
        let mut summary = RepoSummary::default();
        // "hello readme" encoded, wrapped the way the API wraps it.
        apply_readme(&mut summary, &json!({"content": "aGVsbG8g\ncmVhZG1l\n"}));
        assert_eq!(summary.readme_content.as_deref(), Some("hello readme"));
        assert_eq!(summary.readme_filename.as_deref(), Some("README"));
    }

    #[test]
    fn test_apply_readme_bad_base64_is_ignored() {
        let mut summary = RepoSummary::default();
        apply_readme(&mut summary, &json!({"name": "README.md", "content": "!!!"}));
        assert_eq!(summary.readme_content, None);
        assert_eq!(summary.readme_filename, None);
    }
}
