use chrono::{DateTime, Utc};

/// Best-effort summary of a GitHub user profile.
///
/// All fields default to empty/zero. A set `error` means the lookup failed and the
/// summary carries no data; callers treat it as "not provided", never as fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSummary {
    pub username: String,
    pub name: String,
    pub bio: String,
    pub followers: u64,
    pub repo_count: u64,
    pub error: Option<String>,
}

impl ProfileSummary {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Best-effort summary of a public GitHub repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoSummary {
    pub repo_name: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    /// Commits on the default branch, capped at one API page (100).
    pub commit_count: u64,
    pub last_commit_date: Option<DateTime<Utc>>,
    pub readme_filename: Option<String>,
    pub readme_content: Option<String>,
    pub error: Option<String>,
}

impl RepoSummary {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
