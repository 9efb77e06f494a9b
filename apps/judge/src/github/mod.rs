//! Profile Enricher — best-effort GitHub signals for an applicant.
//!
//! Two read-only sources: the public profile page (HTML, scraped) and the REST API
//! for repository metadata, commits and README. Nothing here returns `Err`: every
//! failure is folded into the summary's `error` field and logged, and callers treat
//! an error-bearing summary as "no data".

pub mod profile;
pub mod repo;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::enrichment::{ProfileSummary, RepoSummary};

const GITHUB_WEB_URL: &str = "https://github.com";
const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("judge/", env!("CARGO_PKG_VERSION"));
const COMMITS_PAGE_SIZE: u32 = 100;

/// Source of GitHub enrichment. Implementations never fail.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn fetch_profile(&self, identifier: &str) -> ProfileSummary;
    async fn fetch_repo(&self, url: &str) -> RepoSummary;
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    web_url: String,
    api_url: String,
}

impl GithubClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_urls(GITHUB_WEB_URL.to_string(), GITHUB_API_URL.to_string())
    }

    pub fn with_base_urls(web_url: String, api_url: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            web_url: web_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_profile(&self, username: &str) -> Result<ProfileSummary, String> {
        let url = format!("{}/{}", self.web_url, username);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Profile page returned status {}", status.as_u16()));
        }

        let html = response.text().await.map_err(|e| e.to_string())?;
        Ok(profile::parse_profile_page(username, &html))
    }

    async fn get_repo(&self, owner: &str, name: &str) -> Result<RepoSummary, String> {
        let repo_url = format!("{}/repos/{}/{}", self.api_url, owner, name);

        let (status, metadata) = self.get_json(&repo_url).await?;
        if !status.is_success() {
            return Err(format!("Repo API returned status {}", status.as_u16()));
        }
        let metadata = metadata.unwrap_or(Value::Null);
        let mut summary = repo::summary_from_metadata(&metadata);

        let commits_url = format!("{repo_url}/commits?per_page={COMMITS_PAGE_SIZE}");
        match self.get_json(&commits_url).await {
            Ok((status, Some(commits))) if status.is_success() => {
                repo::apply_commits(&mut summary, &commits);
            }
            Ok((status, _)) => {
                // 409 is what GitHub sends for an empty repository.
                debug!("Commits API returned status {} for {owner}/{name}", status.as_u16());
            }
            Err(e) => debug!("Commits lookup failed for {owner}/{name}: {e}"),
        }
        if summary.last_commit_date.is_none() {
            summary.last_commit_date = repo::pushed_at(&metadata);
        }

        let readme_url = format!("{repo_url}/readme");
        match self.get_json(&readme_url).await {
            Ok((status, Some(readme))) if status.is_success() => {
                repo::apply_readme(&mut summary, &readme);
            }
            Ok((status, _)) => debug!("No README for {owner}/{name} (status {})", status.as_u16()),
            Err(e) => debug!("README lookup failed for {owner}/{name}: {e}"),
        }

        Ok(summary)
    }

    /// GET returning the status and, on success, the parsed body.
    async fn get_json(&self, url: &str) -> Result<(StatusCode, Option<Value>), String> {
        let response = self
            .client
            .get(url)
            .header("Accept", GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Ok((status, None));
        }
        let body = response.json::<Value>().await.map_err(|e| e.to_string())?;
        Ok((status, Some(body)))
    }
}

#[async_trait]
impl Enricher for GithubClient {
    async fn fetch_profile(&self, identifier: &str) -> ProfileSummary {
        let Some(username) = profile::username_from_identifier(identifier) else {
            return ProfileSummary::default();
        };

        match self.get_profile(&username).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("GitHub profile lookup failed for '{username}': {e}");
                ProfileSummary::failed(e)
            }
        }
    }

    async fn fetch_repo(&self, url: &str) -> RepoSummary {
        if url.trim().is_empty() {
            return RepoSummary::default();
        }

        let (owner, name) = match repo::parse_repo_url(url) {
            Ok(parts) => parts,
            Err(e) => {
                warn!("Skipping repo enrichment for '{url}': {e}");
                return RepoSummary::failed(e);
            }
        };

        match self.get_repo(&owner, &name).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("GitHub repo lookup failed for {owner}/{name}: {e}");
                RepoSummary::failed(e)
            }
        }
    }
}
