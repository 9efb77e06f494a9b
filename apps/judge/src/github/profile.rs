//! Scraping of the public profile page. Selectors are best-effort; anything that
//! cannot be found comes back empty or zero.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::enrichment::ProfileSummary;

static NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<span[^>]*class="[^"]*\bp-name\b[^"]*"[^>]*>(.*?)</span>"#)
        .expect("valid regex")
});
static BIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<div[^>]*class="[^"]*\bp-note\b[^"]*"[^>]*>(.*?)</div>"#)
        .expect("valid regex")
});
static FOLLOWERS_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a[^>]*href="[^"]*\?tab=followers"[^>]*>(.*?)</a>"#).expect("valid regex")
});
static REPOSITORIES_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a[^>]*href="[^"]*\?tab=repositories"[^>]*>(.*?)</a>"#)
        .expect("valid regex")
});
static SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<span[^>]*>(.*?)</span>").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Username from a bare name or a profile URL. `None` for blank input.
///
/// `https://github.com/ada/`, `github.com/ada?tab=repositories` and `ada` all
/// yield `ada`.
pub fn username_from_identifier(identifier: &str) -> Option<String> {
    let identifier = identifier.trim();
    let tail = match identifier.rfind("github.com/") {
        Some(idx) => &identifier[idx + "github.com/".len()..],
        None => identifier,
    };
    tail.split(['/', '?', '#'])
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .map(|segment| segment.trim_start_matches('@').to_string())
        .filter(|username| !username.is_empty())
}

pub fn parse_profile_page(username: &str, html: &str) -> ProfileSummary {
    ProfileSummary {
        username: username.to_string(),
        name: capture_text(&NAME, html),
        bio: capture_text(&BIO, html),
        followers: link_count(&FOLLOWERS_LINK, html),
        repo_count: link_count(&REPOSITORIES_LINK, html),
        error: None,
    }
}

fn capture_text(pattern: &Regex, html: &str) -> String {
    pattern
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| clean_text(m.as_str()))
        .unwrap_or_default()
}

/// Count from the first `<span>` inside the matched link; 0 when the link or
/// its span is missing.
fn link_count(link: &Regex, html: &str) -> u64 {
    link.captures(html)
        .and_then(|c| c.get(1))
        .map(|body| parse_count(&capture_text(&SPAN, body.as_str())))
        .unwrap_or(0)
}

/// Strips markup, decodes the common entities, collapses whitespace.
fn clean_text(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, " ");
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain integer counts only. Abbreviated counts such as `1.2k` become 0.
fn parse_count(text: &str) -> u64 {
    text.trim().parse::<u64>().unwrap_or(0)
}
