use anyhow::{Context, Result};

/// Judge configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_table_name: String,
    pub anthropic_api_key: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            airtable_api_key: require_env("AIRTABLE_API_KEY")?,
            airtable_base_id: require_env("AIRTABLE_BASE_ID")?,
            airtable_table_name: require_env("AIRTABLE_TABLE_NAME")?,
            anthropic_api_key: require_any_env(&["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"])?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// First of `keys` that is set wins. Older deployments used `CLAUDE_API_KEY`.
fn require_any_env(keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|key| std::env::var(key).ok())
        .with_context(|| {
            format!(
                "Required environment variable '{}' is not set",
                keys.join("' or '")
            )
        })
}
