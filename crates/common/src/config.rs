use serde::Deserialize;

/// Default GitHub meta endpoint publishing the hook source ranges.
pub const DEFAULT_GITHUB_META_URL: &str = "https://api.github.com/meta";

/// Default Slack Web API endpoint for posting messages.
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api/chat.postMessage";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Slack bot token used for chat.postMessage
    pub slack_token: String,

    /// Slack API endpoint (overridable for tests)
    pub slack_api_url: String,

    /// Path to the repository registry JSON file
    pub repos_file: String,

    /// GitHub meta endpoint for the hook-origin allowlist (overridable for GHES)
    pub github_meta_url: String,

    /// Port the webhook server listens on (default: 3000)
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            slack_token: std::env::var("SLACK_TOKEN")
                .map_err(|_| anyhow::anyhow!("SLACK_TOKEN environment variable is required"))?,
            slack_api_url: std::env::var("SLACK_API_URL")
                .unwrap_or_else(|_| DEFAULT_SLACK_API_URL.to_string()),
            repos_file: std::env::var("SKYHOOK_REPOS")
                .map_err(|_| anyhow::anyhow!("SKYHOOK_REPOS environment variable is required"))?,
            github_meta_url: std::env::var("GITHUB_META_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_META_URL.to_string()),
            port: std::env::var("SKYHOOK_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SKYHOOK_PORT must be a valid u16"))?,
        })
    }
}
