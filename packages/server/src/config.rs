use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::store::RollbackPolicy;

/// Default number of outbound unlocks a visitor gets per calendar day
pub const DEFAULT_DAILY_UNLOCK_LIMIT: u32 = 3;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted backend (rest, storage and auth live under it)
    pub backend_url: String,
    pub backend_api_key: String,
    pub port: u16,
    /// Emails allowed to administer the directory
    pub admin_emails: Vec<String>,
    pub rollback_policy: RollbackPolicy,
    pub daily_unlock_limit: u32,
    /// Where the client session state file lives
    pub client_state_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            backend_url: env::var("BACKEND_URL").context("BACKEND_URL must be set")?,
            backend_api_key: env::var("BACKEND_API_KEY")
                .context("BACKEND_API_KEY must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_emails: parse_admin_emails(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            rollback_policy: env::var("ROLLBACK_POLICY")
                .unwrap_or_else(|_| "all".to_string())
                .parse()
                .context("ROLLBACK_POLICY must be `all` or `creates_only`")?,
            daily_unlock_limit: env::var("DAILY_UNLOCK_LIMIT")
                .unwrap_or_else(|_| DEFAULT_DAILY_UNLOCK_LIMIT.to_string())
                .parse()
                .context("DAILY_UNLOCK_LIMIT must be a valid number")?,
            client_state_path: env::var("CLIENT_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("client_state.json")),
        })
    }
}

/// Split a comma-separated admin list, dropping blanks
pub fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_emails_are_trimmed_and_lowercased() {
        let emails = parse_admin_emails(" Admin@Example.com, ,ops@example.com ");
        assert_eq!(emails, vec!["admin@example.com", "ops@example.com"]);
    }

    #[test]
    fn empty_admin_list_parses_to_nothing() {
        assert!(parse_admin_emails("").is_empty());
    }
}
