//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory uploaded files are written under; one subdirectory per post.
    pub upload_dir: String,
    /// URL prefix uploaded files are served back as.
    pub public_base: String,
    /// Identities permitted to perform mutating operations.
    pub authorized_emails: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            public_base: env::var("PUBLIC_BASE").unwrap_or_else(|_| "/uploads".to_string()),
            authorized_emails: Self::parse_authorized_emails(),
        }
    }

    /// Parse the allow-list from AUTHORIZED_EMAILS, a comma-separated list.
    /// Example: AUTHORIZED_EMAILS=alice@example.edu,bob@example.edu
    fn parse_authorized_emails() -> Vec<String> {
        let raw = env::var("AUTHORIZED_EMAILS").unwrap_or_default();
        let emails: Vec<String> = raw
            .split(',')
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        if emails.is_empty() {
            tracing::warn!(
                "AUTHORIZED_EMAILS not set - every authenticated request will be rejected"
            );
        }

        emails
    }
}
