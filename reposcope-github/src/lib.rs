//! GitHub REST API client for reposcope
//!
//! Provides read-only access to public repository metadata without cloning.
//! Individual endpoint failures degrade to empty collections at the fetch
//! boundary so a partial outage never aborts a whole analysis.

use reposcope_core::{ErrorContext, ReposcopeError, ReposcopeResult};

pub mod github;
pub mod models;


pub use github::GithubClient;
pub use models::{
    CommitRecord, Contributor, IssueRecord, RepoSnapshot, Repository, TreeEntry,
};

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Access token for authentication
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            access_token: None,
            timeout_seconds: 10,
            user_agent: "reposcope/0.1".to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration for the public GitHub API
    pub fn github(access_token: Option<String>) -> Self {
        Self {
            access_token,
            ..Default::default()
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set base URL (for GitHub Enterprise deployments)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Helper function to create an HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> ReposcopeResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            ReposcopeError::Api {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| ReposcopeError::Api {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Helper function to handle HTTP response errors
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    operation: &str,
) -> ReposcopeError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();

    ReposcopeError::Api {
        message: format!(
            "HTTP {} error for {}: {}",
            status.as_u16(),
            url,
            if error_body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error")
            } else {
                &error_body
            }
        ),
        source: None,
        context: ErrorContext::new("github_client")
            .with_operation(operation)
            .with_suggestion(match status.as_u16() {
                401 => "Check your access token",
                403 => "Check repository permissions or rate limits",
                404 => "Repository not found or not accessible",
                _ => "Check network connectivity and API status",
            }),
    }
}
