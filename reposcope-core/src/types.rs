//! Core configuration data structures
//!
//! The shapes here are serialized to and from the TOML configuration file;
//! defaults and validation live in `config.rs`

use serde::{Deserialize, Serialize};

/// Top-level reposcope configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReposcopeConfig {
    /// GitHub API access settings
    pub github: GithubSettings,
    /// LLM provider settings for the chat assistant
    pub llm: LlmSettings,
    /// Interactive shell settings
    pub shell: ShellSettings,
}

/// GitHub API access settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubSettings {
    /// Base URL of the GitHub REST API
    pub api_base: String,
    /// Bearer token; falls back to the GITHUB_TOKEN environment variable
    pub token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

/// LLM provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider type (openai, anthropic, ollama, groq)
    pub provider: String,
    /// Model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Interactive shell settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellSettings {
    /// Owner used when the owner prompt is left blank
    pub default_owner: String,
    /// Repository used when the repo prompt is left blank
    pub default_repo: String,
}
