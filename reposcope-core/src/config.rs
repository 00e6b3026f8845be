//! Configuration management

use crate::error::{ErrorContext, ReposcopeError, ReposcopeResult};
use crate::types::ReposcopeConfig;

use std::path::Path;

impl Default for ReposcopeConfig {
    fn default() -> Self {
        Self {
            github: crate::types::GithubSettings {
                api_base: "https://api.github.com".to_string(),
                token: None,
                timeout_seconds: 10,
                user_agent: "reposcope/0.1".to_string(),
            },
            llm: crate::types::LlmSettings {
                provider: "openai".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
                max_tokens: 4096,
            },
            shell: crate::types::ShellSettings {
                default_owner: "mozilla-ai".to_string(),
                default_repo: "lumigator".to_string(),
            },
        }
    }
}

impl ReposcopeConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReposcopeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReposcopeError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ReposcopeConfig =
            toml::from_str(&content).map_err(|e| ReposcopeError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ReposcopeResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ReposcopeError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| ReposcopeError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ReposcopeResult<()> {
        if self.github.api_base.is_empty() {
            return Err(ReposcopeError::Config {
                message: "github.api_base must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set github.api_base to the GitHub REST API URL"),
            });
        }

        if self.github.timeout_seconds == 0 {
            return Err(ReposcopeError::Config {
                message: "github.timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set github.timeout_seconds to a positive value"),
            });
        }

        if self.llm.max_tokens == 0 {
            return Err(ReposcopeError::Config {
                message: "llm.max_tokens must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set llm.max_tokens to a positive value"),
            });
        }

        Ok(())
    }
}
