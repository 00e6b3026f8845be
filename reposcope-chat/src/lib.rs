//! Chat assistant for analyzed repositories
//!
//! Forwards the aggregated repository context plus an append-only
//! conversation transcript to a hosted LLM provider, so a user can ask
//! free-form questions about the repository under analysis.

pub mod assistant;
pub mod llm_client;
pub mod types;

pub use assistant::{ChatStats, RepoAssistant};
pub use llm_client::{configs, create_auto_client, ModelInfo, ReposcopeLlmClient};
pub use types::{ChatError, ChatResult, ConversationTurn, LlmConfig};
