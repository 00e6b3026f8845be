//! Repository question answering over an append-only transcript
//!
//! The assistant owns the session context built from the latest analysis and
//! a linear conversation history; every question is answered with the full
//! transcript so follow-up turns stay grounded.

use siumai::prelude::*;
use tracing::{debug, info};

use crate::llm_client::{create_auto_client, ModelInfo, ReposcopeLlmClient};
use crate::types::{ChatError, ChatResult, ConversationTurn, LlmConfig};

/// Chat assistant bound to the currently analyzed repository
pub struct RepoAssistant {
    client: ReposcopeLlmClient,
    /// Aggregated repository context; None until an analysis is seeded
    context: Option<String>,
    transcript: Vec<ConversationTurn>,
}

impl RepoAssistant {
    /// Create an assistant with an explicit provider configuration.
    ///
    /// A missing API key for the selected provider is a configuration error
    /// raised here, at construction time.
    pub async fn new(config: LlmConfig) -> ChatResult<Self> {
        let client = ReposcopeLlmClient::new(config).await?;

        Ok(Self {
            client,
            context: None,
            transcript: Vec::new(),
        })
    }

    /// Create an assistant with automatic provider detection
    pub async fn auto() -> ChatResult<Self> {
        let client = create_auto_client().await?;

        Ok(Self {
            client,
            context: None,
            transcript: Vec::new(),
        })
    }

    /// Seed a new session from an analyzed repository.
    ///
    /// Clears any previous transcript; the context string stays fixed for
    /// the lifetime of the session.
    pub fn begin_session(&mut self, context: String) {
        info!("Starting chat session ({} context chars)", context.len());
        self.context = Some(context);
        self.transcript.clear();
    }

    /// Whether an analysis has been seeded
    pub fn has_session(&self) -> bool {
        self.context.is_some()
    }

    /// Ask a question about the current repository.
    ///
    /// The question and the model's reply are appended to the transcript
    /// only after a successful exchange.
    pub async fn ask(&mut self, question: &str) -> ChatResult<String> {
        let context = self.context.as_ref().ok_or_else(|| {
            ChatError::Config("No repository analyzed yet. Run an analysis first.".to_string())
        })?;

        let system_prompt = build_system_prompt(context);

        let mut messages: Vec<ChatMessage> = Vec::with_capacity(self.transcript.len() + 2);
        messages.push(system!(system_prompt.as_str()));
        for turn in &self.transcript {
            if turn.role == "assistant" {
                messages.push(assistant!(turn.content.as_str()));
            } else {
                messages.push(user!(turn.content.as_str()));
            }
        }
        messages.push(user!(question));

        debug!(
            turns = self.transcript.len(),
            "Sending chat request with transcript"
        );
        let answer = self.client.generate(messages).await?;

        self.transcript.push(ConversationTurn::user(question));
        self.transcript
            .push(ConversationTurn::assistant(answer.as_str()));

        Ok(answer)
    }

    /// The session transcript, in order
    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// Information about the underlying model
    pub fn model_info(&self) -> ModelInfo {
        self.client.model_info()
    }

    /// Get chat statistics
    pub fn stats(&self) -> ChatStats {
        let user_messages = self
            .transcript
            .iter()
            .filter(|t| t.role == "user")
            .count();
        let assistant_messages = self
            .transcript
            .iter()
            .filter(|t| t.role == "assistant")
            .count();

        ChatStats {
            total_messages: self.transcript.len(),
            user_messages,
            assistant_messages,
        }
    }
}

/// Statistics about the chat session
#[derive(Debug, Clone)]
pub struct ChatStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
}

impl ChatStats {
    pub fn summary(&self) -> String {
        format!(
            "Chat: {} messages ({} user, {} assistant)",
            self.total_messages, self.user_messages, self.assistant_messages
        )
    }
}

/// Build the system prompt that grounds every answer in the session context
pub(crate) fn build_system_prompt(context: &str) -> String {
    format!(
        "You are an expert analyst of GitHub code repositories.\n\n\
         {}\n\n\
         Your task is to analyze this repository and answer questions clearly, \
         concisely and based on the data above. Provide specific statistics, \
         concrete names and detailed analysis where possible. If you need \
         information that is not available in the context, say so clearly.",
        context
    )
}
