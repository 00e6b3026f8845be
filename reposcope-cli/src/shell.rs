//! Interactive analysis shell
//!
//! A prompt/menu loop over one fetched repository at a time. Reports are
//! computed from the in-memory snapshot; only the chat option performs
//! further network calls.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;
use url::Url;

use reposcope_analysis::{contributors, docs, structure, summary, velocity};
use reposcope_chat::{LlmConfig, RepoAssistant};
use reposcope_core::{
    log_operation_error, log_operation_start, log_operation_success, ReposcopeConfig,
    ReposcopeResult,
};
use reposcope_github::{GithubClient, RepoSnapshot};

const RULE: &str = "============================================================";

/// One analyzed repository and its derived chat context
struct Session {
    snapshot: RepoSnapshot,
    context: String,
}

enum MenuOutcome {
    SwitchRepository,
    Exit,
}

/// Interactive shell owning the session state
pub struct Shell {
    config: ReposcopeConfig,
    client: GithubClient,
    /// Created lazily on the first chat request
    assistant: Option<RepoAssistant>,
    input: Lines<BufReader<Stdin>>,
}

impl Shell {
    pub fn new(config: ReposcopeConfig, client: GithubClient) -> Self {
        Self {
            config,
            client,
            assistant: None,
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Run the shell until exit or end of input
    pub async fn run(&mut self) -> ReposcopeResult<()> {
        println!("{}", RULE);
        println!("🤖 GITHUB REPOSITORY ANALYZER");
        println!("{}", RULE);

        loop {
            let Some(session) = self.prompt_repository().await? else {
                println!("\n👋 Goodbye!");
                return Ok(());
            };

            match self.menu_loop(&session).await? {
                MenuOutcome::SwitchRepository => continue,
                MenuOutcome::Exit => {
                    println!("\n👋 Goodbye!");
                    return Ok(());
                }
            }
        }
    }

    /// Collect owner/repo and fetch a snapshot; None on end of input
    async fn prompt_repository(&mut self) -> ReposcopeResult<Option<Session>> {
        loop {
            println!("\n📁 Enter the repository to analyze:");

            let owner_prompt = format!("Owner (e.g. {}): ", self.config.shell.default_owner);
            let Some(owner_input) = self.read_line(&owner_prompt).await? else {
                return Ok(None);
            };

            let (owner, mut repo) = match parse_repo_input(&owner_input) {
                Some(parsed) => parsed,
                None => (self.config.shell.default_owner.clone(), None),
            };

            if repo.is_none() {
                let repo_prompt = format!("Repo (e.g. {}): ", self.config.shell.default_repo);
                let Some(repo_input) = self.read_line(&repo_prompt).await? else {
                    return Ok(None);
                };
                repo = if repo_input.is_empty() {
                    Some(self.config.shell.default_repo.clone())
                } else {
                    Some(repo_input)
                };
            }
            let repo = repo.unwrap_or_else(|| self.config.shell.default_repo.clone());

            println!("\n{}", RULE);
            println!("Analyzing: {}/{}", owner, repo);
            println!("{}\n", RULE);

            log_operation_start!("fetch_snapshot", owner = %owner, repo = %repo);
            match self.client.fetch_snapshot(&owner, &repo).await {
                Ok(snapshot) => {
                    log_operation_success!("fetch_snapshot", files = snapshot.tree.len());
                    let context = reposcope_analysis::build_context(&snapshot);
                    if let Some(assistant) = self.assistant.as_mut() {
                        // New analysis: reseed the context and drop the transcript
                        assistant.begin_session(context.clone());
                    }
                    return Ok(Some(Session { snapshot, context }));
                }
                Err(e) => {
                    log_operation_error!("fetch_snapshot", e, owner = %owner, repo = %repo);
                    println!("❌ Could not retrieve repository data: {}", e);
                    println!("   Check the owner and repository names and try again.");
                }
            }
        }
    }

    /// Present the menu until the user switches repository or exits
    async fn menu_loop(&mut self, session: &Session) -> ReposcopeResult<MenuOutcome> {
        loop {
            println!("\n{}", RULE);
            println!("📋 ANALYSIS OPTIONS:");
            println!("{}", RULE);
            println!("1. 🏆 Who contributes the most?");
            println!("2. ⚡ Development velocity");
            println!("3. 🧩 Most complex area of the code");
            println!("4. 📚 Documentation review");
            println!("5. 📋 Executive summary");
            println!("6. 💬 Ask a question about the repository");
            println!("7. 🔄 Switch repository");
            println!("0. 👋 Exit");

            let Some(choice) = self.read_line("\nChoose an option: ").await? else {
                return Ok(MenuOutcome::Exit);
            };

            match choice.as_str() {
                "0" | "q" => return Ok(MenuOutcome::Exit),
                "1" => {
                    let report = contributors::analyze(&session.snapshot.contributors);
                    println!("{}", report.render());
                }
                "2" => {
                    let report = velocity::analyze(&session.snapshot.commits);
                    println!("{}", report.render(&session.snapshot.repository));
                }
                "3" => {
                    let report = structure::analyze(&session.snapshot.tree);
                    println!("{}", report.render());
                }
                "4" => {
                    let report = docs::analyze(&session.snapshot.tree);
                    println!("{}", report.render(&session.snapshot.repository));
                }
                "5" => {
                    let report = summary::analyze(&session.snapshot);
                    println!("{}", report.render());
                }
                "6" => {
                    if self.ask_question(session).await?.is_none() {
                        return Ok(MenuOutcome::Exit);
                    }
                }
                "7" => return Ok(MenuOutcome::SwitchRepository),
                _ => {
                    println!("❌ Invalid option");
                    continue;
                }
            }

            if self.read_line("\n⏎ Press Enter to continue...").await?.is_none() {
                return Ok(MenuOutcome::Exit);
            }
        }
    }

    /// One free-form question through the chat assistant.
    /// Returns None on end of input.
    async fn ask_question(&mut self, session: &Session) -> ReposcopeResult<Option<()>> {
        if self.assistant.is_none() {
            println!("🔌 Connecting to an LLM provider...");
            let settings = &self.config.llm;
            let llm_config = LlmConfig {
                provider: settings.provider.clone(),
                model: settings.model.clone(),
                api_key: None,
                base_url: None,
                temperature: settings.temperature,
                max_tokens: Some(settings.max_tokens),
            };

            // Configured provider first, then auto-detection over the
            // provider API keys present in the environment
            let created = match RepoAssistant::new(llm_config).await {
                Ok(assistant) => Ok(assistant),
                Err(e) => {
                    warn!("Configured LLM provider unavailable: {}", e);
                    RepoAssistant::auto().await
                }
            };

            match created {
                Ok(assistant) => {
                    println!("🤖 Chat model: {}", assistant.model_info().summary());
                    self.assistant = Some(assistant);
                }
                Err(e) => {
                    warn!("Chat assistant unavailable: {}", e);
                    println!("❌ Chat is not available: {}", e);
                    println!(
                        "   Set OPENAI_API_KEY, ANTHROPIC_API_KEY or GROQ_API_KEY, \
                         or run a local Ollama instance."
                    );
                    return Ok(Some(()));
                }
            }
        }

        if let Some(assistant) = self.assistant.as_mut() {
            if !assistant.has_session() {
                // First question since the assistant was created
                assistant.begin_session(session.context.clone());
            }
        }

        let Some(question) = self.read_line("\n💬 Your question: ").await? else {
            return Ok(None);
        };
        if question.is_empty() {
            return Ok(Some(()));
        }

        let Some(assistant) = self.assistant.as_mut() else {
            return Ok(Some(()));
        };

        println!("\n⏳ Analyzing...\n");
        match assistant.ask(&question).await {
            Ok(answer) => {
                println!("{}", RULE);
                println!("📊 ANSWER:");
                println!("{}", RULE);
                println!("{}", answer);
                println!("{}", RULE);
            }
            Err(e) => {
                println!("❌ Error: {}", e);
            }
        }

        Ok(Some(()))
    }

    /// Prompt and read one trimmed line; None on end of input
    async fn read_line(&mut self, prompt: &str) -> ReposcopeResult<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;

        let line = self.input.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

/// Parse the owner prompt input: a plain owner, an owner/repo pair, or a
/// full repository URL. Empty input means "use the defaults".
fn parse_repo_input(input: &str) -> Option<(String, Option<String>)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let parsed = Url::parse(trimmed).ok()?;
        let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?.to_string();
        let repo = segments
            .next()
            .map(|s| s.trim_end_matches(".git").to_string());
        return Some((owner, repo));
    }

    match trimmed.split_once('/') {
        Some((owner, repo)) if !repo.is_empty() => {
            Some((owner.to_string(), Some(repo.trim_end_matches(".git").to_string())))
        }
        Some((owner, _)) => Some((owner.to_string(), None)),
        None => Some((trimmed.to_string(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_owner() {
        assert_eq!(
            parse_repo_input("mozilla-ai"),
            Some(("mozilla-ai".to_string(), None))
        );
    }

    #[test]
    fn owner_and_repo() {
        assert_eq!(
            parse_repo_input("mozilla-ai/lumigator"),
            Some(("mozilla-ai".to_string(), Some("lumigator".to_string())))
        );
    }

    #[test]
    fn full_url() {
        assert_eq!(
            parse_repo_input("https://github.com/mozilla-ai/lumigator"),
            Some(("mozilla-ai".to_string(), Some("lumigator".to_string())))
        );
        assert_eq!(
            parse_repo_input("https://github.com/mozilla-ai/lumigator.git"),
            Some(("mozilla-ai".to_string(), Some("lumigator".to_string())))
        );
    }

    #[test]
    fn url_with_owner_only() {
        assert_eq!(
            parse_repo_input("https://github.com/mozilla-ai"),
            Some(("mozilla-ai".to_string(), None))
        );
    }

    #[test]
    fn blank_input_means_defaults() {
        assert_eq!(parse_repo_input(""), None);
        assert_eq!(parse_repo_input("   "), None);
    }
}
