//! GitHub API client implementation

use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;

use reposcope_core::{ErrorContext, ReposcopeError, ReposcopeResult};

use crate::models::{
    CommitRecord, Contributor, IssueRecord, RepoSnapshot, Repository, TreeEntry,
};
use crate::{create_http_client, handle_response_error, ApiClientConfig};

/// Maximum items requested per endpoint; one page, no deeper pagination.
const PER_PAGE: u32 = 100;

/// GitHub API client
pub struct GithubClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

/// GitHub repository response
#[derive(Debug, Deserialize)]
pub(crate) struct GithubRepository {
    name: String,
    #[serde(default)]
    full_name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    watchers_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    updated_at: String,
    #[serde(default)]
    html_url: String,
    homepage: Option<String>,
    #[serde(default = "default_branch")]
    default_branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl GithubRepository {
    pub(crate) fn into_repository(self) -> Repository {
        Repository {
            name: self.name,
            full_name: self.full_name,
            description: self.description,
            language: self.language,
            stargazers_count: self.stargazers_count,
            forks_count: self.forks_count,
            watchers_count: self.watchers_count,
            open_issues_count: self.open_issues_count,
            size: self.size,
            created_at: self.created_at,
            updated_at: self.updated_at,
            html_url: self.html_url,
            homepage: self.homepage,
            default_branch: self.default_branch,
        }
    }
}

/// GitHub contributor response
#[derive(Debug, Deserialize)]
pub(crate) struct GithubContributor {
    #[serde(default)]
    login: String,
    #[serde(default)]
    contributions: u64,
}

/// GitHub commit response (listing endpoint)
#[derive(Debug, Deserialize)]
pub(crate) struct GithubCommit {
    commit: Option<GithubCommitDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GithubCommitDetail {
    author: Option<GithubCommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GithubCommitAuthor {
    name: Option<String>,
    date: Option<String>,
}

impl GithubCommit {
    pub(crate) fn into_record(self) -> CommitRecord {
        let author = self.commit.and_then(|c| c.author);
        match author {
            Some(author) => CommitRecord {
                author_name: author.name,
                date: author.date,
            },
            None => CommitRecord {
                author_name: None,
                date: None,
            },
        }
    }
}

/// GitHub tree response
#[derive(Debug, Deserialize)]
pub(crate) struct GithubTreeResponse {
    #[serde(default)]
    tree: Vec<GithubTreeItem>,
    truncated: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GithubTreeItem {
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    size: Option<u64>,
}

impl GithubTreeResponse {
    pub(crate) fn into_entries(self) -> Vec<TreeEntry> {
        self.tree
            .into_iter()
            .map(|item| TreeEntry {
                path: item.path,
                entry_type: item.item_type,
                size: item.size,
            })
            .collect()
    }
}

/// GitHub issue response
#[derive(Debug, Deserialize)]
pub(crate) struct GithubIssue {
    #[serde(default)]
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    state: String,
}

impl GithubClient {
    /// Create a new GitHub API client
    pub fn new(config: ApiClientConfig) -> ReposcopeResult<Self> {
        let client = create_http_client(&config)?;

        info!("Created GitHub API client for {}", config.base_url);

        Ok(Self { client, config })
    }

    /// Create authorization headers
    fn create_auth_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(ref token) = self.config.access_token {
            if let Ok(auth_value) =
                reqwest::header::HeaderValue::from_str(&format!("token {}", token))
            {
                headers.insert(reqwest::header::AUTHORIZATION, auth_value);
            }
        }

        // GitHub API version
        if let Ok(accept_value) =
            reqwest::header::HeaderValue::from_str("application/vnd.github.v3+json")
        {
            headers.insert(reqwest::header::ACCEPT, accept_value);
        }

        headers
    }

    /// Make a GET request to the GitHub API
    async fn get_request(&self, endpoint: &str) -> ReposcopeResult<reqwest::Response> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        debug!("Making GitHub API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.create_auth_headers())
            .send()
            .await
            .map_err(|e| ReposcopeError::Network {
                message: format!("Failed to reach GitHub API: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_client").with_operation("get_request"),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, "github_api_request").await);
        }

        Ok(response)
    }

    /// Fetch repository metadata
    pub async fn get_repository(&self, owner: &str, repo: &str) -> ReposcopeResult<Repository> {
        info!("Fetching repository metadata for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}", owner, repo);
        let response = self.get_request(&endpoint).await?;

        let raw: GithubRepository =
            response.json().await.map_err(|e| ReposcopeError::Api {
                message: format!("Failed to parse repository metadata: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_client").with_operation("get_repository"),
            })?;

        Ok(raw.into_repository())
    }

    /// Fetch contributors, ordered by descending contributions (first page only)
    pub async fn get_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> ReposcopeResult<Vec<Contributor>> {
        let endpoint = format!("repos/{}/{}/contributors?per_page={}", owner, repo, PER_PAGE);
        let response = self.get_request(&endpoint).await?;

        let raw: Vec<GithubContributor> =
            response.json().await.map_err(|e| ReposcopeError::Api {
                message: format!("Failed to parse contributors: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_client").with_operation("get_contributors"),
            })?;

        Ok(raw
            .into_iter()
            .map(|c| Contributor {
                login: c.login,
                contributions: c.contributions,
            })
            .collect())
    }

    /// Fetch the most recent commits (first page only)
    pub async fn get_commits(&self, owner: &str, repo: &str) -> ReposcopeResult<Vec<CommitRecord>> {
        let endpoint = format!("repos/{}/{}/commits?per_page={}", owner, repo, PER_PAGE);
        let response = self.get_request(&endpoint).await?;

        let raw: Vec<GithubCommit> =
            response.json().await.map_err(|e| ReposcopeError::Api {
                message: format!("Failed to parse commits: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_client").with_operation("get_commits"),
            })?;

        Ok(raw.into_iter().map(|c| c.into_record()).collect())
    }

    /// Fetch the recursive file tree of a branch
    pub async fn get_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> ReposcopeResult<Vec<TreeEntry>> {
        info!(
            "Fetching file tree for {}/{} (branch: {})",
            owner, repo, branch
        );

        let endpoint = format!("repos/{}/{}/git/trees/{}?recursive=1", owner, repo, branch);
        let response = self.get_request(&endpoint).await?;

        let tree_response: GithubTreeResponse =
            response.json().await.map_err(|e| ReposcopeError::Api {
                message: format!("Failed to parse file tree: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_client").with_operation("get_tree"),
            })?;

        if tree_response.truncated.unwrap_or(false) {
            warn!("GitHub file tree was truncated for {}/{}", owner, repo);
        }

        Ok(tree_response.into_entries())
    }

    /// Fetch issues and pull requests in any state (first page only)
    pub async fn get_issues(&self, owner: &str, repo: &str) -> ReposcopeResult<Vec<IssueRecord>> {
        let endpoint = format!(
            "repos/{}/{}/issues?state=all&per_page={}",
            owner, repo, PER_PAGE
        );
        let response = self.get_request(&endpoint).await?;

        let raw: Vec<GithubIssue> =
            response.json().await.map_err(|e| ReposcopeError::Api {
                message: format!("Failed to parse issues: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_client").with_operation("get_issues"),
            })?;

        Ok(raw
            .into_iter()
            .map(|i| IssueRecord {
                number: i.number,
                title: i.title,
                state: i.state,
            })
            .collect())
    }

    /// Fetch the language byte-count breakdown
    pub async fn get_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> ReposcopeResult<HashMap<String, u64>> {
        let endpoint = format!("repos/{}/{}/languages", owner, repo);
        let response = self.get_request(&endpoint).await?;

        response.json().await.map_err(|e| ReposcopeError::Api {
            message: format!("Failed to parse languages: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_client").with_operation("get_languages"),
        })
    }

    /// Fetch everything needed for one analysis session.
    ///
    /// The repository-info request is load-bearing: if it fails, the whole
    /// fetch fails. Every other endpoint degrades to an empty collection on
    /// failure, with a warning, so partial data still yields reports.
    pub async fn fetch_snapshot(&self, owner: &str, repo: &str) -> ReposcopeResult<RepoSnapshot> {
        println!("📥 Downloading data for {}/{}...", owner, repo);

        println!("  ⏳ Repository info...");
        let repository = self.get_repository(owner, repo).await?;

        println!("  ⏳ Contributors...");
        let contributors = self
            .get_contributors(owner, repo)
            .await
            .unwrap_or_else(|e| {
                warn!("Could not fetch contributors: {}", e);
                Vec::new()
            });

        println!("  ⏳ Recent commits...");
        let commits = self.get_commits(owner, repo).await.unwrap_or_else(|e| {
            warn!("Could not fetch commits: {}", e);
            Vec::new()
        });

        println!("  ⏳ File structure...");
        let tree = self
            .get_tree(owner, repo, &repository.default_branch)
            .await
            .unwrap_or_else(|e| {
                warn!("Could not fetch file tree: {}", e);
                Vec::new()
            });

        println!("  ⏳ Issues and pull requests...");
        let issues = self.get_issues(owner, repo).await.unwrap_or_else(|e| {
            warn!("Could not fetch issues: {}", e);
            Vec::new()
        });

        println!("  ⏳ Languages...");
        let languages = self.get_languages(owner, repo).await.unwrap_or_else(|e| {
            warn!("Could not fetch languages: {}", e);
            HashMap::new()
        });

        println!("✅ Data downloaded\n");

        Ok(RepoSnapshot {
            repository,
            contributors,
            commits,
            tree,
            issues,
            languages,
        })
    }
}
