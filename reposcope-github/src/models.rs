//! Domain records produced by the API client
//!
//! GitHub's loosely structured JSON is validated once at the client boundary
//! and flattened into these records; aggregation code never touches raw JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Repository metadata, fetched once per session and read-only thereafter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Owner-qualified name (owner/repo)
    pub full_name: String,
    /// Repository description
    pub description: Option<String>,
    /// Primary language
    pub language: Option<String>,
    /// Star count
    pub stargazers_count: u64,
    /// Fork count
    pub forks_count: u64,
    /// Watcher count
    pub watchers_count: u64,
    /// Open issue count
    pub open_issues_count: u64,
    /// Repository size in KB
    pub size: u64,
    /// Creation timestamp (ISO-8601, as returned by the API)
    pub created_at: String,
    /// Last update timestamp (ISO-8601)
    pub updated_at: String,
    /// Web URL of the repository
    pub html_url: String,
    /// Project homepage, if any
    pub homepage: Option<String>,
    /// Default branch name
    pub default_branch: String,
}

/// A contributor with their total contribution count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    /// Login handle
    pub login: String,
    /// Total contributions credited to this login
    pub contributions: u64,
}

/// One commit from the most recent page of repository history
///
/// Author name and date come from the nested commit.author object; either
/// may be missing, and records without a date are skipped by aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_name: Option<String>,
    /// ISO-8601 author date, unparsed
    pub date: Option<String>,
}

/// One node of the repository file tree snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,
    /// Entry type ("blob" for files, "tree" for directories)
    pub entry_type: String,
    /// Size in bytes; absent for tree entries
    pub size: Option<u64>,
}

impl TreeEntry {
    /// Whether this entry is a file
    pub fn is_file(&self) -> bool {
        self.entry_type == "blob"
    }
}

/// An issue or pull request; only counted, never deeply analyzed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub state: String,
}

/// Everything fetched for one repository in a single pass
#[derive(Debug, Clone)]
pub struct RepoSnapshot {
    pub repository: Repository,
    pub contributors: Vec<Contributor>,
    pub commits: Vec<CommitRecord>,
    pub tree: Vec<TreeEntry>,
    pub issues: Vec<IssueRecord>,
    /// Language name to byte count
    pub languages: HashMap<String, u64>,
}

impl RepoSnapshot {
    /// File-type entries of the tree
    pub fn files(&self) -> impl Iterator<Item = &TreeEntry> {
        self.tree.iter().filter(|e| e.is_file())
    }
}
