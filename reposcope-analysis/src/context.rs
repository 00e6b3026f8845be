//! Session context for the chat assistant
//!
//! Builds the textual summary of a snapshot that seeds the chat system
//! prompt. The same string is reused for every question in a session.

use std::collections::HashMap;
use std::fmt::Write;

use reposcope_github::RepoSnapshot;
use tracing::debug;

use crate::structure::extension;
use crate::{docs, velocity};

/// Build the grounding context string for one analyzed repository
pub fn build_context(snapshot: &RepoSnapshot) -> String {
    let repo = &snapshot.repository;
    let mut out = String::new();

    let _ = writeln!(out, "# Repository analysis: {}", repo.full_name);
    let _ = writeln!(out, "\n## General information");
    let _ = writeln!(out, "- Name: {}", repo.name);
    let _ = writeln!(
        out,
        "- Description: {}",
        repo.description.as_deref().unwrap_or("N/A")
    );
    let _ = writeln!(
        out,
        "- Primary language: {}",
        repo.language.as_deref().unwrap_or("N/A")
    );
    let _ = writeln!(out, "- Stars: {}", repo.stargazers_count);
    let _ = writeln!(out, "- Forks: {}", repo.forks_count);
    let _ = writeln!(out, "- Open issues: {}", repo.open_issues_count);
    let _ = writeln!(
        out,
        "- Issues and pull requests fetched: {}",
        snapshot.issues.len()
    );
    let _ = writeln!(out, "- Size: {} KB", repo.size);
    let _ = writeln!(out, "- Created: {}", repo.created_at);
    let _ = writeln!(out, "- Last updated: {}", repo.updated_at);

    let _ = writeln!(out, "\n## Top contributors (by commit count)");
    for (i, contributor) in snapshot.contributors.iter().take(10).enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} contributions",
            i + 1,
            contributor.login,
            contributor.contributions
        );
    }

    let _ = writeln!(
        out,
        "\n## Recent activity ({} commits analyzed)",
        snapshot.commits.len()
    );
    let cadence = velocity::analyze(&snapshot.commits);
    if let Some(window) = &cadence.window {
        let _ = writeln!(
            out,
            "- First commit of the period: {}",
            window.first.format("%Y-%m-%d")
        );
        let _ = writeln!(out, "- Last commit: {}", window.last.format("%Y-%m-%d"));
        let _ = writeln!(out, "- Active authors: {}", cadence.unique_authors);
    }

    let files: Vec<_> = snapshot.files().collect();
    let _ = writeln!(out, "\n## Code structure ({} files)", files.len());

    let mut by_extension: HashMap<&str, u64> = HashMap::new();
    for entry in &files {
        *by_extension.entry(extension(&entry.path)).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, u64)> = by_extension.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let _ = writeln!(out, "\nFile distribution by type:");
    for (ext, count) in ranked.iter().take(10) {
        let _ = writeln!(out, "- .{}: {} files", ext, count);
    }

    let coverage = docs::analyze(&snapshot.tree);
    if coverage.total_files() > 0 {
        let _ = writeln!(
            out,
            "\n## Documentation found ({} files)",
            coverage.total_files()
        );
        let doc_paths = coverage
            .readmes
            .iter()
            .chain(&coverage.contribution_guides)
            .chain(&coverage.licenses)
            .chain(&coverage.changelogs)
            .chain(&coverage.technical)
            .chain(&coverage.other);
        for file in doc_paths.take(10) {
            let _ = writeln!(out, "- {}", file.path);
        }
    }

    debug!(
        repo = %repo.full_name,
        chars = out.len(),
        "Built session context"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposcope_github::{CommitRecord, Contributor, Repository, TreeEntry};

    fn snapshot() -> RepoSnapshot {
        RepoSnapshot {
            repository: Repository {
                name: "demo".to_string(),
                full_name: "octo/demo".to_string(),
                description: Some("Sample project".to_string()),
                language: Some("Rust".to_string()),
                stargazers_count: 10,
                forks_count: 2,
                watchers_count: 10,
                open_issues_count: 1,
                size: 512,
                created_at: "2024-01-01T00:00:00Z".to_string(),
                updated_at: "2025-01-01T00:00:00Z".to_string(),
                html_url: "https://github.com/octo/demo".to_string(),
                homepage: None,
                default_branch: "main".to_string(),
            },
            contributors: vec![Contributor {
                login: "ada".to_string(),
                contributions: 42,
            }],
            commits: vec![
                CommitRecord {
                    author_name: Some("ada".to_string()),
                    date: Some("2025-01-01T00:00:00Z".to_string()),
                },
                CommitRecord {
                    author_name: Some("ada".to_string()),
                    date: Some("2025-01-05T00:00:00Z".to_string()),
                },
            ],
            tree: vec![
                TreeEntry {
                    path: "src/main.rs".to_string(),
                    entry_type: "blob".to_string(),
                    size: Some(1000),
                },
                TreeEntry {
                    path: "README.md".to_string(),
                    entry_type: "blob".to_string(),
                    size: Some(100),
                },
            ],
            issues: Vec::new(),
            languages: HashMap::new(),
        }
    }

    #[test]
    fn context_covers_all_sections() {
        let context = build_context(&snapshot());

        assert!(context.contains("# Repository analysis: octo/demo"));
        assert!(context.contains("ada - 42 contributions"));
        assert!(context.contains("2 commits analyzed"));
        assert!(context.contains("- .rs: 1 files"));
        assert!(context.contains("Documentation found"));
        assert!(context.contains("README.md"));
    }

    #[test]
    fn context_survives_empty_collections() {
        let mut snapshot = snapshot();
        snapshot.contributors.clear();
        snapshot.commits.clear();
        snapshot.tree.clear();

        let context = build_context(&snapshot);

        assert!(context.contains("0 commits analyzed"));
        assert!(context.contains("0 files"));
        assert!(!context.contains("Documentation found"));
    }
}
