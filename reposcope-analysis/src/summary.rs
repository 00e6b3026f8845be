//! Executive summary
//!
//! Pure formatting over already-fetched fields; the only computation is the
//! percentage-of-total share per language.

use std::collections::HashMap;
use std::fmt::Write;

use reposcope_github::RepoSnapshot;

use crate::RULE;

/// One language's share of the repository by byte count
#[derive(Debug, Clone)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    pub percentage: f64,
}

/// Repository-level summary fields
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    /// Repository size in MB (the API reports KB)
    pub size_mb: f64,
    pub contributor_count: usize,
    /// Top-3 contributor logins
    pub top_contributors: Vec<String>,
    /// All languages, ranked by byte count descending
    pub languages: Vec<LanguageShare>,
    pub created_at: String,
    pub updated_at: String,
    pub html_url: String,
    pub homepage: Option<String>,
    pub recent_commits: usize,
}

/// Byte share per language, ranked descending (ties alphabetical).
/// An empty mapping yields an empty ranking; zero totals yield 0%.
pub fn language_breakdown(languages: &HashMap<String, u64>) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();

    let mut shares: Vec<LanguageShare> = languages
        .iter()
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percentage: if total > 0 {
                bytes as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    shares
}

/// Collect the summary fields from a snapshot
pub fn analyze(snapshot: &RepoSnapshot) -> SummaryReport {
    let repo = &snapshot.repository;

    SummaryReport {
        full_name: repo.full_name.clone(),
        description: repo.description.clone(),
        stargazers: repo.stargazers_count,
        forks: repo.forks_count,
        watchers: repo.watchers_count,
        open_issues: repo.open_issues_count,
        size_mb: repo.size as f64 / 1024.0,
        contributor_count: snapshot.contributors.len(),
        top_contributors: snapshot
            .contributors
            .iter()
            .take(3)
            .map(|c| c.login.clone())
            .collect(),
        languages: language_breakdown(&snapshot.languages),
        created_at: date_only(&repo.created_at).to_string(),
        updated_at: date_only(&repo.updated_at).to_string(),
        html_url: repo.html_url.clone(),
        homepage: repo.homepage.clone(),
        recent_commits: snapshot.commits.len(),
    }
}

impl SummaryReport {
    /// Format the report as console text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "📋 EXECUTIVE SUMMARY");
        let _ = writeln!(out, "{}", RULE);

        let _ = writeln!(out, "\n🏷️  Name: {}", self.full_name);
        if let Some(description) = &self.description {
            let _ = writeln!(out, "📝 Description: {}", description);
        }

        let _ = writeln!(out, "\n📊 Key metrics:");
        let _ = writeln!(out, "   • ⭐ Stars: {}", group_thousands(self.stargazers));
        let _ = writeln!(out, "   • 🔱 Forks: {}", group_thousands(self.forks));
        let _ = writeln!(out, "   • 👀 Watchers: {}", group_thousands(self.watchers));
        let _ = writeln!(
            out,
            "   • 🐛 Open issues: {}",
            group_thousands(self.open_issues)
        );
        let _ = writeln!(out, "   • 📦 Size: {:.1} MB", self.size_mb);

        let _ = writeln!(out, "\n👥 Community:");
        let _ = writeln!(out, "   • Contributors: {}", self.contributor_count);
        if !self.top_contributors.is_empty() {
            let _ = writeln!(out, "   • Top 3: {}", self.top_contributors.join(", "));
        }

        let _ = writeln!(out, "\n💻 Technologies:");
        for share in self.languages.iter().take(5) {
            let _ = writeln!(out, "   • {}: {:.1}%", share.name, share.percentage);
        }

        let _ = writeln!(out, "\n📅 Activity:");
        let _ = writeln!(out, "   • Created: {}", self.created_at);
        let _ = writeln!(out, "   • Last updated: {}", self.updated_at);
        if self.recent_commits > 0 {
            let _ = writeln!(out, "   • Recent commits analyzed: {}", self.recent_commits);
        }

        let _ = writeln!(out, "\n🔗 Links:");
        let _ = writeln!(out, "   • Repo: {}", self.html_url);
        if let Some(homepage) = &self.homepage {
            let _ = writeln!(out, "   • Web: {}", homepage);
        }

        let _ = writeln!(out, "{}", RULE);
        out
    }
}

/// Date portion of an ISO-8601 timestamp
pub(crate) fn date_only(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

/// Group digits in threes: 1234567 -> "1,234,567"
pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposcope_github::{Contributor, Repository};

    fn snapshot() -> RepoSnapshot {
        let mut languages = HashMap::new();
        languages.insert("Rust".to_string(), 7_500);
        languages.insert("Python".to_string(), 2_000);
        languages.insert("Shell".to_string(), 500);

        RepoSnapshot {
            repository: Repository {
                name: "demo".to_string(),
                full_name: "octo/demo".to_string(),
                description: Some("A demo".to_string()),
                language: Some("Rust".to_string()),
                stargazers_count: 12_345,
                forks_count: 678,
                watchers_count: 12_345,
                open_issues_count: 9,
                size: 2_048,
                created_at: "2024-01-15T10:00:00Z".to_string(),
                updated_at: "2025-06-01T08:30:00Z".to_string(),
                html_url: "https://github.com/octo/demo".to_string(),
                homepage: Some("https://demo.example".to_string()),
                default_branch: "main".to_string(),
            },
            contributors: vec![
                Contributor {
                    login: "ada".to_string(),
                    contributions: 100,
                },
                Contributor {
                    login: "bob".to_string(),
                    contributions: 50,
                },
            ],
            commits: Vec::new(),
            tree: Vec::new(),
            issues: Vec::new(),
            languages,
        }
    }

    #[test]
    fn language_shares_sum_and_rank() {
        let report = analyze(&snapshot());

        assert_eq!(report.languages[0].name, "Rust");
        assert!((report.languages[0].percentage - 75.0).abs() < f64::EPSILON);
        let total: f64 = report.languages.iter().map(|l| l.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_languages_do_not_divide_by_zero() {
        let shares = language_breakdown(&HashMap::new());
        assert!(shares.is_empty());

        let mut zeroed = HashMap::new();
        zeroed.insert("Rust".to_string(), 0);
        let shares = language_breakdown(&zeroed);
        assert_eq!(shares[0].percentage, 0.0);
    }

    #[test]
    fn dates_truncate_to_day() {
        let report = analyze(&snapshot());
        assert_eq!(report.created_at, "2024-01-15");
        assert_eq!(report.updated_at, "2025-06-01");
        // Short or malformed timestamps pass through untouched
        assert_eq!(date_only("2024"), "2024");
    }

    #[test]
    fn size_converts_kb_to_mb() {
        let report = analyze(&snapshot());
        assert!((report.size_mb - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn render_contains_key_fields() {
        let rendered = analyze(&snapshot()).render();

        assert!(rendered.contains("octo/demo"));
        assert!(rendered.contains("Stars: 12,345"));
        assert!(rendered.contains("Top 3: ada, bob"));
        assert!(rendered.contains("Rust: 75.0%"));
        assert!(rendered.contains("https://demo.example"));
    }
}
