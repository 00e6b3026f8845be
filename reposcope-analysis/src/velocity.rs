//! Development velocity
//!
//! Derives commit cadence from the most recent page of commits. Rates are
//! computed over the observed window only; a window of zero whole days makes
//! them undefined rather than infinite.

use std::collections::HashSet;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use reposcope_github::{CommitRecord, Repository};

use crate::RULE;

/// Time span covered by the parseable commits
#[derive(Debug, Clone)]
pub struct CommitWindow {
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    /// Whole days between first and last commit
    pub elapsed_days: i64,
    /// None when elapsed_days is zero
    pub commits_per_day: Option<f64>,
    /// None when elapsed_days is zero
    pub commits_per_week: Option<f64>,
}

/// Commit cadence over the fetched history page
#[derive(Debug, Clone)]
pub struct VelocityReport {
    /// Total commits fetched, including ones whose date did not parse
    pub total_commits: usize,
    /// Distinct author names among commits with a parseable date
    pub unique_authors: usize,
    /// None when no commit date parsed
    pub window: Option<CommitWindow>,
}

/// Compute commit cadence. Commits without a parseable RFC 3339 date are
/// skipped individually; rates use the total fetched commit count.
pub fn analyze(commits: &[CommitRecord]) -> VelocityReport {
    let mut dates: Vec<DateTime<Utc>> = Vec::new();
    let mut authors: HashSet<String> = HashSet::new();

    for commit in commits {
        let Some(raw_date) = &commit.date else {
            continue;
        };
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw_date) {
            dates.push(parsed.with_timezone(&Utc));
            authors.insert(
                commit
                    .author_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
            );
        }
    }

    dates.sort();

    let window = match (dates.first(), dates.last()) {
        (Some(&first), Some(&last)) => {
            let elapsed_days = (last - first).num_days();
            let (commits_per_day, commits_per_week) = if elapsed_days > 0 {
                let per_day = commits.len() as f64 / elapsed_days as f64;
                (Some(per_day), Some(per_day * 7.0))
            } else {
                (None, None)
            };
            Some(CommitWindow {
                first,
                last,
                elapsed_days,
                commits_per_day,
                commits_per_week,
            })
        }
        _ => None,
    };

    VelocityReport {
        total_commits: commits.len(),
        unique_authors: authors.len(),
        window,
    }
}

impl VelocityReport {
    /// Format the report as console text, with a repository-state footer
    pub fn render(&self, repo: &Repository) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "⚡ DEVELOPMENT VELOCITY");
        let _ = writeln!(out, "{}", RULE);

        if self.total_commits == 0 {
            let _ = writeln!(out, "\n❌ No commits found");
            let _ = writeln!(out, "{}", RULE);
            return out;
        }

        let Some(window) = &self.window else {
            let _ = writeln!(out, "\n❌ Could not process commit dates");
            let _ = writeln!(out, "{}", RULE);
            return out;
        };

        let _ = writeln!(out, "\n📅 Period analyzed:");
        let _ = writeln!(
            out,
            "   • First commit: {}",
            window.first.format("%Y-%m-%d %H:%M")
        );
        let _ = writeln!(
            out,
            "   • Last commit: {}",
            window.last.format("%Y-%m-%d %H:%M")
        );
        let _ = writeln!(out, "   • Days elapsed: {}", window.elapsed_days);

        let _ = writeln!(out, "\n📈 Metrics:");
        let _ = writeln!(out, "   • Commits analyzed: {}", self.total_commits);
        match window.commits_per_day {
            Some(per_day) => {
                let _ = writeln!(out, "   • Commits per day: {:.2}", per_day);
            }
            None => {
                let _ = writeln!(out, "   • Commits per day: N/A");
            }
        }
        match window.commits_per_week {
            Some(per_week) => {
                let _ = writeln!(out, "   • Commits per week: {:.1}", per_week);
            }
            None => {
                let _ = writeln!(out, "   • Commits per week: N/A");
            }
        }
        let _ = writeln!(out, "   • Active authors: {}", self.unique_authors);

        let _ = writeln!(out, "\n📊 Repository state:");
        let _ = writeln!(out, "   • Stars: {}", repo.stargazers_count);
        let _ = writeln!(out, "   • Forks: {}", repo.forks_count);
        let _ = writeln!(out, "   • Watchers: {}", repo.watchers_count);
        let _ = writeln!(out, "   • Open issues: {}", repo.open_issues_count);

        let _ = writeln!(out, "{}", RULE);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(author: &str, date: &str) -> CommitRecord {
        CommitRecord {
            author_name: Some(author.to_string()),
            date: Some(date.to_string()),
        }
    }

    fn sample_repo() -> Repository {
        Repository {
            name: "demo".to_string(),
            full_name: "octo/demo".to_string(),
            description: None,
            language: None,
            stargazers_count: 5,
            forks_count: 1,
            watchers_count: 5,
            open_issues_count: 2,
            size: 100,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-06-01T00:00:00Z".to_string(),
            html_url: "https://github.com/octo/demo".to_string(),
            homepage: None,
            default_branch: "main".to_string(),
        }
    }

    #[test]
    fn rates_over_observed_window() {
        let commits = vec![
            commit("ada", "2025-01-01T00:00:00Z"),
            commit("bob", "2025-01-03T00:00:00Z"),
            commit("ada", "2025-01-11T00:00:00Z"),
        ];

        let report = analyze(&commits);
        let window = report.window.expect("window");

        assert_eq!(window.elapsed_days, 10);
        let per_day = window.commits_per_day.expect("per day");
        assert!((per_day - 0.3).abs() < 1e-9);
        let per_week = window.commits_per_week.expect("per week");
        assert!((per_week - 2.1).abs() < 1e-9);
        assert_eq!(report.unique_authors, 2);
    }

    #[test]
    fn zero_elapsed_days_means_no_rate() {
        let commits = vec![
            commit("ada", "2025-01-01T08:00:00Z"),
            commit("ada", "2025-01-01T20:00:00Z"),
        ];

        let report = analyze(&commits);
        let window = report.window.as_ref().expect("window");

        assert_eq!(window.elapsed_days, 0);
        assert!(window.commits_per_day.is_none());
        assert!(report.render(&sample_repo()).contains("N/A"));
    }

    #[test]
    fn empty_commits_reported_without_panic() {
        let report = analyze(&[]);

        assert_eq!(report.total_commits, 0);
        assert!(report.window.is_none());
        assert!(report.render(&sample_repo()).contains("No commits found"));
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let commits = vec![
            commit("ada", "not-a-date"),
            CommitRecord {
                author_name: Some("bob".to_string()),
                date: None,
            },
        ];

        let report = analyze(&commits);

        assert_eq!(report.total_commits, 2);
        assert!(report.window.is_none());
        assert_eq!(report.unique_authors, 0);
        assert!(report
            .render(&sample_repo())
            .contains("Could not process commit dates"));
    }

    #[test]
    fn missing_author_name_counts_as_unknown() {
        let commits = vec![
            CommitRecord {
                author_name: None,
                date: Some("2025-02-01T00:00:00Z".to_string()),
            },
            commit("ada", "2025-02-05T00:00:00Z"),
        ];

        let report = analyze(&commits);
        assert_eq!(report.unique_authors, 2);
    }

    #[test]
    fn zulu_offset_is_accepted() {
        let commits = vec![
            commit("ada", "2025-03-01T00:00:00Z"),
            commit("ada", "2025-03-02T00:00:00+02:00"),
        ];

        let report = analyze(&commits);
        assert!(report.window.is_some());
    }
}
