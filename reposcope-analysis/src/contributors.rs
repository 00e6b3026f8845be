//! Contributor ranking
//!
//! The contributor list arrives pre-sorted by descending contributions from
//! the API; rank order is preserved rather than recomputed.

use std::fmt::Write;

use reposcope_github::Contributor;

use crate::RULE;

/// The single highest-ranked contributor and their share of the total
#[derive(Debug, Clone)]
pub struct TopContributor {
    pub login: String,
    pub contributions: u64,
    /// Share of the sum of all fetched contributions, in percent
    pub percentage: f64,
}

/// Ranking of all fetched contributors
#[derive(Debug, Clone)]
pub struct ContributorReport {
    pub ranking: Vec<Contributor>,
    pub total_contributions: u64,
    pub top: Option<TopContributor>,
}

/// Rank contributors and compute the leader's share of the total.
///
/// An empty input yields a report with no leader, never an error.
pub fn analyze(contributors: &[Contributor]) -> ContributorReport {
    let total_contributions: u64 = contributors.iter().map(|c| c.contributions).sum();

    let top = contributors.first().map(|c| TopContributor {
        login: c.login.clone(),
        contributions: c.contributions,
        percentage: if total_contributions > 0 {
            c.contributions as f64 / total_contributions as f64 * 100.0
        } else {
            0.0
        },
    });

    ContributorReport {
        ranking: contributors.to_vec(),
        total_contributions,
        top,
    }
}

impl ContributorReport {
    /// Format the report as console text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🏆 TOP CONTRIBUTOR");
        let _ = writeln!(out, "{}", RULE);

        if self.ranking.is_empty() {
            let _ = writeln!(out, "\n❌ No contributors found");
            let _ = writeln!(out, "{}", RULE);
            return out;
        }

        let _ = writeln!(
            out,
            "\n📊 Top 10 contributors (of {} total):\n",
            self.ranking.len()
        );
        for (i, contributor) in self.ranking.iter().take(10).enumerate() {
            let _ = writeln!(
                out,
                "{:2}. {:<20} - {:>5} contributions",
                i + 1,
                contributor.login,
                contributor.contributions
            );
        }

        if let Some(top) = &self.top {
            let _ = writeln!(out, "\n🥇 Winner: {}", top.login);
            let _ = writeln!(out, "   • Contributions: {}", top.contributions);
            let _ = writeln!(out, "   • Share of total: {:.1}%", top.percentage);
            let _ = writeln!(out, "   • Profile: https://github.com/{}", top.login);
        }

        let _ = writeln!(out, "{}", RULE);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(login: &str, contributions: u64) -> Contributor {
        Contributor {
            login: login.to_string(),
            contributions,
        }
    }

    #[test]
    fn top_contributor_share() {
        let report = analyze(&[contributor("a", 80), contributor("b", 20)]);

        let top = report.top.expect("top contributor");
        assert_eq!(top.login, "a");
        assert_eq!(top.contributions, 80);
        assert!((top.percentage - 80.0).abs() < f64::EPSILON);
        assert_eq!(report.total_contributions, 100);
    }

    #[test]
    fn empty_collection_is_not_an_error() {
        let report = analyze(&[]);

        assert!(report.top.is_none());
        assert_eq!(report.total_contributions, 0);
        assert!(report.render().contains("No contributors found"));
    }

    #[test]
    fn zero_contributions_yield_zero_percentage() {
        let report = analyze(&[contributor("ghost", 0)]);

        let top = report.top.expect("top contributor");
        assert_eq!(top.percentage, 0.0);
    }

    #[test]
    fn rank_order_is_preserved_from_input() {
        let report = analyze(&[
            contributor("first", 50),
            contributor("second", 30),
            contributor("third", 20),
        ]);

        let logins: Vec<&str> = report.ranking.iter().map(|c| c.login.as_str()).collect();
        assert_eq!(logins, ["first", "second", "third"]);

        let rendered = report.render();
        assert!(rendered.contains("Winner: first"));
        assert!(rendered.contains("Share of total: 50.0%"));
    }
}
