//! Documentation coverage
//!
//! Classifies documentation-looking files into fixed categories and derives
//! a 0-6 completeness score from their presence and volume.

use std::fmt::Write;

use reposcope_github::{Repository, TreeEntry};

use crate::RULE;

/// Broad filter deciding whether a path counts as documentation at all
const DOC_PATTERNS: [&str; 9] = [
    "readme",
    "contributing",
    "license",
    "changelog",
    "docs/",
    "documentation",
    "guide",
    "tutorial",
    "api",
];

/// Highest achievable completeness score
pub const MAX_SCORE: u8 = 6;

/// Documentation category, in classification priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Readme,
    ContributionGuide,
    License,
    Changelog,
    Technical,
    Other,
}

/// A documentation file with its size in bytes
#[derive(Debug, Clone)]
pub struct DocFile {
    pub path: String,
    pub size: u64,
}

/// Documentation files grouped by category, with the completeness score
#[derive(Debug, Clone, Default)]
pub struct DocsReport {
    pub readmes: Vec<DocFile>,
    pub contribution_guides: Vec<DocFile>,
    pub licenses: Vec<DocFile>,
    pub changelogs: Vec<DocFile>,
    pub technical: Vec<DocFile>,
    pub other: Vec<DocFile>,
    /// Completeness score in [0, 6]
    pub score: u8,
}

/// Classify a path, or None when it does not look like documentation.
/// Matching is case-insensitive; the first matching category wins.
pub fn classify(path: &str) -> Option<DocCategory> {
    let lower = path.to_lowercase();

    let is_doc =
        DOC_PATTERNS.iter().any(|p| lower.contains(p)) || lower.ends_with(".md");
    if !is_doc {
        return None;
    }

    Some(if lower.contains("readme") {
        DocCategory::Readme
    } else if lower.contains("contributing") || lower.contains("contribute") {
        DocCategory::ContributionGuide
    } else if lower.contains("license") {
        DocCategory::License
    } else if lower.contains("changelog") || lower.contains("history") {
        DocCategory::Changelog
    } else if lower.contains("docs/") || lower.contains("api") || lower.contains("guide") {
        DocCategory::Technical
    } else {
        DocCategory::Other
    })
}

/// Classify every file entry and compute the completeness score
pub fn analyze(tree: &[TreeEntry]) -> DocsReport {
    let mut report = DocsReport::default();

    for entry in tree.iter().filter(|e| e.is_file()) {
        let Some(category) = classify(&entry.path) else {
            continue;
        };
        let file = DocFile {
            path: entry.path.clone(),
            size: entry.size.unwrap_or(0),
        };
        match category {
            DocCategory::Readme => report.readmes.push(file),
            DocCategory::ContributionGuide => report.contribution_guides.push(file),
            DocCategory::License => report.licenses.push(file),
            DocCategory::Changelog => report.changelogs.push(file),
            DocCategory::Technical => report.technical.push(file),
            DocCategory::Other => report.other.push(file),
        }
    }

    report.score = compute_score(&report);
    report
}

fn compute_score(report: &DocsReport) -> u8 {
    let mut score = 0;
    if !report.readmes.is_empty() {
        score += 2;
    }
    if !report.contribution_guides.is_empty() {
        score += 1;
    }
    if !report.licenses.is_empty() {
        score += 1;
    }
    if report.technical.len() > 3 {
        score += 2;
    } else if !report.technical.is_empty() {
        score += 1;
    }
    score
}

impl DocsReport {
    /// Total documentation files across all categories
    pub fn total_files(&self) -> usize {
        self.readmes.len()
            + self.contribution_guides.len()
            + self.licenses.len()
            + self.changelogs.len()
            + self.technical.len()
            + self.other.len()
    }

    fn categories(&self) -> [(&'static str, &[DocFile]); 6] {
        [
            ("README", &self.readmes),
            ("Contribution guides", &self.contribution_guides),
            ("Licenses", &self.licenses),
            ("Changelog", &self.changelogs),
            ("API/technical docs", &self.technical),
            ("Other", &self.other),
        ]
    }

    /// Format the report as console text
    pub fn render(&self, repo: &Repository) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "📚 DOCUMENTATION STATUS");
        let _ = writeln!(out, "{}", RULE);

        let _ = writeln!(
            out,
            "\n📄 Documentation files found: {}\n",
            self.total_files()
        );

        for (label, files) in self.categories() {
            if files.is_empty() {
                continue;
            }
            let _ = writeln!(out, "📌 {}: {} file(s)", label, files.len());
            for file in files.iter().take(3) {
                let _ = writeln!(out, "   • {} ({:.1} KB)", file.path, file.size as f64 / 1024.0);
            }
            if files.len() > 3 {
                let _ = writeln!(out, "   ... and {} more", files.len() - 3);
            }
        }

        let _ = writeln!(out, "\n📊 Assessment:");
        if self.readmes.is_empty() {
            let _ = writeln!(out, "   ❌ Missing README");
        } else {
            let _ = writeln!(out, "   ✅ Has a README");
        }
        if !self.contribution_guides.is_empty() {
            let _ = writeln!(out, "   ✅ Has a contribution guide");
        }
        if !self.licenses.is_empty() {
            let _ = writeln!(out, "   ✅ Has a license");
        }
        if self.technical.len() > 3 {
            let _ = writeln!(out, "   ✅ Good technical documentation");
        } else if !self.technical.is_empty() {
            let _ = writeln!(out, "   ⚠️  Limited technical documentation");
        }

        let _ = writeln!(out, "\n🎯 Documentation score: {}/{}", self.score, MAX_SCORE);

        if let Some(description) = &repo.description {
            let _ = writeln!(out, "\n💬 Repository description: {}", description);
        }

        let _ = writeln!(out, "{}", RULE);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(path: &str, size: u64) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            entry_type: "blob".to_string(),
            size: Some(size),
        }
    }

    #[test]
    fn classification_priority_order() {
        assert_eq!(classify("README.md"), Some(DocCategory::Readme));
        assert_eq!(
            classify("CONTRIBUTING.md"),
            Some(DocCategory::ContributionGuide)
        );
        assert_eq!(classify("LICENSE"), Some(DocCategory::License));
        assert_eq!(classify("CHANGELOG.md"), Some(DocCategory::Changelog));
        assert_eq!(classify("docs/setup.rst"), Some(DocCategory::Technical));
        assert_eq!(classify("notes.md"), Some(DocCategory::Other));
        assert_eq!(classify("src/main.rs"), None);
    }

    #[test]
    fn readme_wins_over_docs_prefix() {
        // Priority: a README inside docs/ is still a README
        assert_eq!(classify("docs/README.md"), Some(DocCategory::Readme));
    }

    #[test]
    fn md_suffix_alone_qualifies() {
        assert_eq!(classify("notes/ideas.md"), Some(DocCategory::Other));
        // ".md" appearing mid-path is not a match
        assert_eq!(classify("src/x.mdx.rs"), None);
    }

    #[test]
    fn score_is_monotonic_and_bounded() {
        let empty = analyze(&[]);
        assert_eq!(empty.score, 0);

        let with_readme = analyze(&[blob("README.md", 10)]);
        assert_eq!(with_readme.score, empty.score + 2);

        let with_license = analyze(&[blob("README.md", 10), blob("LICENSE", 5)]);
        assert_eq!(with_license.score, with_readme.score + 1);

        let full = analyze(&[
            blob("README.md", 10),
            blob("CONTRIBUTING.md", 10),
            blob("LICENSE", 5),
            blob("docs/a.rst", 1),
            blob("docs/b.rst", 1),
            blob("docs/c.rst", 1),
            blob("docs/d.rst", 1),
        ]);
        assert_eq!(full.score, MAX_SCORE);
    }

    #[test]
    fn limited_technical_docs_score_one() {
        let report = analyze(&[blob("docs/setup.rst", 10)]);
        assert_eq!(report.score, 1);

        let report = analyze(&[
            blob("docs/a.rst", 1),
            blob("docs/b.rst", 1),
            blob("docs/c.rst", 1),
            blob("docs/d.rst", 1),
        ]);
        assert_eq!(report.score, 2);
    }

    #[test]
    fn readme_in_minimal_tree() {
        let tree = vec![blob("src/x.py", 100), blob("README.md", 50)];

        let report = analyze(&tree);

        assert_eq!(report.readmes.len(), 1);
        assert!(report.score >= 2);
    }

    #[test]
    fn render_lists_at_most_three_examples() {
        let tree: Vec<TreeEntry> = (0..5)
            .map(|i| blob(&format!("docs/page{}.rst", i), 10))
            .collect();

        let report = analyze(&tree);
        let rendered = report.render(&sample_repo());

        assert!(rendered.contains("... and 2 more"));
    }

    fn sample_repo() -> Repository {
        Repository {
            name: "demo".to_string(),
            full_name: "octo/demo".to_string(),
            description: Some("A demo".to_string()),
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            watchers_count: 0,
            open_issues_count: 0,
            size: 0,
            created_at: String::new(),
            updated_at: String::new(),
            html_url: String::new(),
            homepage: None,
            default_branch: "main".to_string(),
        }
    }
}
