//! Directory complexity
//!
//! Groups files by top-level directory and ranks groups by file count.
//! File count is an intentional proxy for complexity; no attempt is made to
//! measure lines of code or cyclomatic complexity.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use reposcope_github::TreeEntry;

use crate::RULE;

/// Bucket for files that live directly at the repository root
pub const ROOT_BUCKET: &str = "(root)";

/// Aggregated statistics for one top-level directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryStats {
    pub name: String,
    pub files: u64,
    /// Sum of file sizes in bytes
    pub total_size: u64,
    /// File-extension frequency within this directory
    pub extensions: BTreeMap<String, u64>,
}

impl DirectoryStats {
    /// Extensions ranked by frequency, ties alphabetical
    pub fn top_extensions(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .extensions
            .iter()
            .map(|(ext, &count)| (ext.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    fn size_mb(&self) -> f64 {
        self.total_size as f64 / (1024.0 * 1024.0)
    }
}

/// Directories ranked by file count, descending
#[derive(Debug, Clone)]
pub struct StructureReport {
    pub directories: Vec<DirectoryStats>,
}

/// First path segment, or the root bucket for separator-free paths
pub fn top_level(path: &str) -> &str {
    match path.split_once('/') {
        Some((dir, _)) => dir,
        None => ROOT_BUCKET,
    }
}

/// Extension after the last dot, or a sentinel for dot-free paths
pub fn extension(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "no_ext",
    }
}

/// Partition file entries into top-level directory groups and rank them.
/// Tree entries (directories) do not participate.
pub fn analyze(tree: &[TreeEntry]) -> StructureReport {
    let mut directories: Vec<DirectoryStats> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in tree.iter().filter(|e| e.is_file()) {
        let dir = top_level(&entry.path);
        let slot = *index.entry(dir.to_string()).or_insert_with(|| {
            directories.push(DirectoryStats {
                name: dir.to_string(),
                ..Default::default()
            });
            directories.len() - 1
        });
        let stats = &mut directories[slot];
        stats.files += 1;
        stats.total_size += entry.size.unwrap_or(0);
        *stats
            .extensions
            .entry(extension(&entry.path).to_string())
            .or_insert(0) += 1;
    }

    // Stable sort keeps ties in first-seen order
    directories.sort_by(|a, b| b.files.cmp(&a.files));

    StructureReport { directories }
}

impl StructureReport {
    /// The highest-file-count directory, if any files were seen
    pub fn most_complex(&self) -> Option<&DirectoryStats> {
        self.directories.first()
    }

    /// Format the report as console text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🧩 MOST COMPLEX AREA OF THE CODE");
        let _ = writeln!(out, "{}", RULE);

        if self.directories.is_empty() {
            let _ = writeln!(out, "\n❌ Could not retrieve the file structure");
            let _ = writeln!(out, "{}", RULE);
            return out;
        }

        let _ = writeln!(out, "\n📁 Top 10 directories by file count:\n");
        for (i, dir) in self.directories.iter().take(10).enumerate() {
            let _ = writeln!(
                out,
                "{:2}. {:<30} - {:>4} files, {:.2} MB",
                i + 1,
                dir.name,
                dir.files,
                dir.size_mb()
            );
        }

        if let Some(winner) = self.most_complex() {
            let _ = writeln!(out, "\n🏆 Most complex area: {}", winner.name);
            let _ = writeln!(out, "   • Files: {}", winner.files);
            let _ = writeln!(out, "   • Total size: {:.2} MB", winner.size_mb());
            let _ = writeln!(out, "   • File types:");
            for (ext, count) in winner.top_extensions(5) {
                let _ = writeln!(out, "     - .{}: {} files", ext, count);
            }
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

    fn dir(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            entry_type: "tree".to_string(),
            size: None,
        }
    }

    #[test]
    fn grouping_is_a_partition() {
        let tree = vec![
            blob("src/x.py", 100),
            blob("src/deep/y.py", 200),
            blob("README.md", 50),
            blob("docs/guide.md", 75),
            dir("src"),
        ];

        let report = analyze(&tree);

        let grouped: u64 = report.directories.iter().map(|d| d.files).sum();
        let file_count = tree.iter().filter(|e| e.is_file()).count() as u64;
        assert_eq!(grouped, file_count);
    }

    #[test]
    fn src_outranks_root() {
        let tree = vec![blob("src/x.py", 100), blob("README.md", 50)];

        let report = analyze(&tree);

        // Tie on file count: first-seen group wins
        assert_eq!(report.most_complex().expect("winner").name, "src");
        assert!(report
            .directories
            .iter()
            .any(|d| d.name == ROOT_BUCKET && d.files == 1));
    }

    #[test]
    fn root_sentinel_for_separator_free_paths() {
        let report = analyze(&[blob("Makefile", 10), blob("LICENSE", 5)]);

        assert_eq!(report.directories.len(), 1);
        assert_eq!(report.directories[0].name, ROOT_BUCKET);
        assert_eq!(report.directories[0].files, 2);
    }

    #[test]
    fn extension_sentinel_for_dot_free_names() {
        assert_eq!(extension("Makefile"), "no_ext");
        assert_eq!(extension("src/main.rs"), "rs");
        assert_eq!(extension("archive.tar.gz"), "gz");
    }

    #[test]
    fn directories_do_not_count() {
        let report = analyze(&[dir("src"), dir("docs")]);
        assert!(report.directories.is_empty());
        assert!(report.most_complex().is_none());
    }

    #[test]
    fn missing_sizes_default_to_zero() {
        let tree = vec![TreeEntry {
            path: "src/a.rs".to_string(),
            entry_type: "blob".to_string(),
            size: None,
        }];

        let report = analyze(&tree);
        assert_eq!(report.directories[0].total_size, 0);
    }

    #[test]
    fn top_extensions_ranked_by_frequency() {
        let tree = vec![
            blob("src/a.rs", 1),
            blob("src/b.rs", 1),
            blob("src/c.toml", 1),
        ];

        let report = analyze(&tree);
        let winner = report.most_complex().expect("winner");
        let top = winner.top_extensions(5);

        assert_eq!(top[0], ("rs", 2));
        assert_eq!(top[1], ("toml", 1));
    }
}
