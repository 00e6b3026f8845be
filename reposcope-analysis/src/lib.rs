//! Aggregation and presentation of repository snapshots
//!
//! Pure functions that turn the raw collections of a [`RepoSnapshot`] into
//! typed report values, each with a `render()` presenter producing the
//! console text. Nothing here performs I/O.
//!
//! [`RepoSnapshot`]: reposcope_github::RepoSnapshot

pub mod context;
pub mod contributors;
pub mod docs;
pub mod structure;
pub mod summary;
pub mod velocity;

pub use context::build_context;
pub use contributors::ContributorReport;
pub use docs::{DocCategory, DocsReport};
pub use structure::{StructureReport, ROOT_BUCKET};
pub use summary::SummaryReport;
pub use velocity::VelocityReport;

/// Horizontal rule used by every report section
pub(crate) const RULE: &str =
    "============================================================";
