//! Core types for site auditing and repair.

use serde::Serialize;

/// Configuration for site discovery and auditing.
///
/// The defaults match the site's layout conventions; tests override
/// individual fields to exercise other layouts.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site root marker files, checked in order while walking up from CWD.
    pub root_markers: Vec<&'static str>,

    /// Directory under the root holding all nested pages.
    pub pages_dir: &'static str,

    /// File name a directory reference falls back to.
    pub index_file: &'static str,

    /// Directory names that must be referenced root-absolutely
    /// (`/components/...`), never via `../` chains.
    pub absolute_only_dirs: Vec<&'static str>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_markers: vec!["index.html"],
            pages_dir: "pages",
            index_file: "index.html",
            absolute_only_dirs: vec!["components", "tools"],
        }
    }
}

/// A reference that did not resolve to an existing file.
#[derive(Debug, Clone, Serialize)]
pub struct BrokenRef {
    /// The raw attribute value as found in the document.
    pub reference: String,
    /// Best-effort absolute path the reference resolved to.
    pub resolved: String,
}

/// Issues found while auditing a single page.
#[derive(Debug, Default, Serialize)]
pub struct PageIssues {
    pub broken_links: Vec<BrokenRef>,
    pub missing_images: Vec<BrokenRef>,
    pub missing_scripts: Vec<BrokenRef>,
    pub path_issues: Vec<String>,
    /// Set when the page itself could not be read or processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageIssues {
    /// Total number of issues, not counting a read error.
    pub fn count(&self) -> usize {
        self.broken_links.len()
            + self.missing_images.len()
            + self.missing_scripts.len()
            + self.path_issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.count() == 0 && self.error.is_none()
    }
}

/// Machine-readable run summary, persisted as `audit-report.json`.
#[derive(Debug, Serialize)]
pub struct AuditSummary {
    pub total_pages: usize,
    pub pages_with_issues: usize,
    pub total_issues: usize,
}
