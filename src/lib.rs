//! Audit and repair tooling for a static HTML site: broken-link audit,
//! path rewriting, theme-toggle injection, component integration.

mod audit;
mod discovery;
mod extract;
mod resolve;
mod rewrite;
mod types;

pub use audit::{audit_page, path_convention_issues, print_page_issues};
pub use discovery::{find_pages, find_root, find_subpages};
pub use extract::{extract_images, extract_links, extract_scripts};
pub use resolve::resolve;
pub use rewrite::{
    apply_fix, fix_paths, fix_theme_toggle, integrate_components, write_with_backup, Fix,
    FIX_PATHS, FIX_THEME_TOGGLE, INTEGRATE_COMPONENTS,
};
pub use types::{AuditSummary, BrokenRef, PageIssues, SiteConfig};

use anyhow::{Context, Result};
use std::path::Path;

/// File name of the machine-readable summary written at the site root.
pub const REPORT_FILE: &str = "audit-report.json";

/// Audit every page under the root, print the report, and persist the
/// JSON summary. Per-page failures are reported inline; the run always
/// completes.
pub fn run_audit(root: &Path, config: &SiteConfig) -> Result<AuditSummary> {
    let pages = find_pages(root, config);

    println!("{}", "=".repeat(70));
    println!("PAGE AUDIT REPORT");
    println!("{}", "=".repeat(70));
    println!();

    let mut total_issues = 0;
    let mut pages_with_issues = 0;

    for page in &pages {
        let rel = page
            .strip_prefix(root)
            .unwrap_or(page)
            .to_string_lossy()
            .to_string();
        let issues = audit_page(page, root, config);

        if !issues.is_clean() {
            pages_with_issues += 1;
            total_issues += issues.count();
            print_page_issues(&rel, &issues);
        }
    }

    println!("{}", "=".repeat(70));
    println!("Summary: {total_issues} issues found across {pages_with_issues} pages");
    println!("Audited: {} pages total", pages.len());
    println!("{}", "=".repeat(70));

    let summary = AuditSummary {
        total_pages: pages.len(),
        pages_with_issues,
        total_issues,
    };

    let report_path = root.join(REPORT_FILE);
    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(&report_path, json)
        .with_context(|| format!("writing {}", report_path.display()))?;
    println!("\nDetailed report saved to: {REPORT_FILE}");

    Ok(summary)
}

/// Apply one fix across a page set. Per-page errors are printed and counted
/// as unchanged; the batch continues. Returns the number of changed pages.
pub fn run_fix(root: &Path, pages: &[std::path::PathBuf], fix: &Fix, dry_run: bool) -> usize {
    println!("{}", "=".repeat(70));
    println!("{} ({} pages)", fix.name.to_uppercase(), pages.len());
    println!("{}", "=".repeat(70));
    println!();

    let mut fixed = 0;
    for page in pages {
        let rel = page.strip_prefix(root).unwrap_or(page).to_string_lossy();
        match apply_fix(page, fix, dry_run) {
            Ok(true) if dry_run => {
                println!("  [dry run] would update {rel}");
                fixed += 1;
            }
            Ok(true) => {
                println!("  \u{2713} Fixed {rel}");
                fixed += 1;
            }
            Ok(false) => {
                println!("  \u{2139} No changes needed in {rel}");
            }
            Err(err) => {
                println!("  \u{2717} Error in {rel}: {err:#}");
            }
        }
    }

    println!();
    println!("{}", "=".repeat(70));
    println!("Summary: Fixed {fixed} out of {} files", pages.len());
    println!("{}", "=".repeat(70));
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_page(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn run_audit_counts_and_persists_summary() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(root, "index.html", r#"<a href="/pages/x/">x</a>"#);
        write_page(
            root,
            "pages/x/index.html",
            r#"<a href="../../missing.html">gone</a>"#,
        );

        let summary = run_audit(root, &SiteConfig::default()).unwrap();
        assert_eq!(summary.total_pages, 2);
        assert_eq!(summary.pages_with_issues, 1);
        assert_eq!(summary.total_issues, 1);

        let report = fs::read_to_string(root.join(REPORT_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["pages_with_issues"], 1);
        assert_eq!(json["total_issues"], 1);
    }

    #[test]
    fn run_audit_clean_site() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(root, "index.html", r#"<a href="/pages/a/">a</a>"#);
        write_page(root, "pages/a/index.html", "<html></html>");

        let summary = run_audit(root, &SiteConfig::default()).unwrap();
        assert_eq!(summary.total_pages, 2);
        assert_eq!(summary.pages_with_issues, 0);
        assert_eq!(summary.total_issues, 0);
    }

    #[test]
    fn run_fix_reports_changed_count_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_page(root, "index.html", r#"<link href="../../styles/style.css">"#);
        write_page(root, "pages/a/index.html", "<html>nothing to fix</html>");

        let config = SiteConfig::default();
        let pages = find_pages(root, &config);
        assert_eq!(run_fix(root, &pages, &FIX_PATHS, false), 1);
        assert_eq!(run_fix(root, &pages, &FIX_PATHS, false), 0);
        assert!(root.join("index.html.pathbackup").exists());
        assert!(!root.join("pages/a/index.html.pathbackup").exists());
    }

    #[test]
    fn run_fix_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let html = r#"<link href="../../styles/style.css">"#;
        write_page(root, "index.html", html);

        let config = SiteConfig::default();
        let pages = find_pages(root, &config);
        assert_eq!(run_fix(root, &pages, &FIX_PATHS, true), 1);
        assert_eq!(fs::read_to_string(root.join("index.html")).unwrap(), html);
        assert!(!root.join("index.html.pathbackup").exists());
    }
}
