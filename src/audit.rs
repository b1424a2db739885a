//! Per-page audit: broken links, missing assets, path-convention warnings.

use crate::extract::{extract_images, extract_links, extract_scripts};
use crate::resolve::resolve;
use crate::types::{BrokenRef, PageIssues, SiteConfig};
use std::collections::BTreeSet;
use std::path::Path;

/// How many example references a category prints before truncating.
const MAX_EXAMPLES: usize = 3;

/// Audit a single page against the site tree.
///
/// A failure to read the page is recorded in the `error` field; the batch
/// never aborts on one bad document.
pub fn audit_page(page: &Path, root: &Path, config: &SiteConfig) -> PageIssues {
    let mut issues = PageIssues::default();

    let content = match std::fs::read_to_string(page) {
        Ok(content) => content,
        Err(err) => {
            issues.error = Some(err.to_string());
            return issues;
        }
    };

    issues.broken_links = broken_refs(&extract_links(&content), page, root);
    issues.missing_images = broken_refs(&extract_images(&content), page, root);
    issues.missing_scripts = broken_refs(&extract_scripts(&content), page, root);
    issues.path_issues = path_convention_issues(&content, config);

    issues
}

fn broken_refs(refs: &BTreeSet<String>, page: &Path, root: &Path) -> Vec<BrokenRef> {
    refs.iter()
        .filter_map(|reference| {
            let (exists, resolved) = resolve(reference, page, root);
            (!exists).then(|| BrokenRef {
                reference: reference.clone(),
                resolved: resolved.to_string_lossy().to_string(),
            })
        })
        .collect()
}

/// Warn when shared trees are reached through `../` chains instead of the
/// root-absolute form every page is expected to use.
pub fn path_convention_issues(content: &str, config: &SiteConfig) -> Vec<String> {
    let mut issues = Vec::new();
    for dir in &config.absolute_only_dirs {
        let single = format!("../{dir}/");
        let double = format!("../../{dir}/");
        if content.contains(&single) || content.contains(&double) {
            issues.push(format!(
                "Using relative paths for {dir} (should be absolute /{dir}/)"
            ));
        }
    }
    issues
}

/// Print the console section for one problematic page.
pub fn print_page_issues(rel: &str, issues: &PageIssues) {
    println!("\u{1f4c4} {rel}");
    println!("{}", "-".repeat(70));

    if let Some(err) = &issues.error {
        println!("  \u{2717} Error: {err}");
    }
    print_category("\u{2717} Broken Links", &issues.broken_links);
    print_category("\u{2717} Missing Images", &issues.missing_images);
    print_category("\u{2717} Missing Scripts", &issues.missing_scripts);

    if !issues.path_issues.is_empty() {
        println!("  \u{26a0} Path Issues ({})", issues.path_issues.len());
        for issue in &issues.path_issues {
            println!("     \u{2022} {issue}");
        }
    }
    println!();
}

fn print_category(label: &str, refs: &[BrokenRef]) {
    if refs.is_empty() {
        return;
    }
    println!("  {label} ({})", refs.len());
    for broken in refs.iter().take(MAX_EXAMPLES) {
        println!("     \u{2022} {}", broken.reference);
    }
    if refs.len() > MAX_EXAMPLES {
        println!("     ... and {} more", refs.len() - MAX_EXAMPLES);
    }
}
