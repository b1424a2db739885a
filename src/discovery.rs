//! Site discovery: find the site root and enumerate its pages.

use crate::types::SiteConfig;
use std::path::{Path, PathBuf};

/// Find the site root by walking up from CWD.
///
/// - Pass 1: check `config.root_markers` in order
/// - Pass 2: check for a `.git` directory
/// - Pass 3: fall back to CWD
pub fn find_root(config: &SiteConfig) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.as_path();
    loop {
        for marker in &config.root_markers {
            if dir.join(marker).exists() {
                return dir.to_path_buf();
            }
        }
        match dir.parent() {
            Some(p) if p != dir => dir = p,
            _ => break,
        }
    }

    dir = cwd.as_path();
    loop {
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
        match dir.parent() {
            Some(p) if p != dir => dir = p,
            _ => break,
        }
    }

    eprintln!("Warning: no site root marker found, using current directory");
    cwd
}

/// All auditable pages: the root index file plus every index file nested
/// under the pages subtree, sorted.
pub fn find_pages(root: &Path, config: &SiteConfig) -> Vec<PathBuf> {
    let mut pages = Vec::new();

    let entry = root.join(config.index_file);
    if entry.exists() {
        pages.push(entry);
    }
    pages.extend(find_subpages(root, config));
    pages
}

/// Only the pages under the pages subtree, sorted. The theme-toggle and
/// component fixes operate on these, never on the root entry page.
pub fn find_subpages(root: &Path, config: &SiteConfig) -> Vec<PathBuf> {
    let pattern = root
        .join(config.pages_dir)
        .join("**")
        .join(config.index_file);

    let mut pages: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .map(|entries| entries.flatten().collect())
        .unwrap_or_default();
    pages.sort();
    pages
}
