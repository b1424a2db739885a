//! Reference resolution: map an `href`/`src` value to an on-disk path.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Resolve a reference found in a document and check whether its target exists.
///
/// References starting with `/` are root-relative and join against `site_root`;
/// everything else joins against the containing directory of `source_doc` and
/// is lexically normalized. A reference ending in `/`, or one that lands on an
/// existing directory, falls back to the directory's `index.html` — the static
/// web-server convention.
///
/// Query strings and fragments are not stripped before resolution; a reference
/// like `page.html?v=2` is probed verbatim and will report as missing. Known
/// limitation, kept so the audit matches what a strict file server would do.
///
/// Never fails: any resolution error reports `(false, raw reference)`.
pub fn resolve(reference: &str, source_doc: &Path, site_root: &Path) -> (bool, PathBuf) {
    match try_resolve(reference, source_doc, site_root) {
        Ok(result) => result,
        Err(_) => (false, PathBuf::from(reference)),
    }
}

fn try_resolve(reference: &str, source_doc: &Path, site_root: &Path) -> Result<(bool, PathBuf)> {
    let mut resolved = if let Some(rest) = reference.strip_prefix('/') {
        site_root.join(rest)
    } else {
        let dir = source_doc
            .parent()
            .with_context(|| format!("no parent directory for {}", source_doc.display()))?;
        normalize(&dir.join(reference))
    };

    // Trailing slash is decided on the raw reference, the directory probe on
    // the joined path. Either one triggers a single index-file fallback.
    if reference.ends_with('/') || resolved.is_dir() {
        resolved.push("index.html");
    }

    let exists = resolved.exists();
    Ok((exists, resolved))
}

/// Lexical normalization: collapse `.`, pop `..` against preceding segments.
///
/// Purely textual — symlinks are not resolved and the path need not exist.
/// A `..` at the root is dropped, matching how a web server treats an escape
/// above its document root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // At the root there is nothing to pop; the escape is swallowed.
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
