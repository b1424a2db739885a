//! Reference extraction from raw page text.
//!
//! Pattern matching over the document source, not an HTML parse. Tolerant of
//! malformed markup; attribute values inside comments or templates may still
//! match, which the audit accepts as over-reporting.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href=["']([^"']+)["']"#).unwrap());

static SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src=["']([^"']+)["']"#).unwrap());

static SCRIPT_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<script[^>]+src=["']([^"']+)["']"#).unwrap());

/// Schemes and targets a link audit cannot check on the filesystem.
const LINK_SKIP_PREFIXES: &[&str] = &["http", "#", "javascript:", "mailto:", "tel:"];

/// All `href` values that point into the site tree.
pub fn extract_links(content: &str) -> BTreeSet<String> {
    collect(&HREF_RE, content, LINK_SKIP_PREFIXES)
}

/// All `src` values for images and other embedded assets.
pub fn extract_images(content: &str) -> BTreeSet<String> {
    collect(&SRC_RE, content, &["http", "data:"])
}

/// All `src` values appearing on `<script>` tags.
pub fn extract_scripts(content: &str) -> BTreeSet<String> {
    collect(&SCRIPT_SRC_RE, content, &["http"])
}

fn collect(re: &Regex, content: &str, skip_prefixes: &[&str]) -> BTreeSet<String> {
    re.captures_iter(content)
        .map(|cap| cap[1].to_string())
        .filter(|value| !skip_prefixes.iter().any(|p| value.starts_with(p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_links_basic() {
        let html = r#"<a href="/pages/about/">About</a> <a href='../contact/'>C</a>"#;
        let links = extract_links(html);
        assert_eq!(links.len(), 2);
        assert!(links.contains("/pages/about/"));
        assert!(links.contains("../contact/"));
    }

    #[test]
    fn extract_links_skips_external_and_schemes() {
        let html = concat!(
            r#"<a href="https://example.com">x</a>"#,
            r#"<a href="http://example.com">x</a>"#,
            r##"<a href="#section">x</a>"##,
            r#"<a href="javascript:void(0)">x</a>"#,
            r#"<a href="mailto:a@b.c">x</a>"#,
            r#"<a href="tel:+123">x</a>"#,
            r#"<a href="/real.html">x</a>"#,
        );
        let links = extract_links(html);
        assert_eq!(links.len(), 1);
        assert!(links.contains("/real.html"));
    }

    #[test]
    fn extract_links_deduplicates() {
        let html = r#"<a href="/a.html">1</a><a href="/a.html">2</a>"#;
        assert_eq!(extract_links(html).len(), 1);
    }

    #[test]
    fn extract_images_skips_data_uris() {
        let html = concat!(
            r#"<img src="/images/logo.png">"#,
            r#"<img src="data:image/png;base64,AAAA">"#,
            r#"<img src="https://cdn.example.com/x.png">"#,
        );
        let images = extract_images(html);
        assert_eq!(images.len(), 1);
        assert!(images.contains("/images/logo.png"));
    }

    #[test]
    fn extract_scripts_requires_script_tag() {
        let html = concat!(
            r#"<script src="/scripts/app.js"></script>"#,
            r#"<script type="module" src='/scripts/theme.js'></script>"#,
            r#"<img src="/images/photo.jpg">"#,
        );
        let scripts = extract_scripts(html);
        assert_eq!(scripts.len(), 2);
        assert!(scripts.contains("/scripts/app.js"));
        assert!(scripts.contains("/scripts/theme.js"));
        assert!(!scripts.contains("/images/photo.jpg"));
    }

    #[test]
    fn extract_tolerates_malformed_markup() {
        let html = r#"<a href="/ok.html" <broken <a href="/also.html">"#;
        let links = extract_links(html);
        assert!(links.contains("/ok.html"));
        assert!(links.contains("/also.html"));
    }

    #[test]
    fn extract_empty_content() {
        assert!(extract_links("").is_empty());
        assert!(extract_images("").is_empty());
        assert!(extract_scripts("").is_empty());
    }
}
