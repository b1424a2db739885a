//! Page-repair transforms and backup-aware persistence.
//!
//! Each fix is a pure transform over the page text, returning the new text
//! and whether anything changed. Writing back, with a one-time backup of the
//! original, is a separate step so the transforms stay testable on in-memory
//! strings.
//!
//! Header/footer replacement is a best-effort text substitution over a tag
//! pattern; it assumes well-formed, non-nested markup.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// A named repair: a pure transform plus the backup suffix its command uses.
pub struct Fix {
    pub name: &'static str,
    pub backup_suffix: &'static str,
    pub transform: fn(&str) -> (String, bool),
}

pub const FIX_PATHS: Fix = Fix {
    name: "fix-paths",
    backup_suffix: "pathbackup",
    transform: fix_paths,
};

pub const FIX_THEME_TOGGLE: Fix = Fix {
    name: "fix-theme-toggle",
    backup_suffix: "themebackup",
    transform: fix_theme_toggle,
};

pub const INTEGRATE_COMPONENTS: Fix = Fix {
    name: "integrate-components",
    backup_suffix: "backup",
    transform: integrate_components,
};

static CSS_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href=["'](\.\./)+styles/style\.css["']"#).unwrap());

static CORE_SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src=["'](\.\./)+scripts/(theme|app|i18n)\.js["']"#).unwrap());

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<header[^>]*>.*?</header>").unwrap());

static FOOTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<footer[^>]*>.*?</footer>").unwrap());

/// Matches the i18n re-apply block up to the language-toggle marker, the
/// insertion point for the theme-toggle setup.
static LANGUAGE_TOGGLE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(// Re-apply i18n translations to components\s+if \(window\.applyTranslations\) \{.*?\}\s+)\n\s+// Setup language toggle",
    )
    .unwrap()
});

const THEME_TOGGLE_REPLACEMENT: &str = "${1}\n                    // Setup theme toggle (now that component has rendered)\n                    if (window.setupThemeToggle) {\n                        window.setupThemeToggle();\n                    }\n\n                    // Setup language toggle";

const HEADER_COMPONENT: &str = "<!-- Header Component -->\n        <lc-header></lc-header>";

const FOOTER_COMPONENT: &str = "<!-- Footer Component -->\n        <lc-footer></lc-footer>";

const COMPONENT_BOOTSTRAP: &str = r#"
        <!-- Component System -->
        <script type="module">
            import { loadTemplates } from '/scripts/core/component-loader.js';

            // Load templates and initialize components
            (async () => {
                try {
                    // Load all required templates first
                    await loadTemplates(['navigation', 'cards']);
                    console.log('✓ Component templates loaded successfully');

                    // Import component scripts
                    await Promise.all([
                        import('/components/scripts/lc-header.js'),
                        import('/components/scripts/lc-footer.js'),
                        import('/components/scripts/lc-card.js')
                    ]);
                    console.log('✓ Component scripts loaded successfully');

                    // Wait a tick for components to render
                    await new Promise(resolve => setTimeout(resolve, 100));

                    // Re-apply i18n translations to components
                    if (window.applyTranslations) {
                        await window.applyTranslations();
                        console.log('✓ i18n translations applied to components');
                    }

                    // Setup language toggle (now that component has rendered)
                    const languageToggle = document.querySelector('.language-toggle');
                    if (languageToggle && window.switchLanguage) {
                        languageToggle.addEventListener('click', () => {
                            const currentLang = document.documentElement.lang;
                            const newLang = currentLang === 'en' ? 'es' : 'en';
                            window.switchLanguage(newLang);
                        });
                        console.log('✓ Language toggle initialized');
                    }
                } catch (error) {
                    console.error('Failed to initialize components:', error);
                }
            })();
        </script>"#;

/// Rewrite the known relative stylesheet/script references to root-absolute
/// ones, and retarget the stale `contact.html` link.
pub fn fix_paths(text: &str) -> (String, bool) {
    let updated = CSS_HREF_RE.replace_all(text, r#"href="/styles/style.css""#);
    let updated = CORE_SCRIPT_RE.replace_all(&updated, r#"src="/scripts/${2}.js""#);
    let updated = updated.replace(r#"href="contact.html""#, r#"href="/pages/contact/""#);

    let changed = updated != text;
    (updated, changed)
}

/// Insert the theme-toggle setup between the i18n re-apply block and the
/// language-toggle setup in the component bootstrap script.
///
/// Pages that already call `setupThemeToggle` are left untouched; the
/// insertion-point pattern would otherwise re-match across its own output.
pub fn fix_theme_toggle(text: &str) -> (String, bool) {
    if text.contains("setupThemeToggle") {
        return (text.to_string(), false);
    }

    let updated = LANGUAGE_TOGGLE_MARKER_RE.replace_all(text, THEME_TOGGLE_REPLACEMENT);
    let changed = updated != text;
    (updated.into_owned(), changed)
}

/// Swap raw `<header>`/`<footer>` markup for component tags and append the
/// component bootstrap script before `</body>`.
pub fn integrate_components(text: &str) -> (String, bool) {
    let with_header = HEADER_RE.replace_all(text, HEADER_COMPONENT);
    let with_footer = FOOTER_RE.replace_all(&with_header, FOOTER_COMPONENT);
    let mut updated = with_footer.into_owned();

    // Bootstrap script goes in once; both markers guard against re-insertion.
    if !updated.contains("Component System") && !updated.contains("lc-header.js") {
        updated = updated.replace("</body>", &format!("{COMPONENT_BOOTSTRAP}\n    </body>"));
    }

    let changed = updated != text;
    (updated, changed)
}

/// Overwrite `path` with `updated`, preserving the original once at
/// `<path>.<suffix>`. Returns whether a write happened.
///
/// The backup is created only the first time a change is persisted; later
/// runs never touch an existing backup.
pub fn write_with_backup(path: &Path, original: &str, updated: &str, suffix: &str) -> Result<bool> {
    if updated == original {
        return Ok(false);
    }

    let backup = backup_path(path, suffix);
    if !backup.exists() {
        fs::write(&backup, original)
            .with_context(|| format!("writing backup {}", backup.display()))?;
    }
    fs::write(path, updated).with_context(|| format!("writing {}", path.display()))?;
    Ok(true)
}

/// Apply a fix to one file on disk. Returns whether the file changed
/// (or would change, under `dry_run`).
pub fn apply_fix(path: &Path, fix: &Fix, dry_run: bool) -> Result<bool> {
    let original =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let (updated, changed) = (fix.transform)(&original);
    if !changed {
        return Ok(false);
    }
    if dry_run {
        return Ok(true);
    }
    write_with_backup(path, &original, &updated, fix.backup_suffix)?;
    Ok(true)
}

fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
