//! Command-line entry point for the site maintenance tools.

use anyhow::Result;
use clap::{Parser, Subcommand};
use site_maintenance::{
    find_pages, find_root, find_subpages, run_audit, run_fix, SiteConfig, FIX_PATHS,
    FIX_THEME_TOGGLE, INTEGRATE_COMPONENTS,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "site-maintenance", about = "Audit and repair a static HTML site")]
struct Cli {
    /// Site root; discovered by walking up from the current directory
    /// when not given.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check every page for broken links, missing assets, and path issues
    Audit,
    /// Rewrite known relative stylesheet/script references to absolute paths
    FixPaths,
    /// Inject the theme-toggle setup into each page's component bootstrap
    FixThemeToggle,
    /// Replace raw header/footer markup with component tags
    IntegrateComponents {
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::default();
    let root = match cli.root {
        Some(root) => root,
        None => find_root(&config),
    };

    match cli.command {
        Command::Audit => {
            run_audit(&root, &config)?;
        }
        Command::FixPaths => {
            let pages = find_pages(&root, &config);
            run_fix(&root, &pages, &FIX_PATHS, false);
        }
        Command::FixThemeToggle => {
            let pages = find_subpages(&root, &config);
            run_fix(&root, &pages, &FIX_THEME_TOGGLE, false);
        }
        Command::IntegrateComponents { dry_run } => {
            let pages = find_subpages(&root, &config);
            run_fix(&root, &pages, &INTEGRATE_COMPONENTS, dry_run);
        }
    }

    Ok(())
}
