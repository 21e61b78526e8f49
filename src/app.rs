// Declare modules
pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod obfuscator;
pub mod processor;
pub mod scanner;
pub mod sfc;

use anyhow::{Context, Result};
use std::path::Path;

use self::config::resolve_config;
use self::formatter::ConsoleReporter;
use self::models::RunStats;
use self::processor::Processor;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<RunStats> {
    // 1. Parse Args
    let args = cli::parse_args(std::env::args_os())?;

    // 2. Resolve and validate the target folder
    let config = resolve_config(args)?;
    ConsoleReporter::resolved_path(&config.target_directory);

    // 3. Snapshot before anything is modified
    if config.backup_requested {
        let target = backup::backup(&config.target_directory)?;
        ConsoleReporter::backup_finished(&target);
    }

    // 4. Scan and transform
    process_directory(&config.target_directory)
}

/// Discovers and obfuscates every `.js` and `.vue` file below `root`.
///
/// Per-file failures only show up in the returned counters.
pub fn process_directory(root: &Path) -> Result<RunStats> {
    let scanner = Scanner::new(root.to_path_buf());

    ConsoleReporter::scanning(root);
    match scanner.preview() {
        Ok(preview) => ConsoleReporter::preview(&preview),
        Err(e) => log::warn!("Failed to read directory contents: {:#}", e),
    }

    let files = scanner
        .discover()
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    ConsoleReporter::found(files.js_files.len(), files.vue_files.len());

    if files.is_empty() {
        let has_subdirectories = scanner
            .preview()
            .map(|p| p.has_subdirectories())
            .unwrap_or(false);
        ConsoleReporter::nothing_found(has_subdirectories);
    }

    if !files.vue_files.is_empty() {
        let names: Vec<String> = files
            .vue_files
            .iter()
            .map(|p| {
                pathdiff::diff_paths(p, root)
                    .unwrap_or_else(|| p.clone())
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        ConsoleReporter::vue_listing(&names);
    }

    let mut stats = RunStats::default();
    Processor::new(root).run(&files, &mut stats);

    ConsoleReporter::summary(&stats);
    Ok(stats)
}
