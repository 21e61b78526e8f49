use crate::app::error::ShroudError;
use crate::app::models::{DirectoryPreview, RunStats};
use crate::app::obfuscator::TransformProfile;
use colored::Colorize;
use std::path::Path;

/// Vue files listed by name before processing starts.
const LISTED_VUE_FILES: usize = 10;
/// Characters of a script-less component echoed back to the user.
const CONTENT_PREVIEW_CHARS: usize = 100;
const USAGE: &str = "Usage: vueshroud <folder> [--backup]";

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn render_preview(preview: &DirectoryPreview) -> Vec<String> {
        if preview.entries.is_empty() {
            return vec!["- (empty)".to_string()];
        }

        let mut lines = Vec::new();
        for entry in &preview.entries {
            let marker = if entry.is_dir { " (dir)" } else { "" };
            lines.push(format!("- {}{}", entry.name, marker));

            if !entry.is_dir {
                continue;
            }
            match &entry.children {
                Some(children) => {
                    for child in children {
                        lines.push(format!("  └─ {}", child));
                    }
                    if entry.child_count > children.len() {
                        lines.push(format!(
                            "  └─ ... {} more",
                            entry.child_count - children.len()
                        ));
                    }
                }
                None => lines.push("  └─ (unreadable)".to_string()),
            }
        }
        lines
    }

    pub fn render_listing(names: &[String]) -> Vec<String> {
        let mut lines: Vec<String> = names
            .iter()
            .take(LISTED_VUE_FILES)
            .map(|name| format!("- {}", name))
            .collect();
        if names.len() > LISTED_VUE_FILES {
            lines.push(format!("- ... {} more", names.len() - LISTED_VUE_FILES));
        }
        lines
    }

    pub fn render_content_preview(content: &str) -> String {
        let head: String = content.chars().take(CONTENT_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }

    pub fn resolved_path(path: &Path) {
        println!("{}", format!("Using absolute path: {}", path.display()).blue());
    }

    pub fn backup_started(target: &Path) {
        println!("{}", format!("Creating backup at: {}", target.display()).blue());
    }

    pub fn backup_finished(target: &Path) {
        println!("{}", format!("Backup complete: {}", target.display()).green());
    }

    pub fn preview(preview: &DirectoryPreview) {
        println!("{}", "Directory contents:".yellow());
        for line in Self::render_preview(preview) {
            println!("{}", line.yellow());
        }
    }

    pub fn scanning(root: &Path) {
        println!("{}", format!("Scanning folder: {}", root.display()).blue());
    }

    pub fn found(js: usize, vue: usize) {
        println!(
            "{}",
            format!("Found {} JS files and {} Vue files", js, vue).green()
        );
    }

    pub fn nothing_found(has_subdirectories: bool) {
        println!("{}", "Warning: no files to obfuscate were found!".red());
        if has_subdirectories {
            println!(
                "{}",
                "Hint: the folder has subdirectories; check their permissions or process them separately"
                    .yellow()
            );
        }
    }

    pub fn vue_listing(names: &[String]) {
        println!(
            "{}",
            format!("Vue files found (first {}):", LISTED_VUE_FILES).cyan()
        );
        for line in Self::render_listing(names) {
            println!("{}", line.cyan());
        }
    }

    pub fn processing_js(relative: &str) {
        println!("{}", format!("Processing JS file: {}", relative).cyan());
    }

    pub fn processing_vue(relative: &str) {
        println!("{}", format!("Processing Vue file: {}", relative).cyan());
    }

    pub fn script_found(length: usize) {
        println!("{}", format!("Found script block, length: {}", length).yellow());
    }

    pub fn safe_mode() {
        println!(
            "{}",
            "Complex syntax detected, obfuscating in safe mode...".yellow()
        );
    }

    pub fn vue_done(relative: &str, profile: TransformProfile) {
        let suffix = match profile {
            TransformProfile::Safe => " (safe mode)",
            TransformProfile::Standard => "",
        };
        println!(
            "{}",
            format!("Processed Vue file{}: {}", suffix, relative).green()
        );
    }

    pub fn file_failed(err: &ShroudError) {
        println!("{}", err.to_string().red());
    }

    pub fn left_unchanged(relative: &str) {
        println!(
            "{}",
            format!("Skipping file, left unchanged: {}", relative).yellow()
        );
    }

    pub fn content_preview(content: &str) {
        println!(
            "{}",
            format!("File preview: {}", Self::render_content_preview(content)).yellow()
        );
    }

    pub fn summary(stats: &RunStats) {
        println!("{}", "\nObfuscation complete!".green());
        println!(
            "{}",
            format!("Processed {} JS files", stats.js_files_processed).white()
        );
        println!(
            "{}",
            format!("Processed {} Vue files", stats.vue_files_processed).white()
        );
        if stats.errors > 0 {
            println!("{}", format!("Failed: {} files", stats.errors).red());
        }
    }

    /// Reports an error that ends the run.
    pub fn fatal(err: &anyhow::Error) {
        match err.downcast_ref::<ShroudError>() {
            Some(ShroudError::MissingDirectoryArgument) => {
                println!("{}", "Please specify the folder to obfuscate".red());
                println!("{}", USAGE.yellow());
            }
            Some(ShroudError::InvalidArguments(message)) => {
                println!("{}", message.trim_end().red());
                println!("{}", USAGE.yellow());
            }
            Some(ShroudError::DirectoryNotFound(path)) => {
                println!(
                    "{}",
                    format!("Error: directory {} does not exist!", path.display()).red()
                );
            }
            Some(other) if other.is_fatal() => println!("{}", format!("Error: {}", other).red()),
            Some(other) => println!("{}", format!("Unexpected error: {}", other).red()),
            None => eprintln!("{}", format!("Error during run: {:#}", err).red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::PreviewEntry;

    #[test]
    fn preview_marks_directories_and_truncation() {
        let preview = DirectoryPreview {
            entries: vec![
                PreviewEntry {
                    name: "components".to_string(),
                    is_dir: true,
                    children: Some(vec!["A.vue".to_string(), "B.vue".to_string()]),
                    child_count: 9,
                },
                PreviewEntry {
                    name: "locked".to_string(),
                    is_dir: true,
                    children: None,
                    child_count: 0,
                },
                PreviewEntry {
                    name: "main.js".to_string(),
                    is_dir: false,
                    children: Some(Vec::new()),
                    child_count: 0,
                },
            ],
        };

        assert_eq!(
            ConsoleReporter::render_preview(&preview),
            vec![
                "- components (dir)",
                "  └─ A.vue",
                "  └─ B.vue",
                "  └─ ... 7 more",
                "- locked (dir)",
                "  └─ (unreadable)",
                "- main.js",
            ]
        );
    }

    #[test]
    fn empty_preview_says_so() {
        let lines = ConsoleReporter::render_preview(&DirectoryPreview::default());
        assert_eq!(lines, vec!["- (empty)"]);
    }

    #[test]
    fn listing_is_capped() {
        let names: Vec<String> = (0..12).map(|i| format!("C{}.vue", i)).collect();
        let lines = ConsoleReporter::render_listing(&names);
        assert_eq!(lines.len(), LISTED_VUE_FILES + 1);
        assert_eq!(lines.last().unwrap(), "- ... 2 more");
    }

    #[test]
    fn content_preview_counts_characters() {
        let content = "é".repeat(150);
        let preview = ConsoleReporter::render_content_preview(&content);
        assert_eq!(preview.chars().count(), CONTENT_PREVIEW_CHARS + 3);
    }
}
