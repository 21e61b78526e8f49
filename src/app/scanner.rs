use crate::app::models::{DirectoryPreview, FileSet, PreviewEntry};
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// How many children of each subdirectory the preview shows.
const PREVIEW_CHILDREN: usize = 5;

pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Finds every `.js` and `.vue` file below the root.
    pub fn discover(&self) -> Result<FileSet> {
        Ok(FileSet {
            js_files: self.find_files("js")?,
            vue_files: self.find_files("vue")?,
        })
    }

    /// Walks the whole tree depth-first and returns files whose extension
    /// equals `extension`, ignoring case.
    ///
    /// Unreadable entries are logged and skipped.
    pub fn find_files(&self, extension: &str) -> Result<Vec<PathBuf>> {
        let matcher = extension_matcher(extension)?;
        let mut files = Vec::new();

        // Nothing is filtered: hidden files and ignored paths are obfuscated too.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.depth() == 0 || !entry.path().is_file() {
                        continue;
                    }
                    if matcher.is_match(entry.file_name()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => log::warn!("Cannot access entry, skipping: {}", err),
            }
        }

        Ok(files)
    }

    /// Lists the root's direct entries and a few children of each subdirectory.
    pub fn preview(&self) -> Result<DirectoryPreview> {
        let mut entries = Vec::new();

        for path in sorted_children(&self.root)
            .with_context(|| format!("Failed to list {}", self.root.display()))?
        {
            let name = file_name_of(&path);
            let is_dir = path.is_dir();

            let (children, child_count) = if is_dir {
                match sorted_children(&path) {
                    Ok(all) => {
                        let count = all.len();
                        let shown = all
                            .iter()
                            .take(PREVIEW_CHILDREN)
                            .map(|p| file_name_of(p))
                            .collect();
                        (Some(shown), count)
                    }
                    Err(err) => {
                        log::debug!("Cannot list {}: {}", path.display(), err);
                        (None, 0)
                    }
                }
            } else {
                (Some(Vec::new()), 0)
            };

            entries.push(PreviewEntry {
                name,
                is_dir,
                children,
                child_count,
            });
        }

        Ok(DirectoryPreview { entries })
    }
}

fn extension_matcher(extension: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(&format!("*.{}", extension))
        .case_insensitive(true)
        .build()
        .context(format!("Invalid extension pattern: {}", extension))?;
    Ok(glob.compile_matcher())
}

fn sorted_children(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(err) => {
                log::warn!("Cannot read entry in {}: {}", dir.display(), err);
                None
            }
        })
        .collect::<Vec<_>>();
    children.sort();
    Ok(children)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
