use std::path::PathBuf;

/// Represents the resolved invocation: where to work and whether to snapshot first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target_directory: PathBuf,
    pub backup_requested: bool,
}

/// Files discovered under the target directory, in walk order.
#[derive(Debug, Default, Clone)]
pub struct FileSet {
    pub js_files: Vec<PathBuf>,
    pub vue_files: Vec<PathBuf>,
}

impl FileSet {
    pub fn is_empty(&self) -> bool {
        self.js_files.is_empty() && self.vue_files.is_empty()
    }
}

/// The first `<script>` element of a component file, split into its three parts.
///
/// `offset` and `length` describe the whole element inside the markup so the
/// block can be replaced without touching anything around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlockMatch<'a> {
    pub open_tag: &'a str,
    pub content: &'a str,
    pub close_tag: &'a str,
    pub offset: usize,
    pub length: usize,
}

/// Outcome counters for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub js_files_processed: usize,
    pub vue_files_processed: usize,
    pub errors: usize,
}

impl RunStats {
    pub fn record_js(&mut self) {
        self.js_files_processed += 1;
    }

    pub fn record_vue(&mut self) {
        self.vue_files_processed += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }
}

/// One top-level entry of the target directory, as shown before scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub name: String,
    pub is_dir: bool,
    /// First few children of a directory. `None` when the directory could not be read.
    pub children: Option<Vec<String>>,
    /// Total number of children, used to print the "N more" line.
    pub child_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPreview {
    pub entries: Vec<PreviewEntry>,
}

impl DirectoryPreview {
    pub fn has_subdirectories(&self) -> bool {
        self.entries.iter().any(|e| e.is_dir)
    }
}
