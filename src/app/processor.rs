use crate::app::error::ShroudError;
use crate::app::formatter::ConsoleReporter;
use crate::app::models::{FileSet, RunStats};
use crate::app::obfuscator::{self, TransformProfile};
use crate::app::sfc;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads, transforms and overwrites files one at a time.
pub struct Processor<'a> {
    root: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Processes every file, counting successes and failures into `stats`.
    ///
    /// A failing file is reported and left as it was; the batch continues.
    pub fn run(&self, files: &FileSet, stats: &mut RunStats) {
        for path in &files.js_files {
            ConsoleReporter::processing_js(&self.relative(path));
            match self.process_js(path) {
                Ok(()) => stats.record_js(),
                Err(err) => {
                    ConsoleReporter::file_failed(&err);
                    stats.record_error();
                }
            }
        }

        for path in &files.vue_files {
            ConsoleReporter::processing_vue(&self.relative(path));
            match self.process_vue(path) {
                Ok(profile) => {
                    ConsoleReporter::vue_done(&self.relative(path), profile);
                    stats.record_vue();
                }
                Err(err) => {
                    ConsoleReporter::file_failed(&err);
                    if matches!(err, ShroudError::Transform { .. }) {
                        ConsoleReporter::left_unchanged(&self.relative(path));
                    }
                    stats.record_error();
                }
            }
        }
    }

    pub fn process_js(&self, path: &Path) -> Result<(), ShroudError> {
        let code = read(path)?;
        let obfuscated = obfuscator::invoke(&code, TransformProfile::Standard).map_err(|source| {
            ShroudError::Transform {
                path: path.to_path_buf(),
                source,
            }
        })?;
        write(path, &obfuscated)
    }

    /// Obfuscates the first script block and returns the profile that was used.
    pub fn process_vue(&self, path: &Path) -> Result<TransformProfile, ShroudError> {
        let content = read(path)?;

        let Some(block) = sfc::extract_script(&content) else {
            ConsoleReporter::content_preview(&content);
            return Err(ShroudError::NoScriptBlock(path.to_path_buf()));
        };
        ConsoleReporter::script_found(block.length);

        let profile = if sfc::is_complex(block.content) {
            ConsoleReporter::safe_mode();
            TransformProfile::Safe
        } else {
            TransformProfile::Standard
        };

        let obfuscated =
            obfuscator::invoke(block.content, profile).map_err(|source| ShroudError::Transform {
                path: path.to_path_buf(),
                source,
            })?;

        write(path, &sfc::splice(&content, &block, &obfuscated))?;
        Ok(profile)
    }

    fn relative(&self, path: &Path) -> String {
        pathdiff::diff_paths(path, self.root)
            .unwrap_or_else(|| PathBuf::from(path))
            .to_string_lossy()
            .to_string()
    }
}

fn read(path: &Path) -> Result<String, ShroudError> {
    fs::read_to_string(path).map_err(|e| ShroudError::Read(path.to_path_buf(), e))
}

fn write(path: &Path, contents: &str) -> Result<(), ShroudError> {
    fs::write(path, contents).map_err(|e| ShroudError::Write(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn js_file_is_rewritten_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("util.js");
        fs::write(&path, "export function add(left, right) { return left + right; }").unwrap();

        Processor::new(temp_dir.path()).process_js(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("function add("));
        assert!(!written.contains("left"));
    }

    #[test]
    fn broken_js_is_left_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.js");
        fs::write(&path, "function (").unwrap();

        let err = Processor::new(temp_dir.path()).process_js(&path).unwrap_err();
        assert!(matches!(err, ShroudError::Transform { .. }));
        assert!(!err.is_fatal());
        assert_eq!(fs::read_to_string(&path).unwrap(), "function (");
    }

    #[test]
    fn functional_component_uses_safe_profile() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Fancy.vue");
        fs::write(
            &path,
            "<script>\nexport default { functional: true, props: [\"label\"] }\n</script>\n",
        )
        .unwrap();

        let profile = Processor::new(temp_dir.path()).process_vue(&path).unwrap();
        assert_eq!(profile, TransformProfile::Safe);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("functional"));
        assert!(written.contains("label"));
        assert!(!written.contains("=["));
        assert!(!written.contains("[0]"));
        assert!(written.starts_with("<script>\n"));
        assert!(written.ends_with("\n</script>\n"));
    }

    #[test]
    fn vue_without_script_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Static.vue");
        let original = "<template><p>static</p></template>\n";
        fs::write(&path, original).unwrap();

        let err = Processor::new(temp_dir.path()).process_vue(&path).unwrap_err();
        assert!(matches!(err, ShroudError::NoScriptBlock(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn failures_are_counted_and_batch_continues() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.js");
        let bad = temp_dir.path().join("bad.js");
        let page = temp_dir.path().join("Page.vue");
        fs::write(&good, "var a = 1;").unwrap();
        fs::write(&bad, "var = ;").unwrap();
        fs::write(&page, "<script>export default { name: 'Page' }</script>").unwrap();

        let files = FileSet {
            js_files: vec![bad.clone(), good.clone()],
            vue_files: vec![page],
        };
        let mut stats = RunStats::default();
        Processor::new(temp_dir.path()).run(&files, &mut stats);

        assert_eq!(
            stats,
            RunStats {
                js_files_processed: 1,
                vue_files_processed: 1,
                errors: 1,
            }
        );
        assert_eq!(fs::read_to_string(&bad).unwrap(), "var = ;");
    }
}
