use crate::app::error::ShroudError;
use crate::app::formatter::ConsoleReporter;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling path `<basename>_backup_<millis>` next to `source`.
///
/// A filesystem root has no sibling to copy into and is refused.
pub fn backup_path_for(source: &Path, timestamp_millis: i64) -> Result<PathBuf, ShroudError> {
    let (Some(parent), Some(base)) = (source.parent(), source.file_name()) else {
        return Err(ShroudError::Backup {
            path: source.to_path_buf(),
            message: "a filesystem root cannot be backed up next to itself".to_string(),
        });
    };
    Ok(parent.join(format!(
        "{}_backup_{}",
        base.to_string_lossy(),
        timestamp_millis
    )))
}

/// Copies the whole `source` tree into a fresh sibling directory and returns it.
///
/// Any filesystem error aborts the copy; a partial backup is left as is.
pub fn backup(source: &Path) -> Result<PathBuf, ShroudError> {
    let target = backup_path_for(source, chrono::Utc::now().timestamp_millis())?;
    ConsoleReporter::backup_started(&target);
    copy_tree(source, &target)?;
    Ok(target)
}

pub fn copy_tree(source: &Path, target: &Path) -> Result<(), ShroudError> {
    let fail = |message: String| ShroudError::Backup {
        path: source.to_path_buf(),
        message,
    };

    fs::create_dir_all(target).map_err(|e| fail(format!("{}: {}", target.display(), e)))?;

    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(true)
        .build();
    for result in walker {
        let entry = result.map_err(|e| fail(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| fail(e.to_string()))?;
        if relative.as_os_str().is_empty() {
            continue;
        }

        let destination = target.join(relative);
        if entry.path().is_dir() {
            fs::create_dir_all(&destination)
                .map_err(|e| fail(format!("{}: {}", destination.display(), e)))?;
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| fail(format!("{}: {}", parent.display(), e)))?;
            }
            fs::copy(entry.path(), &destination)
                .map_err(|e| fail(format!("{}: {}", entry.path().display(), e)))?;
        }
    }

    log::debug!("Copied {} to {}", source.display(), target.display());
    Ok(())
}
