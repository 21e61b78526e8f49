use crate::app::cli::Cli;
use crate::app::error::ShroudError;
use crate::app::models::RunConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Turn a relative argument into an absolute path without touching the filesystem.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            log::debug!("Could not read current directory ({}), keeping {:?}", e, path);
            path.to_path_buf()
        }
    }
}

/// Resolves the CLI into a `RunConfig`, checking that the folder exists.
pub fn resolve_config(cli: Cli) -> Result<RunConfig, ShroudError> {
    let directory = cli
        .directory
        .clone()
        .ok_or(ShroudError::MissingDirectoryArgument)?;

    let absolute = absolutize(&directory);
    if !absolute.exists() {
        return Err(ShroudError::DirectoryNotFound(absolute));
    }
    if !absolute.is_dir() {
        return Err(ShroudError::NotADirectory(absolute));
    }

    // Canonical form drops `..` segments so relative display paths stay tidy.
    let target_directory = fs::canonicalize(&absolute).unwrap_or(absolute);

    Ok(RunConfig {
        target_directory,
        backup_requested: cli.backup_requested(),
    })
}
