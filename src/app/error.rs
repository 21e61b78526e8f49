use std::path::PathBuf;
use thiserror::Error;

use crate::app::obfuscator::ObfuscateError;

#[derive(Debug, Error)]
pub enum ShroudError {
    #[error("no folder to obfuscate was given")]
    MissingDirectoryArgument,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("directory {0} does not exist")]
    DirectoryNotFound(PathBuf),
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to back up {path}: {message}")]
    Backup { path: PathBuf, message: String },
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
    #[error("no <script> block found in {0}")]
    NoScriptBlock(PathBuf),
    #[error("failed to obfuscate {path}: {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: ObfuscateError,
    },
}

impl ShroudError {
    /// Argument and directory problems end the run; everything else is per file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShroudError::MissingDirectoryArgument
                | ShroudError::InvalidArguments(_)
                | ShroudError::DirectoryNotFound(_)
                | ShroudError::NotADirectory(_)
                | ShroudError::Backup { .. }
        )
    }
}
