use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::app::error::ShroudError;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Obfuscate .js files and Vue component scripts in place"
)]
pub struct Cli {
    /// Folder to obfuscate (searched recursively)
    pub directory: Option<PathBuf>,

    /// Copy the folder to a sibling `<name>_backup_<millis>` directory first
    #[arg(long)]
    pub backup: bool,

    /// Anything after the folder is ignored, except a trailing `--backup`
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl Cli {
    pub fn backup_requested(&self) -> bool {
        self.backup || self.rest.iter().any(|arg| arg == "--backup")
    }
}

/// Parses the process arguments. Help and version output exit right away;
/// any other parse failure becomes a fatal argument error.
pub fn parse_args<I, T>(args: I) -> Result<Cli, ShroudError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => Err(ShroudError::InvalidArguments(err.to_string())),
    }
}
