mod app;

use std::process::ExitCode;

use app::formatter::ConsoleReporter;

fn main() -> ExitCode {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::Builder::from_env(env).init();

    // Per-file failures are part of a successful run; only fatal errors get here.
    match app::run() {
        Ok(stats) => {
            log::debug!("Run finished: {:?}", stats);
            ExitCode::SUCCESS
        }
        Err(err) => {
            ConsoleReporter::fatal(&err);
            ExitCode::FAILURE
        }
    }
}
