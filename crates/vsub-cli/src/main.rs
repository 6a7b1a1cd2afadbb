use vsub_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    let file_logging = logging::default_log_path().and_then(|path| logging::init_logging(&path));
    if file_logging.is_err() {
        logging::init_logging_stderr();
    }

    let result = Cli::run_from_args();
    if let Err(err) = &result {
        tracing::error!("{:#}", err);
        eprintln!("vsub error: {:#}", err);
    }
    std::process::exit(cli::exit_status(&result));
}
