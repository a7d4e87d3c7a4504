use employee_tracker::config::{Config, LoggingConfig};
use employee_tracker::core::db::Database;
use employee_tracker::core::Result;
use employee_tracker::prompt::TerminalPrompter;
use employee_tracker::workflow::Workflow;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so they never interleave with the menu and tables.
    init_tracing(&config.logging);

    info!("Starting employee-tracker...");

    match run(config) {
        Ok(()) => {
            info!("Exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Unhandled error");
            eprintln!("ERROR {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: Config) -> Result<()> {
    let db = Database::open(&config.database)?;
    println!("Connection success to {} database.", db.name());

    let mut workflow = Workflow::new(db, TerminalPrompter::new(), io::stdout())
        .with_banner(config.ui.show_banner);
    workflow.run()
}
