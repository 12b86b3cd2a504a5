use std::process::ExitCode;

use haversack_cli::{AppConfig, parse_args};

fn main() -> ExitCode {
    haversack_observability::init();

    let config = AppConfig::from_env();
    let startup = match parse_args(std::env::args().skip(1)) {
        Ok(startup) => startup,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Exiting program.");
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match haversack_cli::run(&config, startup, stdin.lock(), stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "inventory session failed");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
