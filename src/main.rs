// src/main.rs

use std::process::ExitCode;

use heftmap::{cli, logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let outcome = match logging::init_logging(args.log_level) {
        Ok(()) => run(args).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("heftmap error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
