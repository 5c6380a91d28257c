use std::process::ExitCode;

use clap::Parser;
use stockroom::commands::{self, Cli, StdinPrompt};
use stockroom::config::ENV_LOG;
use stockroom::error::ErrorCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("[E_CONFIG] .env: {e}");
            return ExitCode::FAILURE;
        }
    }

    let cli = Cli::parse();
    let level = match cli.log_level(std::env::var(ENV_LOG).ok().as_deref()) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("[{}] {e}", e.error_code());
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    match commands::run(cli, Box::new(StdinPrompt)).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(code = e.error_code(), retryable = e.retryable(), "command failed");
            eprintln!("[{}] {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}
