//! Faultline CLI entry point.

use clap::Parser;
use faultline::cli::{self, Cli, Commands, EXIT_ERROR};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Analyze(args) => match cli::run_analyze(&args).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Commands::Serve(args) => match cli::run_serve(&args).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
    };

    std::process::exit(exit_code);
}
