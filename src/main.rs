use clap::Parser;
use pipeline_check::cli::{Cli, Commands};
use pipeline_check::cli_handlers;
use pipeline_check::config::ServerConfig;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so `check` output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            bind,
            allowed_origin,
        } => cli_handlers::handle_serve(ServerConfig::new(bind, allowed_origin)).await,
        Commands::Check { file } => cli_handlers::handle_check(file.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
