//! Serve Ingress Server Entry Point

use clap::Parser;
use serve_ingress::cli::{Cli, Commands};
use serve_ingress::config::ingress_config_from_env;
use serve_ingress::error::IngressResult;
use serve_ingress::{bootstrap, logging, server};
use serve_ingress_common::config::IngressConfig;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let mut config = ingress_config_from_env();
    match cli.command {
        Some(Commands::Serve(args)) => args.apply(&mut config),
        None => {
            // No subcommand - serve with environment configuration
        }
    }

    if let Err(e) = run(config).await {
        error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: IngressConfig) -> IngressResult<()> {
    let state = bootstrap::initialize(&config).await?;
    server::run(state, &config.bind_addr()).await
}
