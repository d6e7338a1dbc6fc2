mod cli;
mod config;
mod document;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing; also picks up `log` records from edgeconn-core
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply(args) => cli::apply::run(args, &cli.config),
        Commands::Config(cmd) => cli::config_cmd::run(cmd, &cli.config),
    }
}
