pub mod apply;
pub mod config_cmd;

use clap::{Args, Parser, Subcommand, ValueEnum};
use edgeconn_core::{AuxPair, EdgeDescriptor};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "edgeconn")]
#[command(version, about = "Edge-to-edge connections for graph documents")]
pub struct Cli {
    /// Path to edgeconn.toml
    #[arg(
        long,
        global = true,
        env = "EDGECONN_CONFIG",
        default_value = "edgeconn.toml"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a graph document, resolve its edges and apply its operations
    Apply(ApplyArgs),
    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Graph document (JSON)
    pub document: PathBuf,

    /// Override the batch pass limit from the config file
    #[arg(long, env = "EDGECONN_MAX_PASSES")]
    pub max_passes: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Fail when any edge of the batch could not be added
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Check the configuration file
    Validate,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn print_aux_table(pairs: &[AuxPair]) {
    if pairs.is_empty() {
        println!("(no aux nodes)");
        return;
    }
    println!(
        "{:<36}  {:<36}  {:<22}  {:<12}",
        "AUX NODE", "EDGE", "POSITION", "COLOR"
    );
    println!("{}", "─".repeat(112));
    for p in pairs {
        println!(
            "{:<36}  {:<36}  {:<22}  {:<12}",
            truncate(&p.aux_node, 36),
            truncate(&p.edge, 36),
            p.position.to_string(),
            p.color
        );
    }
}

pub fn print_unresolved(descriptors: &[EdgeDescriptor]) {
    if descriptors.is_empty() {
        return;
    }
    println!();
    println!("Not added ({}):", descriptors.len());
    for d in descriptors {
        println!("  {}", d.label());
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max - 1).collect::<String>())
    }
}
