//! cli subcommands for alphaloan.

mod serve;

pub use serve::ServeCommand;

use clap::{Parser, Subcommand};

/// alphaloan - vehicle-loan origination service
#[derive(Parser, Debug)]
#[command(name = "alphaloan")]
#[command(about = "Vehicle-loan origination service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// run the api server
    Serve(ServeCommand),
}
