use clap::{Parser, Subcommand};

use crate::constants::DEFAULT_TARGET;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the host test suites
    Test,
    /// Check the libraries against an embedded target
    Check {
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,

        /// Also check with defmt logging enabled
        #[arg(long)]
        defmt: bool,
    },
    /// Build the API documentation
    Doc,
}
