mod cargo;
mod cli;
mod constants;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Test => {
            println!("Running host tests...");
            cargo::test()?;
            println!("Tests passed!");
        }
        Commands::Check { target, defmt } => {
            cargo::check(target, *defmt)?;
            println!("Check complete!");
        }
        Commands::Doc => {
            println!("Building docs...");
            cargo::doc()?;
        }
    }

    Ok(())
}
