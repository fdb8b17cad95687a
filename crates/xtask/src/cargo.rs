use anyhow::{Context, Result};
use std::process::Command;

use crate::constants::LIBRARY_CRATES;

pub fn test() -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    for krate in LIBRARY_CRATES {
        cmd.args(["--package", krate]);
    }
    run(cmd, "host tests")
}

pub fn check(target: &str, defmt: bool) -> Result<()> {
    for krate in LIBRARY_CRATES {
        println!("Checking {} for {}...", krate, target);
        let mut cmd = Command::new("cargo");
        cmd.args(["check", "--package", krate, "--target", target]);
        if defmt {
            cmd.args(["--features", "defmt"]);
        }
        run(cmd, krate)?;
    }
    Ok(())
}

pub fn doc() -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["doc", "--no-deps"]);
    for krate in LIBRARY_CRATES {
        cmd.args(["--package", krate]);
    }
    run(cmd, "documentation")
}

fn run(mut cmd: Command, what: &str) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("Failed to run cargo for {}", what))?;

    if !status.success() {
        anyhow::bail!("Cargo failed for {}", what);
    }

    Ok(())
}
