use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

/// Run the bring-up emulator example, forwarding `args` to it.
///
/// Exit status is passed through so scripts can assert on aborts.
pub fn run(args: &[String]) -> Result<()> {
    println!();
    println!("{}", "🖥  Starting bring-up emulator...".cyan().bold());
    println!();

    let status = Command::new("cargo")
        .args([
            "run",
            "-p",
            "firmware",
            "--example",
            "bringup_emulator",
            "--features",
            "emulator",
            "--",
        ])
        .args(args)
        .status()
        .context("Failed to start the bring-up emulator")?;

    if !status.success() {
        anyhow::bail!("Emulated bring-up did not complete ({status})");
    }
    Ok(())
}
