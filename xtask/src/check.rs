use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{self, OnFailure, NO_STD_TARGET};

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking badge builds...".cyan().bold());
    println!();

    let start = Instant::now();

    // The bring-up core must stay no_std: both crates are checked bare-metal.
    cargo::step(
        "Platform crate (no_std)",
        &["check", "-p", "platform", "--target", NO_STD_TARGET, "--no-default-features"],
        OnFailure::Abort,
    )?;
    cargo::step(
        "Firmware hardware build (defmt)",
        &["check", "-p", "firmware", "--target", NO_STD_TARGET, "--features", "hardware"],
        OnFailure::Abort,
    )?;
    cargo::step(
        "Firmware emulator build",
        &["check", "-p", "firmware", "--features", "emulator", "--examples"],
        OnFailure::Abort,
    )?;
    cargo::step(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--features", "firmware/emulator", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    if cargo::step("Formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    cargo::finished("All checks", start);
    Ok(())
}
