use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Target used to prove the `no_std` crates build without the standard library.
pub const NO_STD_TARGET: &str = "riscv32imac-unknown-none-elf";

/// How a failing step affects the whole task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Print the output and fail the task.
    Abort,
    /// Print a warning and carry on.
    Warn,
}

/// Run `cargo <args>` as one labelled step and report how it went.
///
/// Returns the captured output on success so callers can pull a summary out.
pub fn step(label: &str, args: &[&str], on_failure: OnFailure) -> Result<Option<Output>> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(Some(output));
    }

    match on_failure {
        OnFailure::Abort => {
            eprintln!("{}", format!("  ✗ {label} failed").red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{label} failed");
        }
        OnFailure::Warn => {
            eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            println!();
            Ok(None)
        }
    }
}

/// Print the closing line of a task.
pub fn finished(what: &str, start: Instant) {
    println!(
        "{}",
        format!("✓ {what} completed in {:.2}s", start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();
}

/// Sum the "N passed" counts of every `test result:` line in `output`.
pub fn passed_count(output: &str) -> usize {
    output
        .lines()
        .filter_map(|line| line.split_once("test result:").map(|(_, summary)| summary))
        .filter_map(|summary| {
            summary
                .split(';')
                .find_map(|part| part.trim().strip_suffix(" passed"))
                .and_then(|n| n.rsplit(' ').next())
                .and_then(|n| n.parse::<usize>().ok())
        })
        .fold(0, usize::saturating_add)
}
