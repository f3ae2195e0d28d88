use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::{self, OnFailure};

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let start = Instant::now();
    let mut passed: usize = 0;

    if !integration_only {
        // platform's `mocks` module is compiled for its own unit tests.
        if let Some(out) = cargo::step("Unit tests", &["test", "--lib", "--workspace"], OnFailure::Abort)? {
            passed = passed.saturating_add(cargo::passed_count(&String::from_utf8_lossy(&out.stdout)));
        }
    }

    if !unit_only {
        if let Some(out) = cargo::step(
            "Bring-up integration + property tests",
            &["test", "-p", "firmware", "-p", "platform", "--tests"],
            OnFailure::Abort,
        )? {
            passed = passed.saturating_add(cargo::passed_count(&String::from_utf8_lossy(&out.stdout)));
        }
        cargo::step("Doc tests", &["test", "--doc", "--workspace"], OnFailure::Warn)?;
    }

    println!("{}", format!("  {passed} tests passed").green());
    cargo::finished("All tests", start);
    Ok(())
}
