//! Objects Contract - Main Entry Point
//!
//! Runs every scenario against the public objects API, one after another,
//! and exits non-zero if any of them fails.

use std::process::ExitCode;

use objects_contract::{build_suite, render_summary};
use objects_contract_infrastructure::{SuiteConfig, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();

    let config = SuiteConfig::from_env()?;
    let suite = build_suite(&config)?;

    let report = suite.run().await;
    print!("{}", render_summary(&report));

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
