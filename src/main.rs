use clap::Parser;
use dotenv::dotenv;
use std::error::Error;
use tracing::info;

use github_overflow_scanner_lib::{render_report, Args, GitHubScanner, ScanConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    // GITHUB_TOKEN from .env can stand in for --token.
    dotenv().ok();
    let args = Args::parse();

    // Thresholds, keywords and pauses are fixed for the whole run
    let config = ScanConfig::default();
    info!(
        "Searching for C/C++ projects with potential buffer overflow vulnerabilities ({})",
        config.repository_filter()
    );

    // Search, probe and collect the flagged repositories
    let scanner = GitHubScanner::new(&args, config)?;
    let entries = scanner.run(args.results as usize).await;

    // Print the report
    print!("{}", render_report(&entries));
    Ok(())
}
