//! # GitHub Overflow Scanner
//!
//! Finds recently active C/C++ repositories on GitHub whose code calls
//! functions prone to buffer overflows (`strcpy`, `gets`, `sprintf`, ...).
//!
//! ## Main Components
//!
//! - [`GitHubScanner`]: pages through the repository search and probes each
//!   candidate with one code search per keyword
//! - [`ScanConfig`]: thresholds, keywords and pauses, built once at startup
//! - [`render_report`]: turns flagged repositories into the terminal report
//! - [`Args`]: Command line argument structure
//!
//! ## Example
//!
//! ```no_run
//! use github_overflow_scanner_lib::{render_report, Args, GitHubScanner, ScanConfig};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let args = Args::parse();
//!     let scanner = GitHubScanner::new(&args, ScanConfig::default())?;
//!
//!     let entries = scanner.run(args.results as usize).await;
//!     print!("{}", render_report(&entries));
//!
//!     Ok(())
//! }
//! ```

mod args;
mod config;
mod github_scanner;
mod models;
mod report;

pub use crate::args::Args;
pub use crate::config::{ScanConfig, BUFFER_OVERFLOW_KEYWORDS};
pub use crate::github_scanner::GitHubScanner;
pub use crate::models::{CandidateRepository, Owner, ProbeOutcome, ReportEntry, SearchQuery};
pub use crate::report::render_report;
