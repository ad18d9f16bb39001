// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Pick the log level and start logging to stderr
// 3. Validate the rest of the flags (fatal errors exit with code 1)
// 4. Run the path brute-force, one request at a time
// 5. Print the wordlists that were used
//
// Exit codes: 0 = ran (whatever the probes found), 1 = bad flags,
// 2 = unexpected internal error.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - error types
mod logging; // src/logging.rs - log level and console output
mod probe; // src/probe/ - path brute-forcing
mod wordlist; // src/wordlist/ - wordlist loading

use anyhow::{Context, Result};
use cli::{Cli, RunConfig};
use logging::{fatal, LogConfig};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info, warn};

// Requests go out one after another, so a single thread is all we need.
// It also keeps the logging guard from install() valid for the whole run.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run(std::env::args_os()).await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns the process exit code
async fn run<I>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = Cli::parse_args(args);

    // An unknown level can't pick a level for its own error message,
    // so that one is reported with the default configuration
    let log = match cli.log_config() {
        Ok(log) => log,
        Err(e) => {
            let _guard = LogConfig::default().install();
            fatal!("{}", e);
            return Ok(1);
        }
    };
    let _guard = log.install();

    let config = match cli.validate() {
        Ok(config) => config,
        Err(e) => {
            fatal!("{}", e);
            return Ok(1);
        }
    };
    debug!(level = %config.log.level, "Logging configured");

    if config.vhost_wordlist.is_some() {
        info!(target_url = %config.target_url, "Testing the host for any vhost");
        warn!("Virtual host probing is not implemented, skipping the vhost wordlist");
    }

    if let Some(wordlist) = &config.path_wordlist {
        info!(target_url = %config.target_url, "Testing the path for the target url");

        let client = probe::build_client().context("failed to create HTTP client")?;
        // check_paths logs its own failures; a bad target URL doesn't change the exit code
        if let Err(e) = probe::check_paths(client, &config.target_url, wordlist).await {
            debug!(error = %e, "Path probing aborted");
        }
    }

    print_wordlists(&config);
    Ok(0)
}

fn print_wordlists(config: &RunConfig) {
    println!("{}", wordlist_line("Path", &config.path_wordlist));
    println!("{}", wordlist_line("VHOST", &config.vhost_wordlist));
}

// "Path Wordlist:  paths.txt" - two spaces, and a trailing one when unset
fn wordlist_line(kind: &str, path: &Option<PathBuf>) -> String {
    format!("{} Wordlist:  {}", kind, display_path(path))
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
