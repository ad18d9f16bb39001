// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Flags:
//   -log <LEVEL>      PANIC, FATAL, ERROR, WARN, INFO, DEBUG, TRACE (default INFO)
//   -url <URL>        target base URL (required)
//   -wl-path <FILE>   wordlist of paths to brute-force
//   -wl-vhost <FILE>  wordlist of virtual hosts (accepted, not probed yet)
//
// clap only understands `--long` flags, but people type `-url` for this kind
// of tool. normalize_args() rewrites the single-dash spelling of our own
// flags to the double-dash one before clap sees them.
//
// Parsing and validation are separate steps. clap reports usage
// errors (unknown flag, missing value), validate() reports the rules clap
// can't express (empty -url, no wordlist at all, unknown log level). Every
// validation failure is fatal with exit code 1.
// =============================================================================

use crate::error::ConfigError;
use crate::logging::{LogConfig, LogLevel};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Flags that may be written with a single dash
const LONG_FLAGS: [&str; 5] = ["log", "url", "wl-path", "wl-vhost", "help"];

#[derive(Parser, Debug)]
#[command(
    name = "web-prober",
    version,
    about = "Brute-force URL paths on a web server from a wordlist",
    long_about = "web-prober reads a wordlist and sends one GET request per line to the target URL. \
                  Paths answering 200 OK are reported as found."
)]
pub struct Cli {
    /// Log levels: PANIC, FATAL, ERROR, WARN, INFO, DEBUG, TRACE
    #[arg(long, value_name = "LEVEL", default_value = "INFO")]
    pub log: String,

    /// Target Url
    #[arg(long)]
    pub url: Option<String>,

    /// Wordlist to be used to query paths
    #[arg(long = "wl-path", value_name = "FILE")]
    pub wl_path: Option<String>,

    /// Wordlist to be used to query VHOST
    #[arg(long = "wl-vhost", value_name = "FILE")]
    pub wl_vhost: Option<String>,
}

/// Everything a run needs, after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub log: LogConfig,
    pub target_url: String,
    pub path_wordlist: Option<PathBuf>,
    pub vhost_wordlist: Option<PathBuf>,
}

impl Cli {
    /// Parses the given arguments (program name first), accepting `-url`
    /// as well as `--url`. Exits on usage errors, like `Cli::parse()`.
    pub fn parse_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Cli::parse_from(normalize_args(args))
    }

    /// Just the logger settings, so logging can start before the rest of
    /// the flags are checked
    pub fn log_config(&self) -> Result<LogConfig, ConfigError> {
        let level: LogLevel = self.log.parse()?;
        Ok(LogConfig::new(level))
    }

    /// Checks the flags and builds the run configuration.
    ///
    /// Order matters: log level, then -url, then the wordlists.
    pub fn validate(&self) -> Result<RunConfig, ConfigError> {
        let log = self.log_config()?;

        let target_url = non_empty(&self.url).ok_or(ConfigError::MissingUrl)?;
        let path_wordlist = non_empty(&self.wl_path).map(PathBuf::from);
        let vhost_wordlist = non_empty(&self.wl_vhost).map(PathBuf::from);

        if path_wordlist.is_none() && vhost_wordlist.is_none() {
            return Err(ConfigError::MissingWordlist);
        }

        Ok(RunConfig {
            log,
            target_url: target_url.to_string(),
            path_wordlist,
            vhost_wordlist,
        })
    }
}

// An empty string counts as "not given"
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Rewrites `-url x` / `-url=x` into `--url x` / `--url=x` for our flags.
///
/// The first argument (program name) and everything after `--` are left
/// alone, as are short flags like `-h` and anything that isn't UTF-8.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        normalized.push(normalize_flag(arg));
    }

    normalized
}

fn normalize_flag(arg: OsString) -> OsString {
    let rewritten = arg.to_str().and_then(|text| {
        let rest = text.strip_prefix('-')?;
        if rest.starts_with('-') {
            return None;
        }
        let name = rest.split('=').next().unwrap_or(rest);
        LONG_FLAGS.contains(&name).then(|| format!("-{}", text))
    });

    match rewritten {
        Some(text) => OsString::from(text),
        None => arg,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<String> for -url?
//    - None means the flag wasn't given at all
//    - Some("") means it was given empty (`-url ""`)
//    - Both are treated as missing by validate()
//
// 2. What is OsString?
//    - Command-line arguments aren't guaranteed to be valid UTF-8
//    - OsString holds them as the OS gave them
//    - to_str() returns None when conversion isn't possible
//
// 3. What does bool::then do?
//    - `cond.then(|| value)` is Some(value) if cond is true, else None
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("web-prober")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    fn parse(list: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args(list))).unwrap()
    }

    #[test]
    fn test_single_dash_flags() {
        let cli = parse(&["-url", "http://example.com", "-wl-path", "paths.txt", "-log", "debug"]);
        assert_eq!(cli.url.as_deref(), Some("http://example.com"));
        assert_eq!(cli.wl_path.as_deref(), Some("paths.txt"));
        assert_eq!(cli.log, "debug");
    }

    #[test]
    fn test_double_dash_and_equals_forms() {
        let cli = parse(&["--url=http://example.com", "-wl-vhost=hosts.txt"]);
        assert_eq!(cli.url.as_deref(), Some("http://example.com"));
        assert_eq!(cli.wl_vhost.as_deref(), Some("hosts.txt"));
        assert_eq!(cli.log, "INFO");
    }

    #[test]
    fn test_normalize_leaves_other_args_alone() {
        let normalized = normalize_args(args(&["-h", "-wordlist", "--", "-url"]));
        assert_eq!(
            normalized,
            args(&["-h", "-wordlist", "--", "-url"])
        );
    }

    #[test]
    fn test_validate_success() {
        let config = parse(&["-url", "http://example.com", "-wl-path", "paths.txt"])
            .validate()
            .unwrap();

        assert_eq!(config.target_url, "http://example.com");
        assert_eq!(config.path_wordlist, Some(PathBuf::from("paths.txt")));
        assert_eq!(config.vhost_wordlist, None);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn test_missing_url() {
        let err = parse(&["-wl-path", "paths.txt"]).validate().unwrap_err();
        assert_eq!(err, ConfigError::MissingUrl);

        let err = parse(&["-url", "", "-wl-path", "paths.txt"]).validate().unwrap_err();
        assert_eq!(err, ConfigError::MissingUrl);
    }

    #[test]
    fn test_missing_wordlists() {
        let err = parse(&["-url", "http://example.com"]).validate().unwrap_err();
        assert_eq!(err, ConfigError::MissingWordlist);

        let err = parse(&["-url", "http://example.com", "-wl-path", "", "-wl-vhost", ""])
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingWordlist);
    }

    #[test]
    fn test_invalid_log_level_is_checked_first() {
        let err = parse(&["-log", "loud"]).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_string()));
    }
}
