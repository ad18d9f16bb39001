// src/logging.rs
// =============================================================================
// This module turns the `-log` flag into a tracing subscriber.
//
// There is no global logger. main() builds a LogConfig once at startup and
// installs it with `LogConfig::install()`, which returns a guard. While the
// guard is alive every `info!`/`debug!`/`error!` on this thread goes to the
// console on stderr. The runtime is single-threaded, so that covers the
// whole run.
//
// Levels follow the flag's vocabulary (PANIC ... TRACE). tracing has no
// PANIC or FATAL level, so:
// - FATAL keeps only messages sent through the `fatal!` macro
// - PANIC silences everything
//
// Rust concepts:
// - FromStr: lets us write "debug".parse::<LogLevel>()
// - macro_rules!: a tiny macro so fatal messages share one target
// - RAII guards: the subscriber is uninstalled when the guard is dropped
// =============================================================================

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Target used by the `fatal!` macro. The filter lets it through at every
/// level except PANIC.
pub const FATAL_TARGET: &str = "fatal";

/// Logs a message that is about to stop the program.
///
/// Emitted at error level under the `fatal` target so it still shows when
/// the user asked for `-log FATAL`.
macro_rules! fatal {
    ($($arg:tt)*) => {
        tracing::error!(target: $crate::logging::FATAL_TARGET, $($arg)*)
    };
}
pub(crate) use fatal;

/// Log verbosity, from quietest (Panic) to loudest (Trace)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Panic,
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level applied to this crate's own events, as an EnvFilter level name
    fn crate_level(self) -> &'static str {
        match self {
            LogLevel::Panic | LogLevel::Fatal => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Builds the EnvFilter directives for this level.
    ///
    /// Everything outside this crate (reqwest, hyper, ...) is switched off so
    /// TRACE shows our probes, not connection pool internals.
    fn directives(self) -> String {
        let fatal_level = if self == LogLevel::Panic { "off" } else { "error" };
        format!(
            "off,{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            self.crate_level(),
            FATAL_TARGET,
            fatal_level
        )
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PANIC" => Ok(LogLevel::Panic),
            "FATAL" => Ok(LogLevel::Fatal),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Panic => "PANIC",
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        };
        f.write_str(name)
    }
}

/// Logger configuration built once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub level: LogLevel,
}

impl LogConfig {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Installs a stderr console subscriber as the default for this thread.
    ///
    /// Logging stays active until the returned guard is dropped.
    pub fn install(&self) -> DefaultGuard {
        self.install_with_writer(std::io::stderr)
    }

    /// Same as `install`, but writes somewhere other than stderr.
    pub fn install_with_writer<W>(&self, writer: W) -> DefaultGuard
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(self.level.directives()))
            .with_writer(writer)
            .with_target(false)
            .finish();

        tracing::subscriber::set_default(subscriber)
    }
}

/// In-memory log sink for tests that assert on what gets logged
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LogCapture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl LogCapture {
    /// Installs a subscriber at `level` that writes here instead of stderr
    pub(crate) fn install(level: LogLevel) -> (LogCapture, DefaultGuard) {
        let capture = LogCapture::default();
        let writer = capture.clone();
        let guard = LogConfig::new(level).install_with_writer(move || writer.clone());
        (capture, guard)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_at(level: LogLevel) -> (LogCapture, DefaultGuard) {
        LogCapture::install(level)
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("Warn".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("TRACE".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert_eq!("panic".parse::<LogLevel>(), Ok(LogLevel::Panic));
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        assert_eq!(
            "verbose".parse::<LogLevel>(),
            Err(ConfigError::InvalidLogLevel("verbose".to_string()))
        );
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(LogConfig::default().level, LogLevel::Info);
    }

    #[test]
    fn test_info_hides_debug() {
        let (capture, _guard) = capture_at(LogLevel::Info);
        tracing::info!("Found: \"admin\"");
        tracing::debug!("Not Found: \"nope\"");

        let out = capture.contents();
        assert!(out.contains("Found: \"admin\""));
        assert!(!out.contains("nope"));
    }

    #[test]
    fn test_fatal_level_keeps_only_fatal_messages() {
        let (capture, _guard) = capture_at(LogLevel::Fatal);
        tracing::error!("Failed to create request");
        fatal!("-url is a required argument");

        let out = capture.contents();
        assert!(out.contains("-url is a required argument"));
        assert!(!out.contains("Failed to create request"));
    }

    #[test]
    fn test_panic_level_is_silent() {
        let (capture, _guard) = capture_at(LogLevel::Panic);
        tracing::error!("boom");
        fatal!("also boom");

        assert!(capture.contents().is_empty());
    }
}
