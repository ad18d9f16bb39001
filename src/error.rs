// src/error.rs
// =============================================================================
// Error types used across the prober.
//
// ProbeError covers everything that can go wrong while loading a wordlist
// or probing a single candidate. Most of these are recovered in the probe
// loop (logged, then the next candidate is tried). Only FileNotFound/Io
// from the loader and InvalidUrl from the base URL ever leave the loop.
//
// ConfigError covers bad command-line input. Those are always fatal.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[source]: chains the underlying error so `{:#}` and anyhow can show it
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a wordlist or probing a candidate path.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to open file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not able to parse url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: UrlRejection,
    },

    #[error("failed to join {base:?} with {candidate:?}")]
    UrlJoin { base: String, candidate: String },

    #[error("failed to create request for {url:?}")]
    RequestBuild {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to send request to {url:?}")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Why a target URL was turned down
#[derive(Debug, Error)]
pub enum UrlRejection {
    /// ASCII control characters (0x00-0x1f, 0x7f) anywhere in the input.
    /// The URL parser would otherwise drop or percent-encode them.
    #[error("invalid control character in URL")]
    ControlCharacter,

    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

/// Errors in the command-line configuration. All of them stop the program.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not a valid log level")]
    InvalidLogLevel(String),

    #[error("-url is a required argument")]
    MissingUrl,

    #[error("-wl-path or -wl-vhost is a required argument")]
    MissingWordlist,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::InvalidLogLevel("LOUD".to_string()).to_string(),
            "LOUD is not a valid log level"
        );
        assert_eq!(ConfigError::MissingUrl.to_string(), "-url is a required argument");
    }

    #[test]
    fn test_control_character_rejection_is_the_source() {
        use std::error::Error as _;

        let err = ProbeError::InvalidUrl {
            url: "http://example.com/\u{1}".to_string(),
            source: UrlRejection::ControlCharacter,
        };
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("invalid control character in URL".to_string())
        );
    }

    #[test]
    fn test_join_error_message() {
        let err = ProbeError::UrlJoin {
            base: "mailto:me@example.com".to_string(),
            candidate: "admin".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to join \"mailto:me@example.com\" with \"admin\""
        );
    }
}
