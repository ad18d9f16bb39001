// src/probe/http.rs
// =============================================================================
// Sends one GET request per candidate and classifies the answer.
//
// Only "200 OK" counts as found.
// Redirects, 403s, 500s and everything else are "not found". The response
// body is never read.
//
// Any failure along the way (joining the URL, building the request, sending
// it) becomes an Outcome::Failed instead of an Err, so the caller can log it
// and move on to the next candidate.
//
// Rust concepts:
// - Enums with data: each Outcome variant carries what's relevant to it
// - async fn: the request is awaited before the next one is built
// - map_err: wraps reqwest errors into our own error type
// =============================================================================

use super::join::join_path;
use crate::error::ProbeError;
use reqwest::{Client, StatusCode};
use url::Url;

/// What happened when a candidate was probed
#[derive(Debug)]
pub enum Outcome {
    /// Server answered 200 OK
    Found { url: Url, status: StatusCode },
    /// Server answered with any other status
    NotFound { url: Url, status: StatusCode },
    /// The request never produced a response
    Failed(ProbeError),
}

/// A candidate from the wordlist paired with its outcome
#[derive(Debug)]
pub struct ProbeResult {
    /// The wordlist line, exactly as read
    pub path: String,
    pub outcome: Outcome,
}

/// Builds the HTTP client shared by every probe.
///
/// Stock reqwest settings: default timeouts, redirect policy and
/// certificate verification.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().build()
}

/// Maps a status code to Found / NotFound
pub fn classify(url: Url, status: StatusCode) -> Outcome {
    if status == StatusCode::OK {
        Outcome::Found { url, status }
    } else {
        Outcome::NotFound { url, status }
    }
}

/// Probes a single candidate path under `base`
pub async fn probe_candidate(client: &Client, base: &Url, candidate: String) -> ProbeResult {
    let outcome = match send_probe(client, base, &candidate).await {
        Ok((url, status)) => classify(url, status),
        Err(e) => Outcome::Failed(e),
    };

    ProbeResult {
        path: candidate,
        outcome,
    }
}

async fn send_probe(
    client: &Client,
    base: &Url,
    candidate: &str,
) -> Result<(Url, StatusCode), ProbeError> {
    let url = join_path(base, candidate)?;

    let request = client
        .get(url.clone())
        .build()
        .map_err(|source| ProbeError::RequestBuild {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .execute(request)
        .await
        .map_err(|source| ProbeError::RequestSend {
            url: url.to_string(),
            source,
        })?;

    Ok((url, response.status()))
}
