// src/probe/prober.rs
// =============================================================================
// The path brute-forcing loop.
//
// PathProber::probe() turns a list of candidates into a Stream of results.
// The stream is lazy and sequential: a request is only sent when the stream
// is polled, and the next one waits for the previous response. That keeps
// exactly one request in flight and results in wordlist order.
//
// check_paths() is what main() calls. It parses the target URL, loads the
// wordlist, drains the stream and logs every result:
//   info  -> Found: "admin"
//   debug -> Not Found: "secret"
//   error -> anything that went wrong for one candidate
//
// Failure handling:
// - bad target URL      -> Err, nothing is sent
// - unreadable wordlist -> logged, treated as an empty run (Ok)
// - per-candidate error -> logged, loop continues, never retried
// =============================================================================

use super::http::{probe_candidate, Outcome, ProbeResult};
use crate::error::{ProbeError, UrlRejection};
use crate::wordlist::load_wordlist;
use futures::stream::{self, Stream, StreamExt};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, error, info};
use url::Url;

/// Tally of outcomes for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSummary {
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl ProbeSummary {
    fn record(&mut self, result: &ProbeResult) {
        match result.outcome {
            Outcome::Found { .. } => self.found += 1,
            Outcome::NotFound { .. } => self.not_found += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.found + self.not_found + self.failed
    }
}

/// Probes candidate paths under one target URL
pub struct PathProber {
    client: Client,
    base: Url,
}

impl PathProber {
    /// Parses `target_url`. Fails with `InvalidUrl` if it isn't absolute or
    /// contains a control character.
    pub fn new(client: Client, target_url: &str) -> Result<Self, ProbeError> {
        let base = parse_target(target_url).map_err(|source| ProbeError::InvalidUrl {
            url: target_url.to_string(),
            source,
        })?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Lazily probes every candidate, in order, one at a time.
    ///
    /// `then` polls each future to completion before pulling the next
    /// candidate, so nothing runs concurrently.
    pub fn probe(&self, candidates: Vec<String>) -> impl Stream<Item = ProbeResult> + '_ {
        stream::iter(candidates)
            .then(move |candidate| probe_candidate(&self.client, &self.base, candidate))
    }
}

// Url::parse silently strips tabs and newlines and percent-encodes the other
// control characters, so "http://exa\tmple.com" would become example.com.
// Reject them up front instead.
fn parse_target(target_url: &str) -> Result<Url, UrlRejection> {
    if target_url.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(UrlRejection::ControlCharacter);
    }
    Ok(Url::parse(target_url)?)
}

/// Brute-forces the paths listed in `wordlist_path` against `target_url`.
///
/// Outcomes are reported through the log. The summary is returned for
/// callers that want totals.
pub async fn check_paths(
    client: Client,
    target_url: &str,
    wordlist_path: &Path,
) -> Result<ProbeSummary, ProbeError> {
    let prober = PathProber::new(client, target_url).map_err(|e| {
        error!(target_url, error = %e, "Not able to Parse url");
        e
    })?;

    let candidates = match load_wordlist(wordlist_path) {
        Ok(candidates) => candidates,
        Err(e) => {
            // The loader already said why; nothing to probe
            error!(error = %e, "Skipping path probing");
            return Ok(ProbeSummary::default());
        }
    };

    debug!(base = %prober.base(), candidates = candidates.len(), "Probing paths");

    let mut summary = ProbeSummary::default();
    let results = prober.probe(candidates);
    futures::pin_mut!(results);

    while let Some(result) = results.next().await {
        report(&result);
        summary.record(&result);
    }

    debug!(
        total = summary.total(),
        found = summary.found,
        not_found = summary.not_found,
        failed = summary.failed,
        "Path probing finished"
    );
    Ok(summary)
}

/// Writes the log line for one result
fn report(result: &ProbeResult) {
    match &result.outcome {
        Outcome::Found { url, status } => {
            info!(url = %url, status = status.as_u16(), "Found: {:?}", result.path);
        }
        Outcome::NotFound { url, status } => {
            debug!(url = %url, status = status.as_u16(), "Not Found: {:?}", result.path);
        }
        Outcome::Failed(ProbeError::UrlJoin { base, candidate }) => {
            error!("Failed to join {:?} with {:?}", base, candidate);
        }
        Outcome::Failed(ProbeError::RequestBuild { url, source }) => {
            error!(url = %url, error = %source, "Failed to create request");
        }
        Outcome::Failed(ProbeError::RequestSend { url, source }) => {
            error!("Failed to send request to {:?} with error: {}", url, source);
        }
        Outcome::Failed(other) => {
            error!(path = ?result.path, error = %other, "Probe failed");
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Stream?
//    - The async version of an Iterator
//    - Instead of next() you call next().await
//    - Nothing happens until someone asks for the next item
//
// 2. Why `then` and not `buffer_unordered`?
//    - then() runs one future at a time, in order
//    - buffer_unordered(N) would run N at once and reorder the results
//    - We want one request in flight and logs in wordlist order
//
// 3. What does pin_mut! do?
//    - Some streams hold references into themselves while running
//    - They must not move in memory once polled, so we "pin" them
//    - pin_mut! pins a local variable on the stack
//
// 4. What does '_ in `impl Stream + '_` mean?
//    - The stream borrows from `self` (the client and base URL)
//    - '_ says: it can't outlive the PathProber it came from
// -----------------------------------------------------------------------------
