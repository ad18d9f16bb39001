// src/probe/join.rs
// =============================================================================
// Joins a wordlist entry onto the target URL's path.
//
// This is path joining, not link resolution. `Url::join("admin")` would
// resolve relative to the last segment and drop it, e.g.
//   https://example.com/api  +  admin  ->  https://example.com/admin
// but brute-forcing wants
//   https://example.com/api  +  admin  ->  https://example.com/api/admin
//
// Rules:
// - base path segments come first, then the candidate's segments
// - empty segments (from "//") and "." are dropped
// - ".." removes the previous segment, but never climbs above "/"
// - a trailing "/" on the candidate is kept ("admin/" probes a directory)
// - query and fragment of the base URL are left untouched
// - `\` stays a character (%5C), not a separator
// - percent-encoded dot segments (%2e%2e) are escaped again (%252e%252e)
//   so they are not collapsed like ".."
// =============================================================================

use crate::error::ProbeError;
use std::borrow::Cow;
use url::Url;

/// Appends `candidate` to the path of `base`.
///
/// Fails only when `base` has no hierarchical path to append to
/// (`mailto:`, `data:` and friends).
pub fn join_path(base: &Url, candidate: &str) -> Result<Url, ProbeError> {
    if base.cannot_be_a_base() {
        return Err(ProbeError::UrlJoin {
            base: base.to_string(),
            candidate: candidate.to_string(),
        });
    }

    let base_segments = base.path().split('/').map(Cow::Borrowed);
    let candidate_segments = candidate.split('/').map(opaque_segment);

    let mut segments: Vec<Cow<'_, str>> = Vec::new();
    for segment in base_segments.chain(candidate_segments) {
        match segment.as_ref() {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    let mut path = format!("/{}", segments.join("/"));
    if candidate.ends_with('/') && !path.ends_with('/') {
        path.push('/');
    }

    let mut joined = base.clone();
    joined.set_path(&path);
    Ok(joined)
}

// set_path() parses special-scheme paths: it reads `\` as a separator and
// %2e as a dot. Escape both so a wordlist segment reaches the server intact.
fn opaque_segment(segment: &str) -> Cow<'_, str> {
    let encoded_dots = matches!(
        segment.to_ascii_lowercase().as_str(),
        "%2e" | "%2e%2e" | ".%2e" | "%2e."
    );
    if !encoded_dots && !segment.contains('\\') {
        return Cow::Borrowed(segment);
    }

    let mut escaped = if encoded_dots {
        segment.replace('%', "%25")
    } else {
        segment.to_string()
    };
    escaped = escaped.replace('\\', "%5C");
    Cow::Owned(escaped)
}
