// src/probe/mod.rs
// =============================================================================
// This module contains the path brute-forcing logic.
//
// Submodules:
// - join: appends a wordlist entry to the target URL's path
// - http: sends one GET request and classifies the status code
// - prober: runs the whole wordlist, one request at a time, and logs results
//
// Virtual host brute-forcing (-wl-vhost) has no implementation yet. It would
// live here as a sibling of `prober` once its request shape is decided.
// =============================================================================

mod http;
mod join;
mod prober;

pub use http::build_client;
pub use prober::check_paths;
