// src/wordlist/mod.rs
// =============================================================================
// This module reads wordlists from disk.
//
// A wordlist is a plain text file with one candidate per line, e.g.:
//
//     admin
//     login
//     .git/HEAD
//
// Lines are kept exactly as written: blank lines and duplicates included.
// Each line becomes one probe.
// =============================================================================

mod loader;

// Re-export so callers can write `wordlist::load_wordlist()`
pub use loader::load_wordlist;
