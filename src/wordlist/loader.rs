// src/wordlist/loader.rs
// =============================================================================
// Loads a newline-delimited wordlist into memory.
//
// Steps:
// 1. Check the file exists (FileNotFound otherwise)
// 2. Open it read-only (Io error if that fails)
// 3. Read it line by line, keeping every line untouched
//
// Bytes that are not valid UTF-8 are replaced rather than rejected, so any
// line-based text file works as a wordlist.
//
// Rust concepts:
// - BufReader: reads the file in chunks instead of one syscall per byte
// - RAII: the File is closed when `reader` goes out of scope, on every path
// - Cow<str>: from_utf8_lossy only allocates when it has to replace bytes
// =============================================================================

use crate::error::ProbeError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{error, trace};

/// Reads `path` into an ordered list of raw lines.
///
/// Blank lines and duplicates are kept. The `\n` (or `\r\n`) terminator is
/// stripped, nothing else is.
pub fn load_wordlist(path: impl AsRef<Path>) -> Result<Vec<String>, ProbeError> {
    let path = path.as_ref();

    if !path.exists() {
        error!(path = %path.display(), "File does not exist");
        return Err(ProbeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| {
        error!(path = %path.display(), "Failed to read text file");
        ProbeError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let reader = BufReader::new(file);
    let mut wordlist = Vec::new();

    // split() yields each line without its '\n'; a final line with no
    // terminator is still yielded, an empty tail after the last '\n' is not
    for line in reader.split(b'\n') {
        let mut line = line.map_err(|source| {
            error!(path = %path.display(), "Failed to read text file");
            ProbeError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if line.last() == Some(&b'\r') {
            line.pop();
        }

        wordlist.push(String::from_utf8_lossy(&line).into_owned());
    }

    trace!(path = %path.display(), entries = wordlist.len(), "Loaded wordlist");
    Ok(wordlist)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `impl AsRef<Path>`?
//    - Accepts &str, String, &Path, PathBuf... anything path-like
//    - Callers don't have to convert first
//
// 2. Why split(b'\n') instead of lines()?
//    - lines() fails on the first line that isn't valid UTF-8
//    - split() hands us raw bytes and we decide what to do with them
//
// 3. Where is the file closed?
//    - Nowhere explicitly! `reader` owns the File
//    - When the function returns (Ok or Err), `reader` is dropped
//    - Dropping a File closes it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn wordlist_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_lines_in_file_order() {
        let file = wordlist_file(b"admin\nlogin\n.git/HEAD\n");
        let words = load_wordlist(file.path()).unwrap();
        assert_eq!(words, vec!["admin", "login", ".git/HEAD"]);
    }

    #[test]
    fn test_keeps_blank_lines_duplicates_and_whitespace() {
        let file = wordlist_file(b"admin\n\n  spaced \nadmin\n");
        let words = load_wordlist(file.path()).unwrap();
        assert_eq!(words, vec!["admin", "", "  spaced ", "admin"]);
    }

    #[test]
    fn test_last_line_without_newline() {
        let file = wordlist_file(b"one\ntwo");
        assert_eq!(load_wordlist(file.path()).unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_crlf_terminators() {
        let file = wordlist_file(b"one\r\ntwo\r\n");
        assert_eq!(load_wordlist(file.path()).unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_file() {
        let file = wordlist_file(b"");
        assert!(load_wordlist(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let file = wordlist_file(b"caf\xe9\nok\n");
        let words = load_wordlist(file.path()).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], "caf\u{FFFD}");
        assert_eq!(words[1], "ok");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let result = load_wordlist(&missing);
        assert!(matches!(result, Err(ProbeError::FileNotFound { path }) if path == missing));
    }

    #[test]
    fn test_directory_is_not_a_wordlist() {
        // Opening a directory succeeds on unix, reading it does not
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_wordlist(dir.path()),
            Err(ProbeError::Io { .. })
        ));
    }
}
