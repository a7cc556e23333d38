//! Reading word lists: one word per line, already in sorted order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::DawgConfig;
use crate::dawg::builder::TrieBuilder;
use crate::dawg::Dawg;
use crate::error::Result;

/// Returns true if this line is a comment.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Turns a raw line into a candidate word.
///
/// Leading whitespace is skipped and the word ends at the next whitespace
/// character. ASCII letters are lowercased. Blank lines and comment lines
/// yield `None`. Whether the word fits the alphabet and the length limit is
/// left to the builder.
pub fn normalize_line(line: &str) -> Option<String> {
    if is_comment(line) {
        return None;
    }
    line.split_whitespace()
        .next()
        .map(|word| word.to_ascii_lowercase())
}

/// Builds a DAWG from a word list.
///
/// Lines the builder rejects as recoverable (illegal characters, too long)
/// are logged with their line number and skipped. Input that is not valid
/// UTF-8 is decoded lossily, so it ends up rejected as an illegal character
/// rather than aborting the build.
///
/// # Errors
///
/// Returns [`DawgError::OutOfOrderInput`](crate::DawgError::OutOfOrderInput)
/// if the list is not sorted, or an I/O error from `reader`.
pub fn build_dawg_from_reader(mut reader: impl BufRead, config: &DawgConfig) -> Result<Dawg> {
    let mut builder = TrieBuilder::new(config.clone());

    // One buffer for the whole input instead of an allocation per line.
    let mut buf = Vec::with_capacity(80);
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        let Some(word) = normalize_line(&line) else {
            continue;
        };
        match builder.add_word(&word) {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => warn!("Skipping line {line_no}: {e}"),
            Err(e) => return Err(e),
        }
    }
    debug!(lines = line_no, words = builder.word_count(), "read word list");
    Ok(builder.finish().into_dawg())
}

/// Builds a DAWG from a word-list file.
///
/// # Examples
///
/// ```no_run
/// use dawgc::wordlist::build_dawg_from_file;
/// use dawgc::DawgConfig;
///
/// let dawg = build_dawg_from_file("dictionary.txt", &DawgConfig::default()).unwrap();
/// ```
pub fn build_dawg_from_file(path: impl AsRef<Path>, config: &DawgConfig) -> Result<Dawg> {
    let file = File::open(path)?;
    build_dawg_from_reader(BufReader::new(file), config)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dawg::enumerate::collect_words;
    use crate::DawgError;

    #[test]
    fn comment_that_starts_with_pound() {
        assert!(is_comment("# This is a comment"));
    }

    #[test]
    fn comment_with_whitespace_before_pound() {
        assert!(is_comment("        # This is a comment with whitespace"));
    }

    #[test]
    fn non_comment() {
        assert!(!is_comment("reverberate"));
        assert!(!is_comment(" reverberate"));
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_line("Apple\n"), Some("apple".to_owned()));
        assert_eq!(normalize_line("  pear  \r\n"), Some("pear".to_owned()));
        assert_eq!(normalize_line("ice cream\n"), Some("ice".to_owned()));
        assert_eq!(normalize_line("\n"), None);
        assert_eq!(normalize_line("# header"), None);
    }

    #[test]
    fn reader_skips_bad_lines() {
        let input = "# fruit\nApple\nbanana\n\nch3rry\nsupercalifragilistic\nDate\n";
        let dawg = build_dawg_from_reader(input.as_bytes(), &DawgConfig::default()).unwrap();
        assert_eq!(collect_words(&dawg), ["apple", "banana", "date"]);
    }

    #[test]
    fn reader_without_trailing_newline() {
        let dawg = build_dawg_from_reader("cat\ncats\ndog".as_bytes(), &DawgConfig::default()).unwrap();
        assert_eq!(collect_words(&dawg), ["cat", "cats", "dog"]);
        assert_eq!(dawg.vertex_count(), 8);
    }

    #[test]
    fn reader_rejects_unsorted_input() {
        let res = build_dawg_from_reader("zebra\napple\n".as_bytes(), &DawgConfig::default());
        assert!(matches!(res, Err(DawgError::OutOfOrderInput { .. })));
    }

    #[test]
    fn invalid_utf8_is_skipped() {
        let input: &[u8] = b"abc\nd\xffe\nfgh\n";
        let dawg = build_dawg_from_reader(input, &DawgConfig::default()).unwrap();
        assert_eq!(collect_words(&dawg), ["abc", "fgh"]);
    }
}
