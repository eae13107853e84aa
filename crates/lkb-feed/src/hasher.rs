//! Cache-key hasher
//!
//! Derives the [`Fingerprint`] that decides whether a compiled dictionary is
//! still valid. Cosmetic reformatting of the configuration or the query
//! (re-indented Turtle, re-wrapped SPARQL) must not change it.

use lkb_domain::Fingerprint;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapse every maximal run of whitespace into a single space
///
/// Runs are collapsed, not removed: leading and trailing runs become one
/// space each.
///
/// # Examples
///
/// ```
/// use lkb_feed::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  SELECT\n\t?x  "), " SELECT ?x ");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Stable 32-bit string hash
///
/// Polynomial hash with multiplier 31 over UTF-16 code units, wrapping on
/// overflow. Fingerprints are persisted next to compiled dictionaries, so the
/// result must not depend on the process or toolchain.
///
/// # Examples
///
/// ```
/// use lkb_feed::string_hash;
///
/// assert_eq!(string_hash(""), 0);
/// assert_eq!(string_hash("hello"), 99162322);
/// ```
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Fingerprint a configuration resource together with a query
///
/// Hashes `collapse(query) + ";" + collapse(config)`. When the configuration
/// cannot be read the fingerprint falls back to the collapsed query alone.
pub fn fingerprint(config_url: &Url, query: &str) -> Fingerprint {
    let query = collapse_whitespace(query);

    match read_resource(config_url) {
        Some(config) => {
            let config = collapse_whitespace(&config);
            Fingerprint::from_value(string_hash(&format!("{};{}", query, config)))
        }
        None => {
            debug!("Configuration {} unreadable, fingerprinting query only", config_url);
            Fingerprint::from_value(string_hash(&query))
        }
    }
}

fn read_resource(url: &Url) -> Option<String> {
    let path = url.to_file_path().ok()?;
    std::fs::read_to_string(path).ok()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Words without whitespace, joined by arbitrary whitespace runs
    fn reformat(words: &[String], seps: &[String]) -> String {
        let mut out = String::new();
        for (i, word) in words.iter().enumerate() {
            out.push_str(&seps[i % seps.len()]);
            out.push_str(word);
        }
        out
    }

    proptest! {
        /// Property: whitespace run-length never changes the fingerprint
        #[test]
        fn test_whitespace_invariance(
            words in prop::collection::vec("[a-zA-Z0-9?{}<>:;.]{1,8}", 1..12),
            seps_a in prop::collection::vec("[ \t\n]{1,4}", 1..5),
            seps_b in prop::collection::vec("[ \r\n]{1,4}", 1..5),
            config_words in prop::collection::vec("[a-z:\"]{1,6}", 1..8),
        ) {
            let dir_a = TempDir::new().unwrap();
            let dir_b = TempDir::new().unwrap();
            let path_a = dir_a.path().join("config.ttl");
            let path_b = dir_b.path().join("config.ttl");
            fs::write(&path_a, reformat(&config_words, &seps_a)).unwrap();
            fs::write(&path_b, reformat(&config_words, &seps_b)).unwrap();
            let url_a = Url::from_file_path(path_a).unwrap();
            let url_b = Url::from_file_path(path_b).unwrap();

            prop_assert_eq!(
                fingerprint(&url_a, &reformat(&words, &seps_a)),
                fingerprint(&url_b, &reformat(&words, &seps_b))
            );
        }

        /// Property: computing twice on unchanged inputs gives the same value
        #[test]
        fn test_deterministic(query in ".{0,64}", config in ".{0,64}") {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("config.ttl");
            fs::write(&path, &config).unwrap();
            let url = Url::from_file_path(path).unwrap();

            prop_assert_eq!(fingerprint(&url, &query), fingerprint(&url, &query));
        }
    }
}
