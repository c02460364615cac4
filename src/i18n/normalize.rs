//! Language code and translation key normalization
//!
//! Pure functions shared by the compiler (building flattened keys), the
//! cache (validating deserialized tables) and the translator (validating
//! caller input).

use once_cell::sync::Lazy;
use regex::Regex;
use crate::utils::errors::{LexiconError, Result};

static LANGUAGE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+(-[a-z]{2})?$").expect("valid language code pattern"));

static FLAT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9.\-_]+$").expect("valid flat key pattern"));

// Public lookup grammar: word characters and dashes, dot separated.
static LOOKUP_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-]+)*$").expect("valid lookup key pattern")
});

const SEGMENT_TRIM: &[char] = &['.', '-', '_'];

/// Lowercase and validate a language code such as `en` or `en-us`.
pub fn normalize_language_code(input: &str) -> Result<String> {
    let code = input.to_lowercase();
    if LANGUAGE_CODE.is_match(&code) {
        Ok(code)
    } else {
        Err(LexiconError::InvalidLanguageCode(input.to_string()))
    }
}

/// Join `segment` onto `parent` with a dot, lowercase the result and trim
/// `.`, `-` and `_` from both ends.
///
/// Never fails; the result still has to pass [`validate_flat_key`].
pub fn normalize_key_segment(parent: Option<&str>, segment: &str) -> String {
    let joined = format!("{}.{}", parent.unwrap_or(""), segment).to_lowercase();
    joined.trim_matches(SEGMENT_TRIM).to_string()
}

/// True iff `key` is a non-empty flattened key (`[a-z0-9.\-_]+`).
pub fn validate_flat_key(key: &str) -> bool {
    FLAT_KEY.is_match(key)
}

/// True iff `key` follows the public lookup grammar accepted by the translator.
pub fn validate_lookup_key(key: &str) -> bool {
    LOOKUP_KEY.is_match(key)
}
