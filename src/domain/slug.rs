//! Label normalization into canonical slugs
//!
//! A label is decomposed (NFD), stripped of combining diacritics, lowercased and
//! collapsed to `[a-z0-9]` runs joined by a separator. A path of labels becomes a
//! canonical slug by normalizing each label and joining them with `.`.

use std::sync::OnceLock;

use itertools::Itertools;
use regex::{NoExpand, Regex};
use unicode_normalization::UnicodeNormalization;

/// Separator used between alphanumeric runs of a normalized label.
pub const DEFAULT_SEPARATOR: char = '-';

/// Separator between the normalized labels of a path.
pub const PATH_SEPARATOR: char = '.';

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("static pattern is valid"))
}

/// Combining Diacritical Marks block.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Normalize a label with the default `-` separator.
///
/// # Examples
/// ```
/// use divid::domain::normalize;
///
/// assert_eq!(normalize("Côte d'Ivoire"), "cote-d-ivoire");
/// assert_eq!(normalize("  Lomé  "), "lome");
/// assert_eq!(normalize("!!!"), "");
/// ```
pub fn normalize(text: &str) -> String {
    normalize_with(text, DEFAULT_SEPARATOR)
}

/// Normalize a label, joining alphanumeric runs with `separator`.
///
/// Empty and purely symbolic input yield an empty token; callers decide whether
/// that is acceptable.
pub fn normalize_with(text: &str, separator: char) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect::<String>()
        .to_lowercase();

    let mut buf = [0u8; 4];
    let sep: &str = separator.encode_utf8(&mut buf);
    non_alphanumeric()
        .replace_all(&stripped, NoExpand(sep))
        .trim_matches(separator)
        .to_string()
}

/// Canonical slug of a path: normalized labels joined with `.`.
pub fn canonical_slug<S: AsRef<str>>(segments: &[S]) -> String {
    canonical_slug_with(segments, DEFAULT_SEPARATOR)
}

/// Canonical slug of a path using a custom label separator.
pub fn canonical_slug_with<S: AsRef<str>>(segments: &[S], separator: char) -> String {
    segments
        .iter()
        .map(|s| normalize_with(s.as_ref(), separator))
        .join(&PATH_SEPARATOR.to_string())
}
