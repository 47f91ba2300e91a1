//! Division identifier derivation
//!
//! `division_id = {type_code}{delimiter}{code(canonical_slug)}`. Identifiers are
//! never stored or looked up; the same path always derives the same id.

use crate::domain::code::derive_code;
use crate::domain::slug::{canonical_slug_with, DEFAULT_SEPARATOR};

/// Delimiter between type code and hash code.
pub const DEFAULT_PREFIX_DELIMITER: &str = "-";

/// Identifier and canonical slug of one division.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DivisionIdentity {
    pub division_id: String,
    pub division_slug: String,
}

/// Derive identity from a type code and a path with the default label separator.
///
/// # Examples
/// ```
/// use divid::domain::derive;
///
/// let identity = derive("CM", &["Togo", "Maritime", "Lomé"], "-");
/// assert_eq!(identity.division_slug, "togo.maritime.lome");
/// assert_eq!(identity.division_id, "CM-3CKPSE");
/// ```
pub fn derive<S: AsRef<str>>(type_code: &str, segments: &[S], delimiter: &str) -> DivisionIdentity {
    derive_with(type_code, segments, delimiter, DEFAULT_SEPARATOR)
}

fn derive_with<S: AsRef<str>>(
    type_code: &str,
    segments: &[S],
    delimiter: &str,
    separator: char,
) -> DivisionIdentity {
    let division_slug = canonical_slug_with(segments, separator);
    let division_id = format!("{}{}{}", type_code, delimiter, derive_code(&division_slug));
    DivisionIdentity {
        division_id,
        division_slug,
    }
}

/// Deriver carrying the configured delimiter and label separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierDeriver {
    delimiter: String,
    separator: char,
}

impl Default for IdentifierDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX_DELIMITER, DEFAULT_SEPARATOR)
    }
}

impl IdentifierDeriver {
    pub fn new(delimiter: impl Into<String>, separator: char) -> Self {
        Self {
            delimiter: delimiter.into(),
            separator,
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn derive<S: AsRef<str>>(&self, type_code: &str, segments: &[S]) -> DivisionIdentity {
        derive_with(type_code, segments, &self.delimiter, self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_idempotent() {
        let path = ["Togo", "Plateaux", "Kpalimé"];
        assert_eq!(derive("CM", &path, "-"), derive("CM", &path, "-"));
    }

    #[test]
    fn test_derive_uses_full_path() {
        // same leaf label under different ancestors
        let a = derive("CM", &["Togo", "Maritime", "Golfe"], "-");
        let b = derive("CM", &["Togo", "Plateaux", "Golfe"], "-");
        assert_ne!(a.division_id, b.division_id);
    }

    #[test]
    fn test_derive_ignores_case_and_accents() {
        let a = derive("PA", &["Côte d'Ivoire"], "-");
        let b = derive("PA", &["COTE D IVOIRE"], "-");
        assert_eq!(a, b);
        assert_eq!(a.division_id, "PA-ART5LN");
    }

    #[test]
    fn test_derive_delimiter() {
        assert_eq!(derive("RG", &["Togo", "Maritime"], "").division_id, "RGBR37WJ");
        assert_eq!(derive("RG", &["Togo", "Maritime"], "-").division_id, "RG-BR37WJ");
    }

    #[test]
    fn test_deriver_default_matches_free_function() {
        let deriver = IdentifierDeriver::default();
        let path = ["Togo", "Maritime", "Lomé"];
        assert_eq!(deriver.derive("CM", &path), derive("CM", &path, "-"));
    }

    #[test]
    fn test_deriver_custom_separator_changes_slug() {
        let deriver = IdentifierDeriver::new(":", '_');
        let identity = deriver.derive("PA", &["Côte d'Ivoire"]);
        assert_eq!(identity.division_slug, "cote_d_ivoire");
        assert!(identity.division_id.starts_with("PA:"));
        assert_eq!(identity.division_id.len(), "PA:".len() + 6);
    }
}
