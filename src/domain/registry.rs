//! Division type registry: normalized type name -> two-letter code

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::slug::normalize;

/// Built-in type prefixes (francophone administrative levels).
pub const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("pays", "PA"),
    ("region", "RG"),
    ("prefecture", "PR"),
    ("province", "PV"),
    ("departement", "DP"),
    ("district", "DI"),
    ("arrondissement", "AR"),
    ("commune", "CM"),
    ("ville", "VL"),
    ("quartier", "QR"),
    ("localite", "LC"),
    ("secteur-villageois", "SV"),
    ("village", "VG"),
    ("zone-sanitaire", "ZS"),
    ("zone-de-developpement", "ZD"),
    ("zone-electorale", "ZE"),
    ("canton", "CC"),
    ("territoire", "TR"),
    ("metropole", "MT"),
];

/// Immutable lookup from normalized type token to type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    codes: BTreeMap<String, String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TypeRegistry {
    /// Registry holding only the built-in prefixes.
    pub fn builtin() -> Self {
        let codes = BUILTIN_TYPES
            .iter()
            .map(|(token, code)| (token.to_string(), code.to_string()))
            .collect();
        Self { codes }
    }

    /// Add or override entries.
    ///
    /// Names are normalized the same way headers are; codes must be exactly two
    /// ASCII uppercase letters.
    pub fn with_entries<I, K, V>(mut self, entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, code) in entries {
            let token = normalize(name.as_ref());
            let code = code.as_ref();
            if !is_valid_code(code) || token.is_empty() {
                return Err(DomainError::InvalidTypeCode {
                    token,
                    code: code.to_string(),
                });
            }
            debug!("registry: {} -> {}", token, code);
            self.codes.insert(token, code.to_string());
        }
        Ok(self)
    }

    /// Code for an already-normalized token.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.codes.get(token).map(String::as_str)
    }

    /// Normalize a header and resolve its code.
    ///
    /// Returns the normalized token alongside the code.
    pub fn resolve(&self, header: &str) -> DomainResult<(String, &str)> {
        let token = normalize(header);
        match self.lookup(&token) {
            Some(code) => Ok((token, code)),
            None => Err(DomainError::UnknownDivisionType {
                token,
                header: header.to_string(),
            }),
        }
    }

    /// Entries in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(t, c)| (t.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn is_valid_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}
