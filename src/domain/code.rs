//! Content hashing for division codes
//!
//! A canonical slug is hashed with SHA-256 and the digest is rendered in
//! RFC 4648 Base32; the first six symbols (30 bits) form the division code.

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha256};

/// Number of Base32 symbols kept from the digest.
pub const CODE_LENGTH: usize = 6;

/// Encode bytes as RFC 4648 Base32 without padding.
///
/// # Examples
/// ```
/// use divid::domain::base32_encode;
///
/// assert_eq!(base32_encode(b"foobar"), "MZXW6YTBOI");
/// ```
pub fn base32_encode(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

/// Derive the 6-character code of a canonical slug.
///
/// # Examples
/// ```
/// use divid::domain::derive_code;
///
/// assert_eq!(derive_code("togo.maritime.lome"), "3CKPSE");
/// ```
pub fn derive_code(canonical_slug: &str) -> String {
    let digest = Sha256::digest(canonical_slug.as_bytes());
    let mut encoded = base32_encode(&digest);
    encoded.truncate(CODE_LENGTH);
    encoded
}
