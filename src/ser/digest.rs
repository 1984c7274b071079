/// Width of a content digest.
pub const DIGEST_SIZE: usize = 32;

/// BLAKE3 digest of already encoded bytes.
///
/// Encoding is deterministic, so equal values always share a digest.
pub fn content_digest(encoded: &[u8]) -> [u8; DIGEST_SIZE] {
    *blake3::hash(encoded).as_bytes()
}
