use sha2::{Digest, Sha256};

/// SHA-256 digest of a file's full text, lowercase hex.
///
/// Used only for change detection; any byte difference yields a different
/// digest, so a stale "unchanged" classification cannot happen by
/// collision.
#[must_use]
pub fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
