//! Storage bucket naming.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::domain::error::DeployError;

/// Appended to every generated bucket name.
pub const BUCKET_SUFFIX: &str = "-gcf-source";

/// Number of random base-36 characters in front of the suffix.
pub const RANDOM_PART_LEN: usize = 13;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Leading character alphabet: base-36 without `g`.
const FIRST_CHARS: &[u8] = b"0123456789abcdefhijklmnopqrstuvwxyz";

#[allow(clippy::unwrap_used)] // literal pattern
static BUCKET_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]{1,61}[a-z0-9]$").unwrap());

/// Generate a fresh `<random>-gcf-source` bucket name.
///
/// The first character is never `g`, so the reserved `goog` prefix cannot
/// occur. The name is not checked for collisions.
#[must_use]
pub fn generate_bucket_name() -> String {
    let mut rng = rand::thread_rng();
    let random: String = std::iter::once(FIRST_CHARS)
        .chain(std::iter::repeat_n(BASE36, RANDOM_PART_LEN - 1))
        .map(|alphabet| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
        .collect();
    format!("{random}{BUCKET_SUFFIX}")
}

/// Check a name against the Cloud Storage bucket naming rules for
/// non-domain names.
///
/// # Errors
///
/// Returns `DeployError::InvalidBucketName` when the name is malformed.
pub fn validate_bucket_name(name: &str) -> Result<(), DeployError> {
    if BUCKET_NAME_RE.is_match(name) && !name.starts_with("goog") && !name.contains("..") {
        Ok(())
    } else {
        Err(DeployError::InvalidBucketName(name.to_string()))
    }
}
