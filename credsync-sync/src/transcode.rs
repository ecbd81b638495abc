//! Password-hash transcoding between the two stores' encodings.
//!
//! The source encodes bcrypt the PHP `password_hash` way, with salt and
//! digest concatenated without a delimiter:
//!
//! ```text
//! $2y$<cost>$<22-char-salt><digest>
//! ```
//!
//! The target tags every hash with its algorithm and delimits salt from
//! digest with `$`:
//!
//! ```text
//! :bcrypt:<cost>$<salt>$<digest>
//! ```
//!
//! Because both sides run bcrypt, the digest transfers verbatim — the real
//! password is never needed.

use crate::error::SyncError;

/// The only source encoding we understand.
const BCRYPT_PREFIX: &str = "$2y$";

/// bcrypt salts are always 22 base64 characters.
const SALT_LEN: usize = 22;

/// Convert a source bcrypt hash into the target's tagged encoding.
///
/// Pure and deterministic; identical input yields identical output. Any
/// input that is not a well-formed `$2y$` hash is
/// [`SyncError::UnsupportedHashAlgorithm`].
pub fn transcode(source_hash: &str) -> Result<String, SyncError> {
    if !source_hash.starts_with(BCRYPT_PREFIX) {
        return Err(unsupported(source_hash));
    }

    // "$2y$<cost>$<blob>" splits on '$' into ["", "2y", cost, blob].
    let parts: Vec<&str> = source_hash.split('$').collect();
    let [_, _, cost, blob] = parts[..] else {
        return Err(unsupported(source_hash));
    };
    if cost.is_empty() || blob.len() <= SALT_LEN || !blob.is_ascii() {
        return Err(unsupported(source_hash));
    }

    let (salt, digest) = blob.split_at(SALT_LEN);
    Ok(format!(":bcrypt:{cost}${salt}${digest}"))
}

fn unsupported(hash: &str) -> SyncError {
    SyncError::UnsupportedHashAlgorithm {
        hash: hash.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
