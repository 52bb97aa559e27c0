//! Random salts for name preclaim commitments

use rand::Rng;

/// Largest integer a JSON number carries without loss
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Generate a random salt that survives a round-trip through node JSON APIs
pub fn gen_salt() -> u64 {
    rand::thread_rng().gen_range(0..MAX_SAFE_INTEGER)
}
