//! State Digest for Determinism Verification
//!
//! Deterministic SHA-256 digest over simulation state, used to compare two
//! runs of the same input tape. Update order is part of the format - every
//! call site must feed fields in a single documented order.

use sha2::{Digest, Sha256};

use super::fixed::Fixed;
use super::vec2::PixelVec;

/// Digest output type (256 bits / 32 bytes).
pub type StateDigest = [u8; 32];

/// Deterministic hasher for simulation state.
///
/// Wraps SHA-256 with helpers for the crate's fixed-point types.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with a domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create the hasher used for full game-state digests.
    pub fn for_game_state() -> Self {
        Self::new(b"TUNNELER_STATE_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a Fixed value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.update_i32(value);
    }

    /// Update with a pixel vector.
    #[inline]
    pub fn update_vec(&mut self, value: PixelVec) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the digest.
    pub fn finalize(self) -> StateDigest {
        self.hasher.finalize().into()
    }
}

/// Render a digest as lowercase hex for logs and assertions.
pub fn digest_hex(digest: &StateDigest) -> String {
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let mut a = StateHasher::for_game_state();
        let mut b = StateHasher::for_game_state();
        for h in [&mut a, &mut b] {
            h.update_u32(42);
            h.update_vec(PixelVec::from_px(40, 80));
            h.update_bool(true);
        }
        assert_eq!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_digest_sensitive_to_fields() {
        let mut a = StateHasher::for_game_state();
        a.update_u32(42);
        let mut b = StateHasher::for_game_state();
        b.update_u32(43);
        assert_ne!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_domain_separation() {
        let a = StateHasher::new(b"DOMAIN_A").finalize();
        let b = StateHasher::new(b"DOMAIN_B").finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_hex() {
        let d = StateHasher::new(b"X").finalize();
        let s = digest_hex(&d);
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
