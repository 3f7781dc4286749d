//! Davies-Meyer hash: the 128-bit construction that binds the validation
//! cache entry to the license body, and feeds the fingerprint comparison.

use super::{aes128_encrypt_block, blocks16, pad_message};

const INITIAL_CHAINING_VALUE: [u8; 16] = [0xFF; 16];

fn xor16(a: [u8; 16], b: [u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Computes the 16-byte Davies-Meyer digest of `message`.
///
/// `Hᵢ = AES_encrypt(key = mᵢ, plaintext = Hᵢ₋₁) XOR Hᵢ₋₁`, applied over the
/// padded message, followed by one finalization round `AES_encrypt(key = Hₙ,
/// plaintext = Hₙ) XOR Hₙ`.
#[must_use]
pub fn dm_hash(message: &[u8]) -> [u8; 16] {
    let padded = pad_message(message);
    let mut h = INITIAL_CHAINING_VALUE;
    for block in blocks16(&padded) {
        h = xor16(aes128_encrypt_block(&block, h), h);
    }
    xor16(aes128_encrypt_block(&h, h), h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let data = b"hello license body";
        assert_eq!(dm_hash(data), dm_hash(data));
    }

    #[test]
    fn digest_changes_with_input() {
        assert_ne!(dm_hash(b"license a"), dm_hash(b"license b"));
    }

    #[test]
    fn empty_message_hashes_without_panic() {
        let digest = dm_hash(b"");
        assert_eq!(digest.len(), 16);
    }
}
