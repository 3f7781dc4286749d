//! Abreast-DM hash: the 256-bit double-pipe construction whose output is
//! handed to the RSA verifier as the (mislabeled) "SHA-256" digest.

use super::{aes256_encrypt_block, blocks16, pad_message};

const INITIAL_CHAINING_VALUE: [u8; 16] = [0xFF; 16];

fn xor16(a: [u8; 16], b: [u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = a[i] ^ b[i];
    }
    out
}

fn not16(a: [u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = !a[i];
    }
    out
}

fn concat(a: [u8; 16], b: [u8; 16]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[..16].copy_from_slice(&a);
    out[16..].copy_from_slice(&b);
    out
}

/// Computes the 32-byte Abreast-DM digest of `message`.
///
/// Maintains two 128-bit pipes `G` and `H`, both seeded to `0xFF…FF`, and
/// for each padded block `Mᵢ`:
///
/// ```text
/// Gᵢ = Gᵢ₋₁ XOR AES256(key = Hᵢ₋₁ ‖ Mᵢ,      plaintext = Gᵢ₋₁)
/// Hᵢ = Hᵢ₋₁ XOR AES256(key = Mᵢ  ‖ Gᵢ₋₁,     plaintext = NOT(Hᵢ₋₁))
/// ```
///
/// Finalization re-keys both halves under the concatenation of the final
/// chaining values and XORs the result back into each half, producing the
/// 32-byte output `Gfinal ‖ Hfinal`.
#[must_use]
pub fn abreast_dm_hash(message: &[u8]) -> [u8; 32] {
    let padded = pad_message(message);
    let mut g = INITIAL_CHAINING_VALUE;
    let mut h = INITIAL_CHAINING_VALUE;

    for m in blocks16(&padded) {
        let g_key = concat(h, m);
        let h_key = concat(m, g);
        let g_next = xor16(aes256_encrypt_block(&g_key, g), g);
        let h_next = xor16(aes256_encrypt_block(&h_key, not16(h)), h);
        g = g_next;
        h = h_next;
    }

    let final_key = concat(g, h);
    let g_final = xor16(aes256_encrypt_block(&final_key, g), g);
    let h_final = xor16(aes256_encrypt_block(&final_key, h), h);

    let mut out = [0u8; 32];
    out[..16].copy_from_slice(&g_final);
    out[16..].copy_from_slice(&h_final);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let data = b"license sub-tree bytes";
        assert_eq!(abreast_dm_hash(data), abreast_dm_hash(data));
    }

    #[test]
    fn digest_changes_with_input() {
        assert_ne!(abreast_dm_hash(b"license a"), abreast_dm_hash(b"license b"));
    }

    #[test]
    fn output_is_32_bytes_and_halves_differ() {
        let digest = abreast_dm_hash(b"some license bytes");
        assert_eq!(digest.len(), 32);
        assert_ne!(&digest[..16], &digest[16..]);
    }
}
