//! Block-cipher-based hash constructions used to bind a license signature to
//! its body (Davies-Meyer) and to feed the RSA verifier (Abreast-DM).
//!
//! Both hashes share the same non-standard MD-strengthening: the *byte*
//! length of the message, truncated to 16 bits, multiplied by 8 and packed
//! into the low two bytes of an otherwise-zero 8-byte big-endian length
//! field. This is reproduced exactly rather than "fixed" to a conventional
//! 64-bit bit-length, since existing signed licenses depend on it.

pub mod abreast;
pub mod dm;

use aes::Block;
use aes::cipher::{BlockEncrypt, KeyInit};

pub(crate) fn aes128_encrypt_block(key: &[u8; 16], block: [u8; 16]) -> [u8; 16] {
    let cipher = aes::Aes128Enc::new(key.into());
    let mut b = Block::clone_from_slice(&block);
    cipher.encrypt_block(&mut b);
    let mut out = [0u8; 16];
    out.copy_from_slice(&b);
    out
}

pub(crate) fn aes256_encrypt_block(key: &[u8; 32], block: [u8; 16]) -> [u8; 16] {
    let cipher = aes::Aes256Enc::new(key.into());
    let mut b = Block::clone_from_slice(&block);
    cipher.encrypt_block(&mut b);
    let mut out = [0u8; 16];
    out.copy_from_slice(&b);
    out
}

/// Zero-pads `message` to a 16-byte boundary leaving exactly 8 trailing
/// bytes free, then appends the truncated bit-length field described above.
pub(crate) fn pad_message(message: &[u8]) -> Vec<u8> {
    let mut buf = message.to_vec();
    let bit_len_truncated = (message.len() as u64 * 8) & 0xFFFF;

    let rem = buf.len() % 16;
    let zeros_needed = if rem < 8 { 8 - rem } else { 24 - rem };
    buf.extend(std::iter::repeat_n(0u8, zeros_needed));
    buf.extend_from_slice(&bit_len_truncated.to_be_bytes());
    debug_assert_eq!(buf.len() % 16, 0);
    buf
}

pub(crate) fn blocks16(padded: &[u8]) -> impl Iterator<Item = [u8; 16]> + '_ {
    padded.chunks_exact(16).map(|c| {
        let mut b = [0u8; 16];
        b.copy_from_slice(c);
        b
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_always_lands_on_a_block_boundary() {
        for len in 0..40 {
            let msg = vec![0xAB; len];
            let padded = pad_message(&msg);
            assert_eq!(padded.len() % 16, 0);
            assert!(padded.len() >= len);
        }
    }

    #[test]
    fn bit_length_field_is_truncated_and_big_endian() {
        let msg = vec![0u8; 10];
        let padded = pad_message(&msg);
        let tail = &padded[padded.len() - 8..];
        assert_eq!(tail, &[0, 0, 0, 0, 0, 0, 0, 80]);
    }

    #[test]
    fn length_on_a_16_byte_boundary_after_the_first_zero_pad_gets_a_full_extra_block() {
        // len=8: zeropads=8 lands the running total on 16 (a 16-byte boundary),
        // so 8 more zero bytes are appended before the 8-byte length tail.
        let msg = vec![0xCDu8; 8];
        let padded = pad_message(&msg);
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[8..24], &[0u8; 16]);
    }
}
