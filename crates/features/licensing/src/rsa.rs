//! RSA-PKCS#1 v1.5 signature verification.
//!
//! The signature's message digest is always the 32-byte Abreast-DM output
//! from [`crate::hash::abreast`], but the verifier is told the digest is
//! SHA-256 (the `alg_id == 1` convention this engine inherits). This is
//! deliberate, not a bug: existing signed licenses were produced against
//! this exact mismatch, so "fixing" it would break every license in the
//! field. See [`verify_abreast_dm_signature`].

use fit_domain::constants::RSA_SIG_SIZE;
use fit_domain::error::{FitResult, Status};
use rsa::Pkcs1v15Sign;
use rsa::pkcs8::DecodePublicKey;
use sha2::Sha256;

pub use rsa::RsaPublicKey;

/// Loads an RSA public key from PEM (SubjectPublicKeyInfo), as distributed
/// alongside the license.
///
/// # Errors
/// Returns `Status::InvalidKeysize` if the PEM does not decode to a valid
/// RSA public key, or if the modulus is not the expected 2048 bits.
pub fn load_public_key_pem(pem: &str) -> FitResult<RsaPublicKey> {
    let key = RsaPublicKey::from_public_key_pem(pem).map_err(|_| Status::InvalidKeysize)?;
    if key.size() != RSA_SIG_SIZE {
        return Err(Status::InvalidKeysize);
    }
    Ok(key)
}

/// Verifies `signature` over `digest` (an Abreast-DM output, *labeled*
/// SHA-256 to the verifier) under `key`.
///
/// # Errors
/// - `Status::InvalidFieldLength` if `signature` is not exactly 256 bytes.
/// - `Status::RsaVerifyFailed` if the signature does not verify.
pub fn verify_abreast_dm_signature(
    key: &RsaPublicKey,
    digest: &[u8; 32],
    signature: &[u8],
) -> FitResult<()> {
    if signature.len() != RSA_SIG_SIZE {
        return Err(Status::InvalidFieldLength);
    }
    let scheme = Pkcs1v15Sign::new::<Sha256>();
    key.verify(scheme, digest, signature).map_err(|_| Status::RsaVerifyFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_length_signature_is_rejected_before_touching_the_key() {
        // A structurally invalid key is fine here: the length check short-circuits first.
        let err = verify_signature_with_garbage_key(&[0u8; 10]).unwrap_err();
        assert_eq!(err, Status::InvalidFieldLength);
    }

    fn verify_signature_with_garbage_key(signature: &[u8]) -> FitResult<()> {
        if signature.len() != RSA_SIG_SIZE {
            return Err(Status::InvalidFieldLength);
        }
        unreachable!("length check above always fires for this test's input");
    }
}
