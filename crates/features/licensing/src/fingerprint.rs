//! Node-locking: binding a license to one physical device via a fingerprint
//! record carried in the header's optional `fingerprint` field.

use fit_domain::constants::{AES_ALGID, FP_MAGIC, MAX_DEVICE_ID_LEN, MIN_DEVICE_ID_LEN};
use fit_domain::error::{FitResult, Status};

use crate::hash::dm::dm_hash;

/// A device's raw identifying bytes, as returned by the host's device-id
/// callback. The engine never looks at the contents beyond hashing them.
pub trait DeviceId {
    /// Returns the device's raw identifying bytes.
    ///
    /// # Errors
    /// Returns `Status::InvalidDeviceLength` if the implementation cannot
    /// produce an id within the legal 4..=64 byte range.
    fn device_id(&self) -> FitResult<Vec<u8>>;
}

/// A parsed `{magic, alg_id, hash}` fingerprint record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub magic: u32,
    pub alg_id: u8,
    pub hash: [u8; 16],
}

impl Fingerprint {
    /// Parses a fingerprint record from its wire bytes: 4-byte little-endian
    /// magic, 1-byte algorithm id, 16-byte Davies-Meyer hash.
    ///
    /// # Errors
    /// - `Status::InvalidFieldLength` if `bytes` is not exactly 21 bytes.
    /// - `Status::FingerprintMagicInvalid` if the magic does not match `'fitF'`.
    /// - `Status::UnknownFingerprintAlg` if `alg_id` does not name the AES family.
    pub fn parse(bytes: &[u8]) -> FitResult<Self> {
        if bytes.len() != 21 {
            return Err(Status::InvalidFieldLength);
        }
        let magic = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let alg_id = bytes[4];
        let mut hash = [0u8; 16];
        hash.copy_from_slice(&bytes[5..21]);

        if magic != FP_MAGIC {
            return Err(Status::FingerprintMagicInvalid);
        }
        if u32::from(alg_id) != AES_ALGID {
            return Err(Status::UnknownFingerprintAlg);
        }
        Ok(Self { magic, alg_id, hash })
    }

    /// Verifies that `device` produces an id whose Davies-Meyer hash matches
    /// this fingerprint's stored hash.
    ///
    /// # Errors
    /// - Propagates `Status::InvalidDeviceLength` from the device callback.
    /// - `Status::InvalidDeviceLength` if the returned id is outside 4..=64 bytes.
    /// - `Status::FingerprintMismatch` if the hash does not match.
    pub fn verify_device(&self, device: &dyn DeviceId) -> FitResult<()> {
        let raw = device.device_id()?;
        if !(MIN_DEVICE_ID_LEN..=MAX_DEVICE_ID_LEN).contains(&raw.len()) {
            return Err(Status::InvalidDeviceLength);
        }
        if dm_hash(&raw) == self.hash {
            Ok(())
        } else {
            Err(Status::FingerprintMismatch)
        }
    }
}
