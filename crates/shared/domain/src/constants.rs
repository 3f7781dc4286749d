//! Wire-format and schema constants, carried over verbatim from the original
//! fixed-point `#define`s: sizes, magic values, and the per-field range limits
//! the validate-field visitor enforces.

/// Frozen schema registry dimension: no legal license nests deeper than this.
pub const MAX_LEVEL: usize = 16;
/// Frozen schema registry dimension: no object has more than this many distinct
/// field positions at a given depth.
pub const MAX_INDEX: usize = 16;

/// Size in bytes of a field descriptor (`u16`).
pub const FIELD_DESCRIPTOR_SIZE: u32 = 2;
/// Size in bytes of the length prefix on an object's data-tail entry.
pub const OBJECT_LENGTH_PREFIX_SIZE: u32 = 4;
/// Size in bytes of the length prefix on an array's data-tail entry.
pub const ARRAY_LENGTH_PREFIX_SIZE: u32 = 4;
/// Size in bytes of the length prefix on a string's data-tail entry.
pub const STRING_LENGTH_PREFIX_SIZE: u32 = 4;

/// Output size, in bytes, of the Davies-Meyer hash (§4.3).
pub const DM_HASH_SIZE: usize = 16;
/// Output size, in bytes, of the Abreast-DM hash (§4.4).
pub const ABREAST_DM_HASH_SIZE: usize = 32;
/// Size in bytes of the RSA-2048 signature carried in the signature object.
pub const RSA_SIG_SIZE: usize = 256;

/// Maximum length, in bytes, of an ordinary string field (UID, vendor name, version regex).
pub const MAX_FIELD_SIZE: usize = 32;

/// Algorithm id naming the AES family; the only value `alg_id` may legally carry.
pub const AES_ALGID: u32 = 1;

/// Fingerprint record magic value, ASCII `"fitF"` packed little-endian.
pub const FP_MAGIC: u32 = 0x666D_7446;

/// Inclusive upper bound on `feature_id` and `product_id`.
pub const MAX_FEATURE_ID_VALUE: u32 = 65_471;
/// Inclusive upper bound on `product_id` (shares the feature id's limit in the source).
pub const MAX_PRODUCT_ID_VALUE: u32 = 65_471;
/// Inclusive upper bound on `lc_id` (license container id).
pub const MAX_LC_ID_VALUE: u32 = u32::MAX;
/// Inclusive upper bound on `vendor_id`.
pub const MAX_VENDOR_ID_VALUE: u32 = 0x00FF_FFFF;
/// Inclusive upper bound on `start_date`.
pub const MAX_START_DATE_VALUE: u32 = 0x7FFF_FFFF;
/// Inclusive upper bound on `end_date`.
pub const MAX_END_DATE_VALUE: u32 = 0x7FFF_FFFF;

/// Minimum accepted value of `licgen_version`.
pub const MIN_LICGEN_VERSION: u32 = 100;

/// Fixed length of the device UID string field.
pub const FIT_UID_LEN: usize = 32;

/// Inclusive bounds on the raw device-id buffer the fingerprint callback may return.
pub const MIN_DEVICE_ID_LEN: usize = 4;
pub const MAX_DEVICE_ID_LEN: usize = 64;
