//! The engine's single status/error type.
//!
//! Every fallible operation in this workspace, public or internal, resolves to a
//! [`Status`]. There is no separate "rich error wrapping a thin status code": the
//! four public entry points return `Status` directly, matching a value-returned
//! status enum rather than an exception or a boxed error trait object.

/// Outcome of a license-engine operation.
///
/// `StopParse` and `ContinueParse` are internal parser signals used to short-circuit
/// or continue a tree walk; they must never be returned from a public entry point.
/// The public surface asserts this in debug builds (see `fit-core::error::narrow`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Status {
    /// Request completed successfully.
    #[error("ok")]
    Ok,
    /// The info-builder arena (or another fixed-size buffer) is exhausted.
    #[error("insufficient memory")]
    InsufficientMemory,
    /// The requested feature id exceeds the maximum legal value or was rejected by a range check.
    #[error("invalid feature id")]
    InvalidFeatureId,
    /// The license blob does not conform to the wire schema.
    #[error("invalid V2C license data")]
    InvalidV2C,
    /// Access to the requested feature or functionality was denied.
    #[error("access denied")]
    AccessDenied,
    /// Unspecified internal error.
    #[error("error")]
    Error,
    /// The requested operation is not implemented in this build.
    #[error("request not supported")]
    RequestNotSupported,
    /// The license names a cryptographic algorithm this engine does not implement.
    #[error("unknown algorithm")]
    UnknownAlg,
    /// Generic signature-verification failure.
    #[error("invalid signature")]
    InvalidSignature,
    /// The requested feature id was not found anywhere in the license.
    #[error("feature not found")]
    FeatureNotFound,
    /// Internal: the consume visitor located the requested feature id.
    #[error("feature id found")]
    FeatureIdFound,
    /// Internal parser signal: stop the walk, a visitor is satisfied.
    #[error("stop parse")]
    StopParse,
    /// Internal parser signal: field was not of interest to the visitor, keep walking.
    #[error("continue parse")]
    ContinueParse,
    /// `licgen_version` is below the minimum accepted value.
    #[error("invalid licgen version")]
    InvalidLicgenVersion,
    /// `alg_id` does not name the AES family this engine verifies against.
    #[error("invalid signature algorithm id")]
    InvalidSigId,
    /// The feature's enclosing license property has passed its `end_date`.
    #[error("feature expired")]
    FeatureExpired,
    /// The validation cache could not be updated.
    #[error("license caching error")]
    LicCachingError,
    /// Invalid product information.
    #[error("invalid product")]
    InvalidProduct,
    /// Invalid first function parameter.
    #[error("invalid parameter 1")]
    InvalidParam1,
    /// Invalid second function parameter.
    #[error("invalid parameter 2")]
    InvalidParam2,
    /// Invalid third function parameter.
    #[error("invalid parameter 3")]
    InvalidParam3,
    /// Invalid fourth function parameter.
    #[error("invalid parameter 4")]
    InvalidParam4,
    /// Invalid fifth function parameter.
    #[error("invalid parameter 5")]
    InvalidParam5,
    /// A field descriptor named a wire type the schema registry does not recognize.
    #[error("invalid wire type")]
    InvalidWireType,
    /// Internal engine error (should not normally be observable by callers).
    #[error("internal error")]
    InternalError,
    /// RSA key size does not match the expected modulus length.
    #[error("invalid key size")]
    InvalidKeysize,
    /// `vendor_id` exceeds the maximum legal value.
    #[error("invalid vendor id")]
    InvalidVendorId,
    /// `product_id` exceeds the maximum legal value.
    #[error("invalid product id")]
    InvalidProductId,
    /// `lc_id` (license container id) exceeds the maximum legal value.
    #[error("invalid license container id")]
    InvalidContainerId,
    /// Internal: address-capture visitor found the field it was looking for.
    #[error("license field present")]
    LicFieldPresent,
    /// The license property does not match any recognized license model
    /// (perpetual, end-date, or a supported duration scheme).
    #[error("invalid license type")]
    InvalidLicenseType,
    /// Expiration enforcement is not supported in this build.
    #[error("expiration not supported")]
    ExpirationNotSupported,
    /// `start_date` is outside the legal range.
    #[error("invalid start date")]
    InvalidStartDate,
    /// `end_date` is outside the legal range.
    #[error("invalid end date")]
    InvalidEndDate,
    /// The current time is before the license's `start_date`.
    #[error("inactive license")]
    InactiveLicense,
    /// No real-time clock is present, but one is required for this check.
    #[error("real-time clock not present")]
    RtcNotPresent,
    /// The embedding application configured no clock source at all.
    #[error("no clock support")]
    NoClockSupport,
    /// A string or data-tail field length violates the schema's size limits.
    #[error("invalid field length")]
    InvalidFieldLength,
    /// A byte-for-byte comparison (fingerprint, cache hash) failed.
    #[error("data mismatch")]
    DataMismatch,
    /// The license contains a fingerprint but this build has no node-locking support.
    #[error("node locking not supported")]
    NodeLockingNotSupported,
    /// The fingerprint record's magic value did not match `'fitF'`.
    #[error("fingerprint magic not valid")]
    FingerprintMagicInvalid,
    /// The fingerprint record names an algorithm this engine does not implement.
    #[error("unknown fingerprint algorithm")]
    UnknownFingerprintAlg,
    /// The device fingerprint did not match the one bound into the license.
    #[error("fingerprint mismatch")]
    FingerprintMismatch,
    /// The device-id callback returned a buffer outside the legal 4..=64 byte range.
    #[error("invalid device id length")]
    InvalidDeviceLength,
    /// RSA signature verification failed.
    #[error("RSA signature verification failed")]
    RsaVerifyFailed,
}

impl Status {
    /// True for the two internal parser signals that must never reach a caller.
    #[must_use]
    pub const fn is_internal_signal(self) -> bool {
        matches!(self, Self::StopParse | Self::ContinueParse | Self::FeatureIdFound | Self::LicFieldPresent)
    }

    /// True if this status represents unqualified success.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Convenience alias used throughout the engine; almost every fallible internal
/// function returns this.
pub type FitResult<T> = Result<T, Status>;
