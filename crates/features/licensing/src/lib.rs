//! Embedded license-verification engine.
//!
//! Reads a compactly encoded, RSA-signed license blob (the "V2C" schema) and
//! answers one question per call: is a given feature currently permitted on
//! this device? The blob's field identity is derived entirely from its
//! structural `(depth, position)` coordinates rather than from explicit
//! tags — see [`pointer`] and [`parser`] for the wire walk, [`registry`] for
//! the frozen coordinate table that gives each position meaning.
//!
//! ## Architecture
//!
//! 1. **Parsing** ([`pointer`], [`parser`], [`registry`] in `fit-domain`):
//!    a recursive-descent walk driven by a pluggable [`visitors::Visitor`].
//! 2. **Cryptography** ([`hash`], [`rsa`]): Davies-Meyer and Abreast-DM
//!    block-cipher hashes feeding an RSA-PKCS#1 v1.5 signature check.
//! 3. **Decision** ([`decision`]): signature, fingerprint, feature lookup,
//!    and license-model evaluation, exposed through [`LicenseVerifier`].
//! 4. **Projection** ([`info`]): an optional owned snapshot of the whole
//!    license tree for introspection (`get_info`).

pub mod cache;
pub mod clock;
pub mod decision;
pub mod fingerprint;
pub mod hash;
pub mod info;
pub mod parser;
pub mod pointer;
pub mod rsa;
pub mod version;
pub mod visitors;

pub use clock::{Clock, FixedClock};
pub use decision::LicenseVerifier;
pub use fingerprint::{DeviceId, Fingerprint};
pub use fit_domain::config::Config;
pub use fit_domain::error::{FitResult, Status};
pub use info::LicenseInfo;
pub use pointer::{MemoryPointer, SlicePointer};
pub use rsa::{RsaPublicKey, load_public_key_pem};
pub use version::get_version;

use fit_domain::registry::coord;
use visitors::InfoExtractVisitor;

/// Projects `license` into an owned [`LicenseInfo`] snapshot, without
/// touching the validation cache or re-checking the signature.
///
/// # Errors
/// Returns `Status::InvalidV2C` if the blob does not conform to the wire
/// schema, or `Status::InsufficientMemory` if the configured
/// `info_builder` limits are exceeded.
pub fn get_info<P: MemoryPointer>(license: &P, config: &Config) -> FitResult<LicenseInfo> {
    let mut visitor = InfoExtractVisitor::new(&config.info_builder);
    parser::parse_object(license, coord::V2C_LEVEL, 0, &mut visitor)?;
    Ok(visitor.into_info())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_version_matches_crate_metadata() {
        let (major, minor, patch) = get_version();
        assert_eq!((major, minor, patch), (0, 0, 0));
    }

    #[test]
    fn fresh_verifier_exposes_no_cached_entry() {
        let verifier = LicenseVerifier::new();
        // `Default`/`new` both yield an empty cache; exercised via `consume`'s
        // behavior in the integration suite, this just checks construction.
        drop(verifier);
    }
}
