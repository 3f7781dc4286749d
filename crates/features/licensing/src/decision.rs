//! The license-decision engine: signature verification, fingerprint
//! binding, feature lookup, and license-model evaluation.

use fit_domain::config::Config;
use fit_domain::error::{FitResult, Status};
use fit_domain::registry::{WireType, coord};

use crate::cache::ValidationCache;
use crate::clock::Clock;
use crate::fingerprint::{DeviceId, Fingerprint};
use crate::hash::abreast::abreast_dm_hash;
use crate::hash::dm::dm_hash;
use crate::parser::{decode_inline, parse_object};
use crate::pointer::MemoryPointer;
use crate::rsa::{RsaPublicKey, verify_abreast_dm_signature};
use crate::visitors::{
    AddressCaptureVisitor, ConsumeVisitor, FieldContext, ParseSignal, ValidateFieldVisitor, Visitor,
};

/// Owns the single-slot validation cache across repeated `consume` calls
/// against the same license. Plain and unsynchronized by design: an
/// embedder sharing one across threads wraps it in its own mutex.
#[derive(Debug, Clone, Default)]
pub struct LicenseVerifier {
    cache: ValidationCache,
}

struct LicPropFields {
    perpetual: Option<bool>,
    start_date: Option<u32>,
    end_date: Option<u32>,
    duration_from_first_use: Option<u32>,
}

struct LicPropVisitor {
    fields: LicPropFields,
}

impl<P: MemoryPointer> Visitor<P> for LicPropVisitor {
    fn visit(&mut self, ctx: &FieldContext<'_, P>) -> FitResult<ParseSignal> {
        if ctx.wire_type != WireType::Integer {
            return Ok(ParseSignal::Continue);
        }
        let value = u32::from(decode_inline(ctx.pointer)?);
        match (ctx.depth, ctx.position) {
            (coord::LIC_PROP_LEVEL, coord::PERPETUAL_FIELD) => self.fields.perpetual = Some(value != 0),
            (coord::LIC_PROP_LEVEL, coord::START_DATE_FIELD) => self.fields.start_date = Some(value),
            (coord::LIC_PROP_LEVEL, coord::END_DATE_FIELD) => self.fields.end_date = Some(value),
            (coord::LIC_PROP_LEVEL, coord::DURATION_FROM_FIRST_USE_FIELD) => {
                self.fields.duration_from_first_use = Some(value);
            }
            _ => {}
        }
        Ok(ParseSignal::Continue)
    }
}

fn capture<P: MemoryPointer + Clone>(
    license: &P,
    depth: u8,
    position: u8,
) -> FitResult<Option<(P, u32)>> {
    let mut visitor = AddressCaptureVisitor::new(depth, position);
    parse_object(license, coord::V2C_LEVEL, 0, &mut visitor)?;
    Ok(visitor.into_captured())
}

/// Walks the whole tree checking every field against its schema bounds,
/// independent of signature caching: the original re-ran these checks on
/// every `consume`/`validate_license` call, cache hit or not.
fn validate_fields<P: MemoryPointer>(license: &P) -> FitResult<()> {
    let mut visitor = ValidateFieldVisitor;
    parse_object(license, coord::V2C_LEVEL, 0, &mut visitor)?;
    Ok(())
}

impl LicenseVerifier {
    #[must_use]
    pub fn new() -> Self {
        Self { cache: ValidationCache::new() }
    }

    /// Verifies `license`'s signature (using the cache fast-path when
    /// `check_cache` is set), then the device fingerprint if present.
    /// Returns the license body's captured pointer and length on success.
    fn verify_pipeline<P: MemoryPointer + Clone>(
        &mut self,
        license: &P,
        key: &RsaPublicKey,
        device: Option<&dyn DeviceId>,
        config: &Config,
        check_cache: bool,
    ) -> FitResult<(P, u32)> {
        validate_fields(license)?;

        let (body_ptr, body_len) = capture(license, coord::V2C_LEVEL, coord::LICENSE_FIELD)?
            .ok_or(Status::InvalidV2C)?;
        let body_bytes = body_ptr.read_vec(0, body_len)?;
        let dm = dm_hash(&body_bytes);

        let already_validated = check_cache && self.cache.hit(&dm);
        if already_validated {
            tracing::debug!("signature check skipped, license body matches cached digest");
        } else {
            let (sig_ptr, sig_len) =
                capture(license, coord::SIGNATURE_LEVEL, coord::RSA_SIGNATURE_FIELD)?
                    .ok_or(Status::InvalidV2C)?;
            let signature = sig_ptr.read_vec(0, sig_len)?;
            let digest = abreast_dm_hash(&body_bytes);

            match verify_abreast_dm_signature(key, &digest, &signature) {
                Ok(()) => {
                    tracing::trace!("rsa signature verified");
                    self.cache.record_validated(dm);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "rsa signature verification failed");
                    self.cache.clear();
                    return Err(e);
                }
            }
        }

        if let Some((fp_ptr, fp_len)) = capture(license, coord::HEADER_LEVEL, coord::FINGERPRINT_FIELD)? {
            if !config.node_locking_supported {
                tracing::warn!("license carries a fingerprint but node-locking is disabled");
                self.cache.clear();
                return Err(Status::NodeLockingNotSupported);
            }
            let fp_bytes = fp_ptr.read_vec(0, fp_len)?;
            let fingerprint = Fingerprint::parse(&fp_bytes)?;
            let device = device.ok_or(Status::InvalidDeviceLength)?;
            if let Err(e) = fingerprint.verify_device(device) {
                tracing::warn!(error = %e, "device fingerprint mismatch");
                self.cache.clear();
                return Err(e);
            }
            tracing::trace!("device fingerprint matched");
        }

        Ok((body_ptr, body_len))
    }

    fn evaluate_lic_prop<P: MemoryPointer>(
        lic_prop_ptr: &P,
        clock: Option<&dyn Clock>,
    ) -> FitResult<Status> {
        let mut visitor = LicPropVisitor {
            fields: LicPropFields {
                perpetual: None,
                start_date: None,
                end_date: None,
                duration_from_first_use: None,
            },
        };
        parse_object(lic_prop_ptr, coord::LIC_PROP_LEVEL, 0, &mut visitor)?;
        let fields = visitor.fields;

        if fields.perpetual == Some(true) {
            if let Some(start_date) = fields.start_date {
                if let Some(clock) = clock {
                    if clock.now_unix() < start_date {
                        return Ok(Status::InactiveLicense);
                    }
                }
            }
            return Ok(Status::Ok);
        }

        if let Some(end_date) = fields.end_date {
            let Some(clock) = clock else { return Err(Status::NoClockSupport) };
            let now = clock.now_unix();
            if let Some(start_date) = fields.start_date {
                if now < start_date {
                    return Ok(Status::InactiveLicense);
                }
            }
            if now >= end_date {
                return Ok(Status::FeatureExpired);
            }
            return Ok(Status::Ok);
        }

        if fields.duration_from_first_use.is_some() {
            return Ok(Status::InvalidLicenseType);
        }

        Ok(Status::InvalidLicenseType)
    }

    fn run_consume<P: MemoryPointer + Clone>(
        &mut self,
        license: &P,
        feature_id: u32,
        key: &RsaPublicKey,
        clock: Option<&dyn Clock>,
        device: Option<&dyn DeviceId>,
        config: &Config,
    ) -> FitResult<Status> {
        self.verify_pipeline(license, key, device, config, true)?;

        let mut visitor: ConsumeVisitor<P> = ConsumeVisitor::new(feature_id);
        parse_object(license, coord::V2C_LEVEL, 0, &mut visitor)?;
        let Some(lic_prop_ptr) = visitor.into_found() else {
            tracing::debug!(feature_id, "feature id not present in license");
            return Err(Status::FeatureNotFound);
        };

        let status = Self::evaluate_lic_prop(&lic_prop_ptr, clock)?;
        tracing::debug!(feature_id, ?status, "feature evaluated");
        Ok(status)
    }

    /// Answers whether `feature_id` is currently permitted by `license`.
    ///
    /// Returns `Status::Ok` on success; every other variant reports the
    /// reason the feature is denied.
    pub fn consume<P: MemoryPointer + Clone>(
        &mut self,
        license: &P,
        feature_id: u32,
        key: &RsaPublicKey,
        clock: Option<&dyn Clock>,
        device: Option<&dyn DeviceId>,
        config: &Config,
    ) -> Status {
        let status = match self.run_consume(license, feature_id, key, clock, device, config) {
            Ok(status) | Err(status) => status,
        };
        if status != Status::Ok {
            tracing::warn!(feature_id, ?status, "consume denied");
        }
        status
    }

    fn run_validate<P: MemoryPointer + Clone>(
        &mut self,
        license: &P,
        key: &RsaPublicKey,
        device: Option<&dyn DeviceId>,
        config: &Config,
    ) -> FitResult<Status> {
        self.verify_pipeline(license, key, device, config, false)?;
        Ok(Status::Ok)
    }

    /// Verifies `license`'s signature and fingerprint without looking up a
    /// feature; always bypasses the cache fast-path.
    pub fn validate_license<P: MemoryPointer + Clone>(
        &mut self,
        license: &P,
        key: &RsaPublicKey,
        device: Option<&dyn DeviceId>,
        config: &Config,
    ) -> Status {
        let status = match self.run_validate(license, key, device, config) {
            Ok(status) | Err(status) => status,
        };
        if status != Status::Ok {
            tracing::warn!(?status, "validate_license denied");
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_verifier_has_empty_cache() {
        let verifier = LicenseVerifier::new();
        assert!(!verifier.cache.hit(&[0u8; 16]));
    }
}
