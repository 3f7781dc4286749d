//! Per-field range checks (schema invariants 6-9).

use fit_domain::constants::{
    AES_ALGID, MAX_END_DATE_VALUE, MAX_FEATURE_ID_VALUE, MAX_LC_ID_VALUE, MAX_PRODUCT_ID_VALUE,
    MAX_START_DATE_VALUE, MAX_VENDOR_ID_VALUE, MIN_LICGEN_VERSION,
};
use fit_domain::error::{FitResult, Status};
use fit_domain::registry::{WireType, coord};

use crate::parser::{decode_data_tail_u32, decode_inline};
use crate::pointer::MemoryPointer;

use super::{FieldContext, ParseSignal, Visitor};

/// Decodes an integer field regardless of which wire form the encoder chose:
/// inline (2-byte descriptor, `/2-1` transform) or data-tail (4-byte, as-is).
fn decode_integer<P: MemoryPointer>(ctx: &FieldContext<'_, P>) -> FitResult<u32> {
    if ctx.length == 2 {
        Ok(u32::from(decode_inline(ctx.pointer)?))
    } else {
        decode_data_tail_u32(ctx.pointer)
    }
}

/// Checks every integer field the parser visits against the bound that
/// applies to its schema coordinate; fields with no registered bound pass
/// through untouched.
///
/// Note on the source's duplicate start-date check: the original validated
/// `start_date` twice and never actually checked `end_date`'s own bound.
/// Here the two checks are keyed off their own distinct field positions.
#[derive(Debug, Default)]
pub struct ValidateFieldVisitor;

impl<P: MemoryPointer> Visitor<P> for ValidateFieldVisitor {
    fn visit(&mut self, ctx: &FieldContext<'_, P>) -> FitResult<ParseSignal> {
        if ctx.wire_type != WireType::Integer {
            return Ok(ParseSignal::Continue);
        }

        match (ctx.depth, ctx.position) {
            (coord::HEADER_LEVEL, coord::LICGEN_VERSION_FIELD) => {
                if decode_integer(ctx)? < MIN_LICGEN_VERSION {
                    return Err(Status::InvalidLicgenVersion);
                }
            }
            (coord::SIGNATURE_LEVEL, coord::ALGORITHM_ID_FIELD) => {
                if decode_integer(ctx)? != AES_ALGID {
                    return Err(Status::InvalidSigId);
                }
            }
            (coord::LICENSE_CONTAINER_LEVEL, coord::LC_ID_FIELD) => {
                if decode_integer(ctx)? > MAX_LC_ID_VALUE {
                    return Err(Status::InvalidContainerId);
                }
            }
            (coord::VENDOR_LEVEL, coord::VENDOR_ID_FIELD) => {
                if decode_integer(ctx)? > MAX_VENDOR_ID_VALUE {
                    return Err(Status::InvalidVendorId);
                }
            }
            (coord::PRODUCT_LEVEL, coord::PRODUCT_ID_FIELD) => {
                if decode_integer(ctx)? > MAX_PRODUCT_ID_VALUE {
                    return Err(Status::InvalidProductId);
                }
            }
            (coord::FEATURE_LEVEL, coord::ID_FEATURE_FIELD) => {
                if decode_integer(ctx)? > MAX_FEATURE_ID_VALUE {
                    return Err(Status::InvalidFeatureId);
                }
            }
            (coord::LIC_PROP_LEVEL, coord::START_DATE_FIELD) => {
                let v = decode_integer(ctx)?;
                if v == 0 || v > MAX_START_DATE_VALUE {
                    return Err(Status::InvalidStartDate);
                }
            }
            (coord::LIC_PROP_LEVEL, coord::END_DATE_FIELD) => {
                let v = decode_integer(ctx)?;
                if v == 0 || v > MAX_END_DATE_VALUE {
                    return Err(Status::InvalidEndDate);
                }
            }
            _ => {}
        }

        Ok(ParseSignal::Continue)
    }
}
