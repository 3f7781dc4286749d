//! The frozen schema registry.
//!
//! The wire format has no self-describing type tags beyond a single odd/even
//! bit per field descriptor (inline integer vs. "data tail"); everything else
//! about a field's shape and meaning is implied by its `(depth, position)`
//! coordinate. This module is the compile-time table that maps those
//! coordinates to a [`WireType`] and a human-readable [`FieldId`].
//!
//! Depth and position form a single shared space *per depth*: sibling object
//! types that occur at the same depth (e.g. `License` and `Signature`, both
//! at depth 1) occupy disjoint position ranges within that one 16-wide row.
//! A recursive descent into any object or array element always starts its
//! own field counter at whatever position the caller handed it (0, for every
//! array element); the wire format's field-descriptor skip mechanism is what
//! fast-forwards that counter to the object's real starting position before
//! any field is actually read. See the parser module for the walk itself.

use crate::constants::{MAX_INDEX, MAX_LEVEL};

/// The shape of a field's payload, as implied by its schema coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// Inline 16-bit integer, no data-tail entry.
    Integer,
    /// Length-prefixed byte string in the data tail (UID, fingerprint, RSA signature, regex).
    String,
    /// Nested object: recurses via `fit_parse_object`.
    Object,
    /// Homogeneous array of objects: recurses via `fit_parse_array`.
    Array,
    /// Coordinate is not part of the schema.
    Invalid,
}

/// Semantic name of a schema field, independent of its structural coordinate.
///
/// Several coordinates across different parent objects carry the same
/// semantic role (an "id" field, for instance); they are named distinctly
/// here for readability even where the original registered them under a
/// shared numeric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FieldId {
    License,
    Signature,
    Header,
    LicenseContainer,
    AlgorithmId,
    RsaSignature,
    LicgenVersion,
    LmVersion,
    Uid,
    Fingerprint,
    LcId,
    Vendor,
    VendorId,
    Product,
    VendorName,
    ProductId,
    VersionRegex,
    ProductPart,
    PartId,
    LicProp,
    Feature,
    Perpetual,
    StartDate,
    EndDate,
    Counter,
    DurationFromFirstUse,
    FeatureId,
    CounterId,
    Limit,
    SoftLimit,
    Is,
}

/// Depth + position constants, named after the schema level they index into.
///
/// These mirror the original's `STRUCT_*_LEVEL` / `*_FIELD` defines one for
/// one; they are the vocabulary the parser, visitors, and decision engine use
/// to address specific fields instead of writing raw integer coordinates.
pub mod coord {
    pub const V2C_LEVEL: u8 = 0;
    pub const LICENSE_FIELD: u8 = 0;
    pub const SIGNATURE_FIELD: u8 = 1;

    pub const LICENSE_LEVEL: u8 = 1;
    pub const HEADER_FIELD: u8 = 0;
    pub const LICENSE_CONTAINER_FIELD: u8 = 1;

    pub const SIGNATURE_LEVEL: u8 = 1;
    pub const ALGORITHM_ID_FIELD: u8 = 2;
    pub const RSA_SIGNATURE_FIELD: u8 = 3;

    pub const HEADER_LEVEL: u8 = 2;
    pub const LICGEN_VERSION_FIELD: u8 = 0;
    pub const LM_VERSION_FIELD: u8 = 1;
    pub const UID_FIELD: u8 = 2;
    pub const FINGERPRINT_FIELD: u8 = 3;

    pub const LICENSE_CONTAINER_LEVEL: u8 = 2;
    pub const LC_ID_FIELD: u8 = 4;
    pub const VENDOR_FIELD: u8 = 5;

    pub const VENDOR_LEVEL: u8 = 3;
    pub const VENDOR_ID_FIELD: u8 = 0;
    pub const PRODUCT_FIELD: u8 = 1;
    pub const VENDOR_NAME_FIELD: u8 = 2;

    pub const PRODUCT_LEVEL: u8 = 4;
    pub const PRODUCT_ID_FIELD: u8 = 0;
    pub const VERSION_REGEX_FIELD: u8 = 1;
    pub const PRODUCT_PART_FIELD: u8 = 2;

    pub const PRODUCT_PART_LEVEL: u8 = 5;
    pub const PART_ID_FIELD: u8 = 0;
    pub const LIC_PROP_FIELD: u8 = 1;

    pub const LIC_PROP_LEVEL: u8 = 6;
    pub const FEATURE_FIELD: u8 = 0;
    pub const PERPETUAL_FIELD: u8 = 1;
    pub const START_DATE_FIELD: u8 = 2;
    pub const END_DATE_FIELD: u8 = 3;
    pub const COUNTER_FIELD: u8 = 4;
    pub const DURATION_FROM_FIRST_USE_FIELD: u8 = 5;

    pub const FEATURE_LEVEL: u8 = 7;
    pub const ID_FEATURE_FIELD: u8 = 0;

    pub const COUNTER_LEVEL: u8 = 7;
    pub const ID_COUNTER_FIELD: u8 = 2;
    pub const LIMIT_FIELD: u8 = 3;
    pub const SOFT_LIMIT_FIELD: u8 = 4;
    pub const IS_FIELD: u8 = 5;
}

use coord::*;

const fn blank_wire_table() -> [[WireType; MAX_INDEX]; MAX_LEVEL] {
    [[WireType::Invalid; MAX_INDEX]; MAX_LEVEL]
}

/// `wire_type[depth][position]`, frozen at compile time.
///
/// Built by hand below rather than through a runtime `register_*` call: the
/// table is fixed for the lifetime of the schema, so there is no reason to
/// pay for registration on every verifier construction.
pub const WIRE_TYPE: [[WireType; MAX_INDEX]; MAX_LEVEL] = {
    let mut t = blank_wire_table();
    t[V2C_LEVEL as usize][LICENSE_FIELD as usize] = WireType::Object;
    // Array-of-one: the V2C's one signature lives in a single-element array.
    t[V2C_LEVEL as usize][SIGNATURE_FIELD as usize] = WireType::Array;

    t[LICENSE_LEVEL as usize][HEADER_FIELD as usize] = WireType::Object;
    // Array-of-one, same convention as `signature`.
    t[LICENSE_LEVEL as usize][LICENSE_CONTAINER_FIELD as usize] = WireType::Array;
    t[SIGNATURE_LEVEL as usize][ALGORITHM_ID_FIELD as usize] = WireType::Integer;
    t[SIGNATURE_LEVEL as usize][RSA_SIGNATURE_FIELD as usize] = WireType::String;

    t[HEADER_LEVEL as usize][LICGEN_VERSION_FIELD as usize] = WireType::Integer;
    t[HEADER_LEVEL as usize][LM_VERSION_FIELD as usize] = WireType::Integer;
    t[HEADER_LEVEL as usize][UID_FIELD as usize] = WireType::String;
    t[HEADER_LEVEL as usize][FINGERPRINT_FIELD as usize] = WireType::String;
    t[LICENSE_CONTAINER_LEVEL as usize][LC_ID_FIELD as usize] = WireType::Integer;
    t[LICENSE_CONTAINER_LEVEL as usize][VENDOR_FIELD as usize] = WireType::Array;

    t[VENDOR_LEVEL as usize][VENDOR_ID_FIELD as usize] = WireType::Integer;
    t[VENDOR_LEVEL as usize][PRODUCT_FIELD as usize] = WireType::Object;
    t[VENDOR_LEVEL as usize][VENDOR_NAME_FIELD as usize] = WireType::String;

    t[PRODUCT_LEVEL as usize][PRODUCT_ID_FIELD as usize] = WireType::Integer;
    t[PRODUCT_LEVEL as usize][VERSION_REGEX_FIELD as usize] = WireType::String;
    t[PRODUCT_LEVEL as usize][PRODUCT_PART_FIELD as usize] = WireType::Array;

    t[PRODUCT_PART_LEVEL as usize][PART_ID_FIELD as usize] = WireType::Integer;
    t[PRODUCT_PART_LEVEL as usize][LIC_PROP_FIELD as usize] = WireType::Object;

    t[LIC_PROP_LEVEL as usize][FEATURE_FIELD as usize] = WireType::Array;
    t[LIC_PROP_LEVEL as usize][PERPETUAL_FIELD as usize] = WireType::Integer;
    t[LIC_PROP_LEVEL as usize][START_DATE_FIELD as usize] = WireType::Integer;
    t[LIC_PROP_LEVEL as usize][END_DATE_FIELD as usize] = WireType::Integer;
    t[LIC_PROP_LEVEL as usize][COUNTER_FIELD as usize] = WireType::Array;
    t[LIC_PROP_LEVEL as usize][DURATION_FROM_FIRST_USE_FIELD as usize] = WireType::Integer;

    t[FEATURE_LEVEL as usize][ID_FEATURE_FIELD as usize] = WireType::Integer;
    t[COUNTER_LEVEL as usize][ID_COUNTER_FIELD as usize] = WireType::Integer;
    t[COUNTER_LEVEL as usize][LIMIT_FIELD as usize] = WireType::Integer;
    t[COUNTER_LEVEL as usize][SOFT_LIMIT_FIELD as usize] = WireType::Integer;
    t[COUNTER_LEVEL as usize][IS_FIELD as usize] = WireType::Integer;

    t
};

/// Look up the wire type registered at a given depth/position coordinate.
///
/// Returns [`WireType::Invalid`] for any coordinate outside the registered
/// schema, or outside the table's bounds entirely.
#[must_use]
pub fn wire_type_at(level: u8, index: u8) -> WireType {
    let (level, index) = (level as usize, index as usize);
    if level >= MAX_LEVEL || index >= MAX_INDEX {
        return WireType::Invalid;
    }
    WIRE_TYPE[level][index]
}

/// Look up the semantic field id registered at a given depth/position
/// coordinate, if any. Used by the info builder and diagnostics; the parser
/// and decision engine address fields by [`coord`] constant directly.
#[must_use]
pub fn field_id_at(level: u8, index: u8) -> Option<FieldId> {
    match (level, index) {
        (V2C_LEVEL, LICENSE_FIELD) => Some(FieldId::License),
        (V2C_LEVEL, SIGNATURE_FIELD) => Some(FieldId::Signature),
        (LICENSE_LEVEL, HEADER_FIELD) => Some(FieldId::Header),
        (LICENSE_LEVEL, LICENSE_CONTAINER_FIELD) => Some(FieldId::LicenseContainer),
        (SIGNATURE_LEVEL, ALGORITHM_ID_FIELD) => Some(FieldId::AlgorithmId),
        (SIGNATURE_LEVEL, RSA_SIGNATURE_FIELD) => Some(FieldId::RsaSignature),
        (HEADER_LEVEL, LICGEN_VERSION_FIELD) => Some(FieldId::LicgenVersion),
        (HEADER_LEVEL, LM_VERSION_FIELD) => Some(FieldId::LmVersion),
        (HEADER_LEVEL, UID_FIELD) => Some(FieldId::Uid),
        (HEADER_LEVEL, FINGERPRINT_FIELD) => Some(FieldId::Fingerprint),
        (LICENSE_CONTAINER_LEVEL, LC_ID_FIELD) => Some(FieldId::LcId),
        (LICENSE_CONTAINER_LEVEL, VENDOR_FIELD) => Some(FieldId::Vendor),
        (VENDOR_LEVEL, VENDOR_ID_FIELD) => Some(FieldId::VendorId),
        (VENDOR_LEVEL, PRODUCT_FIELD) => Some(FieldId::Product),
        (VENDOR_LEVEL, VENDOR_NAME_FIELD) => Some(FieldId::VendorName),
        (PRODUCT_LEVEL, PRODUCT_ID_FIELD) => Some(FieldId::ProductId),
        (PRODUCT_LEVEL, VERSION_REGEX_FIELD) => Some(FieldId::VersionRegex),
        (PRODUCT_LEVEL, PRODUCT_PART_FIELD) => Some(FieldId::ProductPart),
        (PRODUCT_PART_LEVEL, PART_ID_FIELD) => Some(FieldId::PartId),
        (PRODUCT_PART_LEVEL, LIC_PROP_FIELD) => Some(FieldId::LicProp),
        (LIC_PROP_LEVEL, FEATURE_FIELD) => Some(FieldId::Feature),
        (LIC_PROP_LEVEL, PERPETUAL_FIELD) => Some(FieldId::Perpetual),
        (LIC_PROP_LEVEL, START_DATE_FIELD) => Some(FieldId::StartDate),
        (LIC_PROP_LEVEL, END_DATE_FIELD) => Some(FieldId::EndDate),
        (LIC_PROP_LEVEL, COUNTER_FIELD) => Some(FieldId::Counter),
        (LIC_PROP_LEVEL, DURATION_FROM_FIRST_USE_FIELD) => Some(FieldId::DurationFromFirstUse),
        (FEATURE_LEVEL, ID_FEATURE_FIELD) => Some(FieldId::FeatureId),
        (COUNTER_LEVEL, ID_COUNTER_FIELD) => Some(FieldId::CounterId),
        (COUNTER_LEVEL, LIMIT_FIELD) => Some(FieldId::Limit),
        (COUNTER_LEVEL, SOFT_LIMIT_FIELD) => Some(FieldId::SoftLimit),
        (COUNTER_LEVEL, IS_FIELD) => Some(FieldId::Is),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_coordinates_resolve() {
        assert_eq!(wire_type_at(V2C_LEVEL, LICENSE_FIELD), WireType::Object);
        assert_eq!(wire_type_at(LIC_PROP_LEVEL, START_DATE_FIELD), WireType::Integer);
        assert_eq!(wire_type_at(PRODUCT_LEVEL, PRODUCT_PART_FIELD), WireType::Array);
        assert_eq!(field_id_at(SIGNATURE_LEVEL, RSA_SIGNATURE_FIELD), Some(FieldId::RsaSignature));
    }

    #[test]
    fn unknown_coordinates_are_invalid() {
        assert_eq!(wire_type_at(LIC_PROP_LEVEL, 15), WireType::Invalid);
        assert_eq!(field_id_at(LIC_PROP_LEVEL, 15), None);
    }

    #[test]
    fn out_of_bounds_coordinates_do_not_panic() {
        assert_eq!(wire_type_at(200, 200), WireType::Invalid);
    }

    #[test]
    fn sibling_objects_share_the_depth_one_position_space() {
        // License (positions 0-1) and Signature (positions 2-3) both live at depth 1,
        // in one shared row, not in independent per-type tables.
        assert_eq!(wire_type_at(LICENSE_LEVEL, HEADER_FIELD), WireType::Object);
        assert_eq!(wire_type_at(SIGNATURE_LEVEL, ALGORITHM_ID_FIELD), WireType::Integer);
    }
}
