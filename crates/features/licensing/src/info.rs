//! Owned projection of a parsed license, built by [`crate::visitors::InfoExtractVisitor`].
//!
//! A plain Rust struct tree (`Vec`/`String` fields) stands in for the
//! original's arena-backed record: ownership here is the arena — the whole
//! tree is dropped together, with no paired free call needed.

/// A fully materialized license, navigable container → vendor → product →
/// part → feature/counter, as seen by [`crate::visitors::InfoExtractVisitor`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseInfo {
    pub licgen_version: u32,
    pub lm_version: u32,
    pub uid: String,
    pub vendors: Vec<VendorInfo>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorInfo {
    pub vendor_id: u32,
    pub vendor_name: Option<String>,
    pub product: Option<ProductInfo>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInfo {
    pub product_id: u32,
    pub version_regex: String,
    pub parts: Vec<PartInfo>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartInfo {
    pub part_id: u32,
    pub lic_prop: Option<LicPropInfo>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicPropInfo {
    pub perpetual: Option<bool>,
    pub start_date: Option<u32>,
    pub end_date: Option<u32>,
    pub duration_from_first_use: Option<u32>,
    pub features: Vec<u32>,
    pub counters: Vec<CounterInfo>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterInfo {
    pub counter_id: u32,
    pub limit: u32,
    pub soft_limit: u32,
    pub is_field: u32,
}
