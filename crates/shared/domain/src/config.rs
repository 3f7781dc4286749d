//! Engine-wide configuration.
//!
//! Unlike the parsed license tree, this is host-supplied: a handful of knobs
//! the embedding application sets once at verifier construction time. Follows
//! the same `#[serde(default)]`-per-struct layering used elsewhere in this
//! workspace so a partial TOML/JSON override only touches the fields it names.

use serde::Deserialize;

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether this build enforces node-locking (device fingerprint) checks.
    ///
    /// When `false`, a license carrying a fingerprint field is rejected with
    /// `NodeLockingNotSupported` rather than silently accepted.
    pub node_locking_supported: bool,
    /// Arena sizing for the info builder.
    pub info_builder: InfoBuilderConfig,
    /// Schema registry bounds; only useful to override in tests that probe
    /// out-of-range coordinates.
    pub schema: SchemaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_locking_supported: true,
            info_builder: InfoBuilderConfig::default(),
            schema: SchemaConfig::default(),
        }
    }
}

/// Sizing for the fixed-capacity arena the info visitor projects fields into.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InfoBuilderConfig {
    /// Maximum number of license properties (features) the arena can hold
    /// per `get_info` call before returning `InsufficientMemory`.
    pub max_properties: usize,
    /// Maximum number of counters the arena can hold per license property.
    pub max_counters: usize,
}

impl Default for InfoBuilderConfig {
    fn default() -> Self {
        Self { max_properties: 32, max_counters: 8 }
    }
}

/// Bounds of the frozen schema registry. These match [`crate::constants::MAX_LEVEL`]
/// and [`crate::constants::MAX_INDEX`] and exist as config only so tests can
/// exercise out-of-bounds coordinates without touching the compile-time tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub max_level: u8,
    pub max_index: u8,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_level: crate::constants::MAX_LEVEL as u8,
            max_index: crate::constants::MAX_INDEX as u8,
        }
    }
}
