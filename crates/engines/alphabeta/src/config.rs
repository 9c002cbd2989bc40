//! Search tunables, loadable from TOML.
//!
//! ```toml
//! tt_bits = 22
//! time_divisor = 40
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::search::MAX_PLY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Transposition table holds 2^tt_bits entries
    pub tt_bits: u32,
    /// A turn may use `remaining / time_divisor` of the clock
    pub time_divisor: u32,
    /// Iterative deepening ceiling
    pub max_depth: i32,
    pub null_move_min_depth: i32,
    pub null_move_reduction: i32,
    /// Reverse futility pruning applies at or below this depth
    pub futility_max_depth: i32,
    /// Centipawns of margin per remaining ply
    pub futility_margin: i32,
    /// Quiescence plies allowed below the horizon
    pub max_qsearch_depth: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_bits: 20,
            time_divisor: 30,
            max_depth: 50,
            null_move_min_depth: 3,
            null_move_reduction: 2,
            futility_max_depth: 3,
            futility_margin: 120,
            max_qsearch_depth: 12,
        }
    }
}

impl EngineConfig {
    pub const TT_BITS_RANGE: std::ops::RangeInclusive<u32> = 10..=26;

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let half_ply = MAX_PLY as i32 / 2;
        let invalid = |field, reason: String| Err(ConfigError::Invalid { field, reason });

        if !Self::TT_BITS_RANGE.contains(&self.tt_bits) {
            return invalid("tt_bits", format!("{} is outside 10..=26", self.tt_bits));
        }
        if self.time_divisor == 0 {
            return invalid("time_divisor", "must be at least 1".to_string());
        }
        if !(1..=half_ply).contains(&self.max_depth) {
            return invalid("max_depth", format!("{} is outside 1..={half_ply}", self.max_depth));
        }
        if self.null_move_min_depth < 1 {
            return invalid("null_move_min_depth", "must be at least 1".to_string());
        }
        if self.null_move_reduction < 0 {
            return invalid("null_move_reduction", "must not be negative".to_string());
        }
        if self.futility_max_depth < 0 {
            return invalid("futility_max_depth", "must not be negative".to_string());
        }
        if self.futility_margin < 0 {
            return invalid("futility_margin", "must not be negative".to_string());
        }
        if !(0..=half_ply).contains(&self.max_qsearch_depth) {
            return invalid(
                "max_qsearch_depth",
                format!("{} is outside 0..={half_ply}", self.max_qsearch_depth),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
