//! Resource limits applied while decoding untrusted programs.
//!
//! Limits are plain data: they can be embedded in a host's configuration
//! file through `serde` (missing fields fall back to the standard profile)
//! and every decoder checks them with [`DecodeLimits::validate`] first.

use serde::{Deserialize, Serialize};

/// Default maximum number of nodes in a program.
pub const DEFAULT_MAX_NODES: usize = 8_000_000;

/// Default maximum size of a program or witness byte string (4 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;

/// Error surfaced by [`DecodeLimits::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A limit that must be positive was zero.
    #[error("limit `{field}` must be greater than zero")]
    ZeroLimit {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Limits enforced by the decoders and the program pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Maximum number of nodes a program may declare.
    pub max_nodes: usize,
    /// Maximum program size in bytes.
    pub max_program_bytes: usize,
    /// Maximum witness size in bytes.
    pub max_witness_bytes: usize,
    /// Optional upper bound on program cost in milli weight units.
    pub cost_budget: Option<u32>,
}

impl DecodeLimits {
    /// Standard profile: generous limits and no cost budget.
    pub const STANDARD: DecodeLimits = DecodeLimits {
        max_nodes: DEFAULT_MAX_NODES,
        max_program_bytes: DEFAULT_MAX_INPUT_BYTES,
        max_witness_bytes: DEFAULT_MAX_INPUT_BYTES,
        cost_budget: None,
    };

    /// Tight profile for services decoding programs from the network.
    pub const fn strict() -> Self {
        DecodeLimits {
            max_nodes: 65_536,
            max_program_bytes: 64 * 1024,
            max_witness_bytes: 64 * 1024,
            cost_budget: Some(4_000_000),
        }
    }

    /// Returns a copy with the given cost budget.
    pub fn with_cost_budget(mut self, budget: u32) -> Self {
        self.cost_budget = Some(budget);
        self
    }

    /// Checks that every limit is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("max_nodes", self.max_nodes),
            ("max_program_bytes", self.max_program_bytes),
            ("max_witness_bytes", self.max_witness_bytes),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::ZeroLimit { field });
            }
        }
        if self.cost_budget == Some(0) {
            return Err(ConfigError::ZeroLimit {
                field: "cost_budget",
            });
        }
        Ok(())
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}
