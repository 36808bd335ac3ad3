//! Data-driven game tuning
//!
//! Everything the arena builder and the demo loop parameterize lives here so
//! a deployment can override it from JSON without recompiling. The sim's
//! per-entity constants stay in `consts` - these are the knobs an integrator
//! is expected to turn.

use serde::{Deserialize, Serialize};

/// Game tuning settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Map edge length in tiles
    pub map_size: usize,
    /// RNG seed for ground-texture assignment and effect scatter
    pub seed: u64,

    // === Presentation hints (consumed by the renderer, not the sim) ===
    /// Particle effects enabled
    pub particles: bool,
    /// Upper bound on live particles across all effects
    pub max_particles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_size: crate::consts::MAP_SIZE,
            seed: 0xA11E7,
            particles: true,
            max_particles: 256,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
