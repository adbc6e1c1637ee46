//! Tracer settings.

use serde::{Deserialize, Serialize};

/// Settings for one trace session.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Recursion budget. The primary ray starts here; depth 0 is black.
    pub max_depth: u32,
    /// Minimum `t` of reflection and refraction rays
    pub secondary_epsilon: f32,
    /// Maximum `t` of reflection and refraction rays
    pub secondary_t_max: f32,
    /// Shadow rays start at `distance * shadow_epsilon_ratio`
    pub shadow_epsilon_ratio: f32,
    /// Rows between progress log lines
    pub progress_interval: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            secondary_epsilon: 1e-4,
            secondary_t_max: 1e6,
            shadow_epsilon_ratio: 1e-6,
            progress_interval: 64,
        }
    }
}
