//! Analyzer configuration

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`AnalyzerConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "VELLUM_MAX_DEPTH";

/// Tunables of the model analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Deepest nested-model level that may be analyzed. The top-level model
    /// is depth 0; a chain that needs depth `max_depth + 1` fails.
    pub max_depth: usize,
}

impl AnalyzerConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 5;

    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(MAX_DEPTH_ENV) {
            match raw.trim().parse() {
                Ok(max_depth) => config.max_depth = max_depth,
                Err(err) => tracing::warn!(
                    value = %raw,
                    error = %err,
                    "ignoring malformed {MAX_DEPTH_ENV}"
                ),
            }
        }

        config
    }

    /// Shallow models only (depth 2)
    #[must_use]
    pub fn strict() -> Self {
        Self { max_depth: 2 }
    }

    /// Deep aggregate graphs (depth 16)
    #[must_use]
    pub fn permissive() -> Self {
        Self { max_depth: 16 }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
