//! Showcase aggregate
//!
//! Owns one instance of every demo component, built from a single
//! `ShowcaseConfig`. The deferred-value cells live as long as this value.

use crate::classify::PrimitivePatternDemo;
use crate::context::ScopedValuesDemo;
use crate::deferred::StableValuesDemo;
use crate::fanout::StructuredConcurrencyDemo;
use crate::modules::ModuleImportDemo;
use crate::types::Latency;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Labels for the showcased features, in presentation order
pub const FEATURES: [&str; 8] = [
    "Primitive Types in Patterns (Preview)",
    "Module Import Declarations",
    "Scoped Values",
    "Structured Concurrency",
    "Stable Values (Preview)",
    "Instance Main Methods",
    "Compact Object Headers",
    "JDK Flight Recorder Enhancements",
];

/// Service banner
pub const APPLICATION: &str = "Java 25 Features Demo";

/// Demo component configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Simulated worker latencies
    pub latency: Latency,
    /// Deadline for `fetch_with_timeout`, in milliseconds
    pub deadline_ms: u64,
}

impl ShowcaseConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with every simulated delay disabled
    #[inline]
    #[must_use]
    pub fn fast() -> Self {
        Self::default().with_latency(Latency::zero())
    }

    /// With latency profile
    #[inline]
    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// With fan-out deadline
    #[inline]
    #[must_use]
    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = deadline_ms;
        self
    }

    /// Deadline as a duration
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            latency: Latency::default(),
            deadline_ms: 5_000,
        }
    }
}

/// All demo components behind one handle
#[derive(Debug)]
pub struct Showcase {
    config: ShowcaseConfig,
    primitives: PrimitivePatternDemo,
    scoped: ScopedValuesDemo,
    structured: StructuredConcurrencyDemo,
    stable: StableValuesDemo,
    modules: ModuleImportDemo,
}

impl Showcase {
    /// Build every component from `config`
    #[must_use]
    pub fn new(config: ShowcaseConfig) -> Self {
        tracing::info!(deadline_ms = config.deadline_ms, "building showcase components");
        Self {
            config,
            primitives: PrimitivePatternDemo::new(),
            scoped: ScopedValuesDemo::new(),
            structured: StructuredConcurrencyDemo::new(config.latency, config.deadline()),
            stable: StableValuesDemo::new(config.latency),
            modules: ModuleImportDemo::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn primitives(&self) -> &PrimitivePatternDemo {
        &self.primitives
    }

    #[inline]
    #[must_use]
    pub fn scoped(&self) -> &ScopedValuesDemo {
        &self.scoped
    }

    #[inline]
    #[must_use]
    pub fn structured(&self) -> &StructuredConcurrencyDemo {
        &self.structured
    }

    #[inline]
    #[must_use]
    pub fn stable(&self) -> &StableValuesDemo {
        &self.stable
    }

    #[inline]
    #[must_use]
    pub fn modules(&self) -> &ModuleImportDemo {
        &self.modules
    }
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new(ShowcaseConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_builders() {
        let config = ShowcaseConfig::new().with_deadline_ms(250);
        assert_eq!(config.deadline(), Duration::from_millis(250));
        assert_eq!(config.latency, Latency::default());

        assert_eq!(ShowcaseConfig::fast().latency, Latency::zero());
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: ShowcaseConfig =
            serde_json::from_str(r#"{"latency": {"cache_ms": 5}}"#).unwrap();

        assert_eq!(config.deadline_ms, 5_000);
        assert_eq!(config.latency.cache_ms, 5);
        assert_eq!(config.latency.api_ms, Latency::default().api_ms);
    }

    #[tokio::test]
    async fn components_share_config() {
        let showcase = Showcase::new(ShowcaseConfig::fast().with_deadline_ms(10));

        assert_eq!(showcase.structured().deadline(), Duration::from_millis(10));
        let summary = showcase.structured().aggregate_data("ventas").await.unwrap();
        assert_eq!(summary.count, 42);
        assert_eq!(showcase.stable().init_counts().expensive, 0);
    }

    #[test]
    fn eight_features() {
        assert_eq!(FEATURES.len(), 8);
        assert!(FEATURES.iter().any(|f| f.contains("Stable Values")));
    }
}
