//! Showcase Core - feature demo components
//!
//! Five small components behind one `Showcase` handle:
//! - `classify`: pattern matching over tagged primitive values
//! - `context`: explicit scoped context with inherited and bare workers
//! - `fanout`: structured fan-out/join with fail-fast and deadlines
//! - `deferred`: write-once cells with at-most-once initialization
//! - `modules`: module import declarations, as static text
//!
//! # Example
//!
//! ```rust,ignore
//! use showcase_core::{Scalar, Showcase, ShowcaseConfig};
//!
//! # async fn example() -> showcase_core::Result<()> {
//! let showcase = Showcase::new(ShowcaseConfig::fast());
//!
//! let label = showcase.primitives().process_primitive(&Scalar::Int(150));
//! assert_eq!(label, "Integer grande: 150");
//!
//! let summary = showcase.structured().aggregate_data("ventas").await?;
//! println!("{} items", summary.count);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod classify;
pub mod context;
pub mod deferred;
pub mod error;
pub mod fanout;
pub mod modules;
pub mod showcase;
pub mod types;

// Re-exports for convenience
pub use classify::PrimitivePatternDemo;
pub use context::{Context, ContextKey, ScopedValuesDemo, SpawnMode};
pub use deferred::{InitCounts, RaceReport, StableValue, StableValuesDemo};
pub use error::{Result, ShowcaseError};
pub use fanout::{ScopedHandle, StructuredConcurrencyDemo, TaskGroup};
pub use modules::ModuleImportDemo;
pub use showcase::{Showcase, ShowcaseConfig, APPLICATION, FEATURES};
pub use types::{DatabaseConnection, ExpensiveResult, Latency, Scalar, Summary};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the showcase components
    pub use crate::{
        Context, Latency, Scalar, ShowcaseError, Showcase, ShowcaseConfig, SpawnMode,
        StableValue, Summary, TaskGroup,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
