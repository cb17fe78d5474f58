//! Effect Module
//!
//! Handlers never perform side effects themselves. They emit
//! [`EffectDescriptor`]s, each pairing a tag with a producer closure that is
//! not invoked until the dispatch loop hands the descriptor to an
//! [`EffectRuntime`]. The runtime runs producers concurrently and publishes
//! every outcome on a per-request bus, where handlers read it back through the
//! tag-filtered views of [`EffectSource`].
//!
//! # Module Structure
//!
//! ```text
//! effects/
//! ├── mod.rs          - Module exports and documentation
//! ├── descriptor.rs   - EffectDescriptor, EffectOutcome, EffectError
//! └── runtime.rs      - EffectRuntime and the EffectSource read view
//! ```
//!
//! # Guarantees
//!
//! - **At-most-once**: a producer is an `FnOnce`; the runtime consumes it on
//!   first use and never retries
//! - **Contained failures**: errors and panics become an outcome with the
//!   error branch set
//! - **Fan-out**: any number of `select*` views can observe one outcome

/// Effect descriptors and outcomes
pub mod descriptor;

/// Effect runtime and read views
pub mod runtime;

pub use descriptor::{EffectDescriptor, EffectError, EffectOutcome, EffectResult};
pub use runtime::{EffectRuntime, EffectSource, WILDCARD};
