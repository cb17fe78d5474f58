//! Dispatch Module
//!
//! This module connects the pure request handlers to the impure effect and
//! HTTP runtimes. A handler receives read-only [`Sources`] and returns
//! [`Sinks`]: four streams describing the response, log entries, outbound
//! calls and effects it wants. The [`Dispatcher`] owns everything that runs.
//!
//! # Module Structure
//!
//! ```text
//! dispatch/
//! ├── mod.rs          - Module exports and documentation
//! ├── envelope.rs     - ResponseEnvelope and LogEntry
//! ├── request.rs      - ApiRequest and its axum extractor
//! ├── sinks.rs        - Handler trait, Sources and Sinks
//! └── dispatcher.rs   - The per-request dispatch loop
//! ```
//!
//! # Request Lifecycle
//!
//! 1. **Compose**: fresh runtimes are created and the handler builds its sinks
//! 2. **Drive**: the loop feeds the effect and call sinks to the runtimes and
//!    writes log entries as they arrive
//! 3. **Respond**: the first envelope on the response sink is taken
//! 4. **Dispose**: the whole graph is dropped; later envelopes and unsettled
//!    producers are never observed

/// Response envelopes and log entries
pub mod envelope;

/// Incoming request representation
pub mod request;

/// Handler contract
pub mod sinks;

/// Dispatch loop
pub mod dispatcher;

pub use dispatcher::{Dispatched, Dispatcher};
pub use envelope::{LogEntry, LogLevel, ResponseEnvelope};
pub use request::ApiRequest;
pub use sinks::{Handler, Sinks, Sources};
