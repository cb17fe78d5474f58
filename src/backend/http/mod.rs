//! HTTP Call Module
//!
//! Outbound HTTP calls follow the same declare-then-execute split as effects.
//! Handlers emit [`HttpCallDescriptor`]s tagged with a category; the dispatch
//! loop feeds them to an [`HttpChannel`], which performs the calls through an
//! [`HttpClient`] and publishes each [`HttpOutcome`] on a per-request bus.
//!
//! # Module Structure
//!
//! ```text
//! http/
//! ├── mod.rs          - Module exports and documentation
//! ├── descriptor.rs   - Call descriptors, responses, outcomes, errors
//! ├── channel.rs      - HttpChannel and the HttpSource read view
//! └── client.rs       - HttpClient trait and the reqwest implementation
//! ```
//!
//! # Error Policy
//!
//! Only transport failures (connect errors, timeouts, resets, body read
//! failures) produce the error branch. A `404` or `500` from the remote side
//! is a successful call carrying that status; handlers decide what it means.

/// Call descriptors and outcomes
pub mod descriptor;

/// Per-request call channel
pub mod channel;

/// Transport implementations
pub mod client;

pub use channel::{HttpChannel, HttpSource};
pub use client::{HttpClient, ReqwestClient};
pub use descriptor::{HttpCallDescriptor, HttpCallError, HttpOutcome, HttpResponse};
